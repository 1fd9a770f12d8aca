/*
 * This file is part of Envyswitch.
 *
 * Copyright (C) 2025 Envyswitch contributors
 *
 * Envyswitch is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Envyswitch is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Envyswitch. If not, see <https://www.gnu.org/licenses/>.
 */

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::profile::GpuProfile;

/// Modprobe blacklist written by `envycontrol -s integrated`
pub const BLACKLIST_PATH: &str = "/etc/modprobe.d/blacklist-nvidia.conf";
/// Udev rule that removes the nvidia device in integrated mode
pub const UDEV_INTEGRATED_PATH: &str = "/lib/udev/rules.d/50-remove-nvidia.rules";
/// Xorg configuration written by `envycontrol -s nvidia`
pub const XORG_PATH: &str = "/etc/X11/xorg.conf";
/// Modeset options written by `envycontrol -s nvidia`
pub const MODESET_PATH: &str = "/etc/modprobe.d/nvidia.conf";

/// The four evidence files consulted to decide the active profile
#[derive(Debug, Clone)]
pub struct DetectionPaths {
    pub blacklist: PathBuf,
    pub udev_integrated: PathBuf,
    pub xorg: PathBuf,
    pub modeset: PathBuf,
}

impl Default for DetectionPaths {
    fn default() -> Self {
        Self {
            blacklist: PathBuf::from(BLACKLIST_PATH),
            udev_integrated: PathBuf::from(UDEV_INTEGRATED_PATH),
            xorg: PathBuf::from(XORG_PATH),
            modeset: PathBuf::from(MODESET_PATH),
        }
    }
}

/// Existence snapshot of the four evidence files, for `status --json`
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Evidence {
    pub blacklist: bool,
    pub udev_integrated: bool,
    pub xorg: bool,
    pub modeset: bool,
}

impl DetectionPaths {
    /// Same relative layout re-rooted under `root`. Tests use this to build
    /// evidence trees inside a temporary directory.
    pub fn under_root(root: &Path) -> Self {
        Self {
            blacklist: root.join("etc/modprobe.d/blacklist-nvidia.conf"),
            udev_integrated: root.join("lib/udev/rules.d/50-remove-nvidia.rules"),
            xorg: root.join("etc/X11/xorg.conf"),
            modeset: root.join("etc/modprobe.d/nvidia.conf"),
        }
    }

    /// Map on-disk evidence to the active profile. First match wins; partial
    /// evidence (only one file of a pair) falls through to the next rule, so
    /// a half-written state reads as Hybrid rather than something ambiguous.
    pub fn detect(&self) -> GpuProfile {
        if self.blacklist.exists() && self.udev_integrated.exists() {
            GpuProfile::Integrated
        } else if self.xorg.exists() && self.modeset.exists() {
            GpuProfile::Nvidia
        } else {
            GpuProfile::Hybrid
        }
    }

    /// Raw existence flags behind the decision
    pub fn evidence(&self) -> Evidence {
        Evidence {
            blacklist: self.blacklist.exists(),
            udev_integrated: self.udev_integrated.exists(),
            xorg: self.xorg.exists(),
            modeset: self.modeset.exists(),
        }
    }
}

/// Detect against the live system paths. Never fails: absence of all evidence
/// files means Hybrid.
pub fn current_profile() -> GpuProfile {
    DetectionPaths::default().detect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{create_temp_detection, touch};

    #[test]
    fn test_no_evidence_is_hybrid() {
        let (_dir, paths) = create_temp_detection();
        assert_eq!(paths.detect(), GpuProfile::Hybrid);
    }

    #[test]
    fn test_blacklist_and_udev_is_integrated() {
        let (_dir, paths) = create_temp_detection();
        touch(&paths.blacklist);
        touch(&paths.udev_integrated);
        assert_eq!(paths.detect(), GpuProfile::Integrated);
    }

    #[test]
    fn test_xorg_and_modeset_is_nvidia() {
        let (_dir, paths) = create_temp_detection();
        touch(&paths.xorg);
        touch(&paths.modeset);
        assert_eq!(paths.detect(), GpuProfile::Nvidia);
    }

    #[test]
    fn test_partial_integrated_evidence_falls_through() {
        // Blacklist alone does not satisfy the integrated rule
        let (_dir, paths) = create_temp_detection();
        touch(&paths.blacklist);
        assert_eq!(paths.detect(), GpuProfile::Hybrid);

        let (_dir2, paths2) = create_temp_detection();
        touch(&paths2.udev_integrated);
        assert_eq!(paths2.detect(), GpuProfile::Hybrid);
    }

    #[test]
    fn test_partial_integrated_with_full_nvidia_pair() {
        // Rule 1 fails on partial evidence, rule 2 matches
        let (_dir, paths) = create_temp_detection();
        touch(&paths.blacklist);
        touch(&paths.xorg);
        touch(&paths.modeset);
        assert_eq!(paths.detect(), GpuProfile::Nvidia);
    }

    #[test]
    fn test_all_four_files_prefer_integrated() {
        let (_dir, paths) = create_temp_detection();
        touch(&paths.blacklist);
        touch(&paths.udev_integrated);
        touch(&paths.xorg);
        touch(&paths.modeset);
        assert_eq!(paths.detect(), GpuProfile::Integrated);
    }

    #[test]
    fn test_evidence_flags_track_files() {
        let (_dir, paths) = create_temp_detection();
        touch(&paths.xorg);
        let ev = paths.evidence();
        assert!(!ev.blacklist);
        assert!(!ev.udev_integrated);
        assert!(ev.xorg);
        assert!(!ev.modeset);
    }

    #[test]
    fn test_default_paths_are_the_system_constants() {
        let paths = DetectionPaths::default();
        assert_eq!(paths.blacklist.to_str(), Some(BLACKLIST_PATH));
        assert_eq!(paths.udev_integrated.to_str(), Some(UDEV_INTEGRATED_PATH));
        assert_eq!(paths.xorg.to_str(), Some(XORG_PATH));
        assert_eq!(paths.modeset.to_str(), Some(MODESET_PATH));
    }
}

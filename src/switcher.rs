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

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::json;
use thiserror::Error;

use crate::logger;
use crate::profile::GpuProfile;

/// Command template applied on switch. `{profile}` is the only substitution
/// point. `yes` feeds envycontrol's confirmation prompt; the session is
/// expected to terminate once the command runs.
pub const SWITCH_COMMAND_TEMPLATE: &str =
    "yes | pkexec envycontrol -s {profile}; gnome-session-quit --reboot";

/// Variant used when already running as root, where pkexec would be redundant
pub const SWITCH_COMMAND_TEMPLATE_ROOT: &str =
    "yes | envycontrol -s {profile}; gnome-session-quit --reboot";

#[derive(Debug, Error)]
pub enum SwitchError {
    /// The shell running the switch command could not be launched. Whatever
    /// happens inside it afterwards (including the user dismissing the pkexec
    /// prompt) is not observable from here.
    #[error("failed to spawn switch command: {source}")]
    Spawn {
        #[source]
        source: io::Error,
    },
}

/// Build the command line for switching to `profile`. With `elevate` the
/// envycontrol call goes through pkexec.
pub fn switch_command(profile: GpuProfile, elevate: bool) -> String {
    let template = if elevate {
        SWITCH_COMMAND_TEMPLATE
    } else {
        SWITCH_COMMAND_TEMPLATE_ROOT
    };
    template.replace("{profile}", profile.as_str())
}

/// Spawns the profile switch through a shell
#[derive(Debug, Clone)]
pub struct Switcher {
    shell: PathBuf,
    elevate: bool,
}

impl Default for Switcher {
    fn default() -> Self {
        Self {
            shell: PathBuf::from("/bin/bash"),
            // pkexec is only needed when not already root
            elevate: unsafe { libc::geteuid() } != 0,
        }
    }
}

impl Switcher {
    /// Explicit shell and escalation choice. Tests point the shell at a
    /// nonexistent path to exercise the spawn failure.
    pub fn new(shell: impl Into<PathBuf>, elevate: bool) -> Self {
        Self {
            shell: shell.into(),
            elevate,
        }
    }

    /// The exact command line `switch_to` would run for `profile`
    pub fn command_for(&self, profile: GpuProfile) -> String {
        switch_command(profile, self.elevate)
    }

    /// Apply `profile`. Fire-and-forget: the child is not awaited because the
    /// session restarts as part of the command, so there is no completion to
    /// report back to.
    pub fn switch_to(&self, profile: GpuProfile) -> Result<(), SwitchError> {
        let cmd = self.command_for(profile);
        logger::log_event(
            "switch_spawn",
            json!({ "profile": profile.as_str(), "command": cmd }),
        );
        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(&cmd)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| SwitchError::Spawn { source })?;
        logger::log_event(
            "switch_spawned",
            json!({ "profile": profile.as_str(), "pid": child.id() }),
        );
        Ok(())
    }
}

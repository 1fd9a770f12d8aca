/*
 * Test utilities for Envyswitch
 *
 * This module provides common helpers for building synthetic evidence trees
 * and a switcher that can never spawn anything real.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::detect::DetectionPaths;
    use crate::switcher::Switcher;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Creates DetectionPaths rooted in a fresh temporary directory with no
    /// evidence files present (detects as Hybrid).
    pub fn create_temp_detection() -> (TempDir, DetectionPaths) {
        let dir = TempDir::new().unwrap();
        let paths = DetectionPaths::under_root(dir.path());
        (dir, paths)
    }

    /// Creates the file (and parent directories) so an existence check passes
    pub fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    /// A switcher whose shell does not exist, so no test can ever spawn a
    /// real privileged command
    pub fn failing_switcher() -> Switcher {
        Switcher::new("/nonexistent/envyswitch-test-shell", true)
    }
}

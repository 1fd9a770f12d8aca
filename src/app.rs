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

use std::time::{Duration, Instant};

use serde_json::json;

use crate::detect::DetectionPaths;
use crate::logger;
use crate::profile::GpuProfile;
use crate::switcher::Switcher;

pub struct App {
    pub last_refresh: Instant,
    pub refresh_interval: Duration,
    /// Profile detected on the last refresh
    pub current: GpuProfile,
    /// Index into GpuProfile::ALL
    pub selected: usize,
    pub status: String,
    // confirm popup
    pub show_confirm_popup: bool,
    pub pending: Option<GpuProfile>,
    // feedback after a switch attempt
    pub feedback: Option<(bool, String)>, // (is_error, message)
    /// Set once a switch command has been spawned; the session is expected
    /// to terminate out from under us after that.
    pub switch_started: bool,
    paths: DetectionPaths,
    switcher: Switcher,
}

impl App {
    pub fn new() -> Self {
        Self::with_parts(DetectionPaths::default(), Switcher::default())
    }

    /// Injectable detection paths and switcher, used by tests
    pub fn with_parts(paths: DetectionPaths, switcher: Switcher) -> Self {
        let current = paths.detect();
        let selected = GpuProfile::ALL
            .iter()
            .position(|p| *p == current)
            .unwrap_or(0);
        Self {
            last_refresh: Instant::now(),
            refresh_interval: Duration::from_secs(2),
            current,
            selected,
            status: String::from("↑/↓: move | Enter: switch | r: re-detect | q: quit"),
            show_confirm_popup: false,
            pending: None,
            feedback: None,
            switch_started: false,
            paths,
            switcher,
        }
    }

    /// Re-run detection against the filesystem
    pub fn refresh(&mut self) {
        self.current = self.paths.detect();
        self.last_refresh = Instant::now();
    }

    pub fn selected_profile(&self) -> GpuProfile {
        GpuProfile::ALL[self.selected]
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < GpuProfile::ALL.len() {
            self.selected += 1;
        }
    }

    /// Ask for confirmation before switching to the selected profile
    pub fn request_switch(&mut self) {
        let profile = self.selected_profile();
        logger::log_event("switch_requested", json!({ "profile": profile.as_str() }));
        self.pending = Some(profile);
        self.show_confirm_popup = true;
    }

    pub fn cancel_switch(&mut self) {
        self.pending = None;
        self.show_confirm_popup = false;
    }

    /// Spawn the switch for the pending profile. On success the session will
    /// restart; on a spawn failure the error lands in `feedback`.
    pub fn confirm_switch(&mut self) {
        self.show_confirm_popup = false;
        let profile = match self.pending.take() {
            Some(p) => p,
            None => return,
        };
        match self.switcher.switch_to(profile) {
            Ok(()) => {
                self.switch_started = true;
                self.feedback = Some((
                    false,
                    format!("Switching to {}; the session will restart", profile.label()),
                ));
            }
            Err(e) => {
                self.feedback = Some((true, format!("Switch failed: {}", e)));
            }
        }
    }
}

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

//! Envyswitch - GPU power profile switcher for Linux laptops using envycontrol
//!
//! This library provides the core functionality for detecting the active GPU
//! power profile from on-disk evidence and for switching profiles through a
//! privileged envycontrol invocation followed by a session restart.

pub mod profile;
pub mod detect;
pub mod switcher;
pub mod logger;
pub mod app;
pub mod events;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

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

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// GPU power profile managed by envycontrol
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GpuProfile {
    Integrated,
    Hybrid,
    Nvidia,
}

impl GpuProfile {
    /// All profiles in menu order
    pub const ALL: [GpuProfile; 3] = [
        GpuProfile::Integrated,
        GpuProfile::Hybrid,
        GpuProfile::Nvidia,
    ];

    /// Canonical lowercase name as understood by `envycontrol -s`
    pub fn as_str(&self) -> &'static str {
        match self {
            GpuProfile::Integrated => "integrated",
            GpuProfile::Hybrid => "hybrid",
            GpuProfile::Nvidia => "nvidia",
        }
    }

    /// Human-facing label for menu entries
    pub fn label(&self) -> &'static str {
        match self {
            GpuProfile::Integrated => "Integrated",
            GpuProfile::Hybrid => "Hybrid",
            GpuProfile::Nvidia => "Nvidia",
        }
    }
}

impl fmt::Display for GpuProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown profile name
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown GPU profile '{0}' (expected integrated, hybrid or nvidia)")]
pub struct ParseProfileError(String);

impl FromStr for GpuProfile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "integrated" => Ok(GpuProfile::Integrated),
            "hybrid" => Ok(GpuProfile::Hybrid),
            "nvidia" => Ok(GpuProfile::Nvidia),
            _ => Err(ParseProfileError(s.to_string())),
        }
    }
}

//! Schedule documents: the JSON/YAML input format of the CLI and other headless callers.
//!
//! ```yaml
//! header:
//!   section: CSE-3A
//!   default_room: B-204
//! entries:
//!   - { name: Algorithms, day: Tuesday, time: "11:00", duration_slots: 2 }
//!   - { name: Networks, day: Monday, time: "14:00", is_lab: true, room_no: L-2 }
//! ```
//!
//! `grid` and `palette` are optional; any subset of their fields overrides the defaults.

use crate::config::{GridConfig, HeaderInfo, Palette};
use crate::entry::EntryDraft;
use crate::schedule::Schedule;
use crate::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleDocument {
    pub header: HeaderInfo,
    pub grid: GridConfig,
    pub palette: Palette,
    pub entries: Vec<EntryDraft>,
}

/// A document turned into render inputs.
#[derive(Debug, Clone)]
pub struct LoadedSchedule {
    pub grid: GridConfig,
    pub palette: Palette,
    pub schedule: Schedule,
    /// Drafts that `Schedule::add_entry` refused (missing name/day/time or zero duration).
    pub rejected: Vec<EntryDraft>,
}

impl ScheduleDocument {
    /// Parses JSON when the first non-whitespace character is `{`, YAML otherwise.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if trimmed.starts_with('{') {
            Ok(serde_json::from_str(trimmed)?)
        } else {
            Ok(serde_yaml::from_str(text)?)
        }
    }

    pub fn load(self) -> Result<LoadedSchedule> {
        self.grid.validate()?;

        let mut schedule = Schedule::new(self.header);
        let mut rejected = Vec::new();
        for draft in self.entries {
            if schedule.add_entry(draft.clone()).is_none() {
                rejected.push(draft);
            }
        }

        Ok(LoadedSchedule {
            grid: self.grid,
            palette: self.palette,
            schedule,
            rejected,
        })
    }
}

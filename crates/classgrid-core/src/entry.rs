use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque entry identity; only used to remove entries from a [`crate::Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One timetable session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
    pub day: String,
    pub time: String,
    pub duration_slots: u32,
    pub is_lab: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_no: Option<String>,
}

impl Entry {
    /// Label drawn inside the entry cell.
    pub fn display_name(&self) -> String {
        if self.is_lab {
            format!("{} (Lab)", self.name)
        } else {
            self.name.clone()
        }
    }

    /// One-line description in the form `Tuesday, 11:00, 2h (Lab), Room: B-12`.
    pub fn summary(&self) -> String {
        let mut out = format!("{}, {}, {}h", self.day, self.time, self.duration_slots);
        if self.is_lab {
            out.push_str(" (Lab)");
        }
        if let Some(room) = self.room_no.as_deref() {
            out.push_str(", Room: ");
            out.push_str(room);
        }
        out
    }

    /// The room label to draw, if it differs from the schedule default.
    pub fn room_override<'a>(&'a self, default_room: &str) -> Option<&'a str> {
        self.room_no
            .as_deref()
            .filter(|room| !room.is_empty() && *room != default_room)
    }
}

/// Form input for [`crate::Schedule::add_entry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDraft {
    pub name: String,
    pub day: String,
    pub time: String,
    pub duration_slots: u32,
    pub is_lab: bool,
    pub room_no: Option<String>,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            day: String::new(),
            time: String::new(),
            duration_slots: 1,
            is_lab: false,
            room_no: None,
        }
    }
}

impl EntryDraft {
    pub fn new(name: impl Into<String>, day: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            day: day.into(),
            time: time.into(),
            ..Self::default()
        }
    }

    pub fn duration(mut self, slots: u32) -> Self {
        self.duration_slots = slots;
        self
    }

    pub fn lab(mut self, is_lab: bool) -> Self {
        self.is_lab = is_lab;
        self
    }

    pub fn room(mut self, room_no: impl Into<String>) -> Self {
        self.room_no = Some(room_no.into());
        self
    }

    /// A draft is accepted when name, day and time are set and the duration is at least one slot.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.day.trim().is_empty()
            && !self.time.trim().is_empty()
            && self.duration_slots > 0
    }

    pub(crate) fn into_entry(self, id: EntryId) -> Entry {
        Entry {
            id,
            name: self.name,
            day: self.day,
            time: self.time,
            duration_slots: self.duration_slots,
            is_lab: self.is_lab,
            room_no: self.room_no.filter(|r| !r.trim().is_empty()),
        }
    }
}

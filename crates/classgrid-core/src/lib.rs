#![forbid(unsafe_code)]

//! Data model for weekly class timetables: grid configuration, entries, header labels, the
//! in-memory [`Schedule`] list and the JSON/YAML [`ScheduleDocument`] input format.

pub mod color;
pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod schedule;

pub use color::Color;
pub use config::{GridConfig, HeaderInfo, Palette, hourly_time_slots};
pub use document::{LoadedSchedule, ScheduleDocument};
pub use entry::{Entry, EntryDraft, EntryId};
pub use error::{Error, Result};
pub use schedule::Schedule;

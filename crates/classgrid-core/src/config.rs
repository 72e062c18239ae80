use crate::color::Color;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub const DEFAULT_TITLE: &str = "CLASS SCHEDULE";
pub const SECTION_FALLBACK: &str = "Section : Not Set";
pub const ROOM_FALLBACK: &str = "Room No : Not Set";

/// Hourly labels `"10:00"`, `"11:00"`, ... used by the reference timetable.
pub fn hourly_time_slots(first_hour: u32, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}:00", first_hour as usize + i))
        .collect()
}

/// Grid geometry and label sequences for one render.
///
/// Day labels map to columns and time labels map to rows by their position in the sequence.
/// Entries are matched against these labels by exact string comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub days: Vec<String>,
    pub time_slots: Vec<String>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Left edge of the first day column.
    pub origin_x: i32,
    /// Top of the first time row.
    pub origin_y: i32,
    /// Left edge of the time label column.
    pub time_column_x: i32,
    pub column_width: i32,
    pub row_height: i32,
    /// Vertical offset of a cell inside its row.
    pub row_inset: i32,
    /// Space between two consecutive cells of the same column.
    pub row_gap: i32,
    pub entry_width: i32,
    /// Height of a single-slot cell.
    pub slot_height: i32,
    pub corner_radius: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS.iter().map(|d| d.to_string()).collect(),
            time_slots: hourly_time_slots(10, 8),
            canvas_width: 1200,
            canvas_height: 800,
            origin_x: 240,
            origin_y: 180,
            time_column_x: 65,
            column_width: 180,
            row_height: 70,
            row_inset: 15,
            row_gap: 20,
            entry_width: 160,
            slot_height: 50,
            corner_radius: 8,
        }
    }
}

impl GridConfig {
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    pub fn time_index(&self, time: &str) -> Option<usize> {
        self.time_slots.iter().position(|t| t == time)
    }

    pub fn validate(&self) -> Result<()> {
        if self.days.is_empty() {
            return Err(Error::InvalidGrid {
                message: "at least one day label is required".to_string(),
            });
        }
        if self.time_slots.is_empty() {
            return Err(Error::InvalidGrid {
                message: "at least one time slot label is required".to_string(),
            });
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::InvalidGrid {
                message: format!(
                    "canvas size must be non-zero (got {}x{})",
                    self.canvas_width, self.canvas_height
                ),
            });
        }
        if self.column_width <= 0 || self.row_height <= 0 || self.slot_height <= 0 {
            return Err(Error::InvalidGrid {
                message: "column width, row height and slot height must be positive".to_string(),
            });
        }
        let non_negative = [
            ("entry_width", self.entry_width),
            ("row_gap", self.row_gap),
            ("row_inset", self.row_inset),
            ("corner_radius", self.corner_radius),
        ];
        if let Some((name, value)) = non_negative.iter().find(|(_, v)| *v < 0) {
            return Err(Error::InvalidGrid {
                message: format!("{name} must not be negative (got {value})"),
            });
        }
        Ok(())
    }
}

/// Schedule-wide labels drawn in the header boxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderInfo {
    pub title: String,
    pub section: String,
    pub default_room: String,
    pub tagline: String,
}

impl HeaderInfo {
    pub fn title_text(&self) -> &str {
        non_empty_or(&self.title, DEFAULT_TITLE)
    }

    pub fn section_text(&self) -> &str {
        non_empty_or(&self.section, SECTION_FALLBACK)
    }

    pub fn room_text(&self) -> &str {
        non_empty_or(&self.default_room, ROOM_FALLBACK)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub logo_box: Color,
    pub title_box: Color,
    pub section_box: Color,
    pub room_box: Color,
    pub tagline_box: Color,
    pub time_cell: Color,
    pub day_header: Color,
    pub grid_line: Color,
    pub entry: Color,
    pub lab_entry: Color,
    pub text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x2d, 0x2d, 0x2d),
            logo_box: Color::WHITE,
            title_box: Color::WHITE,
            section_box: Color::rgb(0x7f, 0xdb, 0xda),
            room_box: Color::rgb(0x98, 0xfb, 0x98),
            tagline_box: Color::rgb(0xd3, 0xd3, 0xd3),
            time_cell: Color::rgb(0xb0, 0xe0, 0xe6),
            day_header: Color::rgb(0xff, 0xa0, 0x7a),
            grid_line: Color::rgb(0x66, 0x66, 0x66),
            entry: Color::rgb(0x98, 0xfb, 0x98),
            lab_entry: Color::rgb(0xff, 0x99, 0x99),
            text: Color::BLACK,
        }
    }
}

impl Palette {
    pub fn entry_fill(&self, is_lab: bool) -> Color {
        if is_lab { self.lab_entry } else { self.entry }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_reference_timetable() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.days.len(), 5);
        assert_eq!(cfg.time_slots.first().map(String::as_str), Some("10:00"));
        assert_eq!(cfg.time_slots.last().map(String::as_str), Some("17:00"));
        assert_eq!((cfg.canvas_width, cfg.canvas_height), (1200, 800));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn label_lookup_is_exact() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.day_index("Tuesday"), Some(1));
        assert_eq!(cfg.day_index("tuesday"), None);
        assert_eq!(cfg.time_index("11:00"), Some(1));
        assert_eq!(cfg.time_index("11:00 "), None);
    }

    #[test]
    fn validate_rejects_empty_label_sequences() {
        let cfg = GridConfig {
            days: Vec::new(),
            ..GridConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidGrid { .. })));

        let cfg = GridConfig {
            time_slots: Vec::new(),
            ..GridConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidGrid { .. })));
    }

    #[test]
    fn validate_rejects_negative_cell_metrics() {
        for cfg in [
            GridConfig {
                entry_width: -160,
                ..GridConfig::default()
            },
            GridConfig {
                row_gap: -1,
                ..GridConfig::default()
            },
            GridConfig {
                row_inset: -15,
                ..GridConfig::default()
            },
            GridConfig {
                corner_radius: -8,
                ..GridConfig::default()
            },
        ] {
            assert!(matches!(cfg.validate(), Err(Error::InvalidGrid { .. })));
        }

        let flat = GridConfig {
            row_gap: 0,
            row_inset: 0,
            corner_radius: 0,
            ..GridConfig::default()
        };
        assert!(flat.validate().is_ok());
    }

    #[test]
    fn header_fallbacks_apply_only_to_empty_fields() {
        let header = HeaderInfo::default();
        assert_eq!(header.title_text(), DEFAULT_TITLE);
        assert_eq!(header.section_text(), SECTION_FALLBACK);
        assert_eq!(header.room_text(), ROOM_FALLBACK);

        let header = HeaderInfo {
            section: "CSE-3A".to_string(),
            default_room: "B-204".to_string(),
            ..HeaderInfo::default()
        };
        assert_eq!(header.section_text(), "CSE-3A");
        assert_eq!(header.room_text(), "B-204");
    }
}

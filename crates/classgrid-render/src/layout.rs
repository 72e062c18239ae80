//! Timetable layout: turns a grid configuration, header labels and entries into draw commands.
//!
//! Command order is background, header boxes, time and day cells, grid lines, then one
//! rectangle + labels group per entry in list order. Surfaces paint in that order, so a later
//! entry in an occupied cell covers the earlier one.

use crate::model::{DrawCommand, Rect};
use crate::text::{TextMeasurer, TextStyle};
use classgrid_core::{Color, Entry, GridConfig, HeaderInfo, Palette};

const LOGO_BOX: Rect = Rect::new(50.0, 20.0, 200.0, 100.0);
const SECTION_BOX: Rect = Rect::new(270.0, 20.0, 180.0, 30.0);
const ROOM_BOX: Rect = Rect::new(270.0, 55.0, 180.0, 30.0);
const TAGLINE_BOX: Rect = Rect::new(270.0, 90.0, 180.0, 30.0);
const TITLE_BOX: Rect = Rect::new(470.0, 20.0, 680.0, 100.0);

const SECTION_BASELINE: f64 = 40.0;
const ROOM_BASELINE: f64 = 75.0;
const TAGLINE_BASELINE: f64 = 110.0;
const TITLE_BASELINE: f64 = 80.0;

const TIME_CELL_WIDTH: f64 = 150.0;
const TIME_LABEL_X: f64 = 120.0;
const TIME_LABEL_BASELINE: f64 = 45.0;

const DAY_HEADER_RISE: f64 = 50.0;
const DAY_HEADER_HEIGHT: f64 = 40.0;
const DAY_LABEL_RISE: f64 = 25.0;

/// Horizontal rules run from this x to `canvas_width - GRID_LINE_MARGIN`.
const GRID_LINE_MARGIN: f64 = 50.0;
const GRID_LINE_DROP: f64 = 5.0;

/// Label baselines below the top of the entry's first row, as (regular, lab).
const NAME_BASELINE: (f64, f64) = (40.0, 70.0);
const ROOM_LABEL_BASELINE: (f64, f64) = (55.0, 90.0);

/// Where an entry landed on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryPlacement {
    pub day_index: usize,
    pub time_index: usize,
    pub rect: Rect,
}

/// Left x that centers a run of width `text_width` in a box starting at `box_x`.
pub fn centered_x(box_x: f64, box_width: f64, text_width: f64) -> f64 {
    box_x + (box_width - text_width) / 2.0
}

/// Height of a cell spanning `slots` consecutive rows, including the gaps it bridges.
pub fn span_height(grid: &GridConfig, slots: u32) -> f64 {
    let n = slots.max(1) as f64;
    grid.slot_height as f64 * n + grid.row_gap as f64 * (n - 1.0)
}

/// Resolves the entry's day and time labels; `None` means the entry is not drawn.
pub fn place_entry(grid: &GridConfig, entry: &Entry) -> Option<EntryPlacement> {
    let day_index = grid.day_index(&entry.day)?;
    let time_index = grid.time_index(&entry.time)?;
    let rect = Rect::new(
        column_left(grid, day_index),
        row_top(grid, time_index) + grid.row_inset as f64,
        grid.entry_width as f64,
        span_height(grid, entry.duration_slots),
    );
    Some(EntryPlacement {
        day_index,
        time_index,
        rect,
    })
}

fn column_left(grid: &GridConfig, index: usize) -> f64 {
    grid.origin_x as f64 + index as f64 * grid.column_width as f64
}

fn row_top(grid: &GridConfig, index: usize) -> f64 {
    grid.origin_y as f64 + index as f64 * grid.row_height as f64
}

pub fn layout_schedule(
    grid: &GridConfig,
    header: &HeaderInfo,
    entries: &[Entry],
    palette: &Palette,
    measurer: &dyn TextMeasurer,
) -> Vec<DrawCommand> {
    let mut out = ScheduleLayout {
        grid,
        palette,
        measurer,
        radius: grid.corner_radius as f64,
        commands: Vec::with_capacity(
            16 + 3 * (grid.days.len() + grid.time_slots.len()) + 3 * entries.len(),
        ),
    };

    out.background();
    out.header(header);
    out.time_column();
    out.day_headers();
    out.grid_lines();
    for entry in entries {
        out.entry(entry, &header.default_room);
    }
    out.commands
}

struct ScheduleLayout<'a> {
    grid: &'a GridConfig,
    palette: &'a Palette,
    measurer: &'a dyn TextMeasurer,
    radius: f64,
    commands: Vec<DrawCommand>,
}

impl ScheduleLayout<'_> {
    fn background(&mut self) {
        let canvas = Rect::new(
            0.0,
            0.0,
            self.grid.canvas_width as f64,
            self.grid.canvas_height as f64,
        );
        self.commands
            .push(DrawCommand::fill(canvas, 0.0, self.palette.background));
    }

    fn header(&mut self, header: &HeaderInfo) {
        self.commands
            .push(DrawCommand::fill(LOGO_BOX, 0.0, self.palette.logo_box));

        self.labeled_box(
            SECTION_BOX,
            self.palette.section_box,
            header.section_text(),
            TextStyle::bold(14.0),
            SECTION_BASELINE,
        );
        self.labeled_box(
            ROOM_BOX,
            self.palette.room_box,
            header.room_text(),
            TextStyle::regular(14.0),
            ROOM_BASELINE,
        );
        self.labeled_box(
            TAGLINE_BOX,
            self.palette.tagline_box,
            &header.tagline,
            TextStyle::regular(14.0),
            TAGLINE_BASELINE,
        );
        self.labeled_box(
            TITLE_BOX,
            self.palette.title_box,
            header.title_text(),
            TextStyle::bold(48.0),
            TITLE_BASELINE,
        );
    }

    /// A rounded box with `text` centered horizontally; an empty `text` draws the box alone.
    fn labeled_box(&mut self, rect: Rect, fill: Color, text: &str, style: TextStyle, baseline: f64) {
        self.commands.push(DrawCommand::fill(rect, self.radius, fill));
        if !text.is_empty() {
            self.centered_text(rect, baseline, text, style);
        }
    }

    fn centered_text(&mut self, rect: Rect, baseline: f64, text: &str, style: TextStyle) {
        let width = self.measurer.measure_width(text, &style);
        self.commands.push(DrawCommand::text(
            centered_x(rect.x, rect.width, width),
            baseline,
            text,
            style,
            self.palette.text,
        ));
    }

    fn time_column(&mut self) {
        let grid = self.grid;
        for (i, label) in grid.time_slots.iter().enumerate() {
            let cell = Rect::new(
                grid.time_column_x as f64,
                row_top(grid, i) + grid.row_inset as f64,
                TIME_CELL_WIDTH,
                grid.slot_height as f64,
            );
            self.commands
                .push(DrawCommand::fill(cell, self.radius, self.palette.time_cell));
            self.commands.push(DrawCommand::text(
                TIME_LABEL_X,
                row_top(grid, i) + TIME_LABEL_BASELINE,
                label.as_str(),
                TextStyle::regular(14.0),
                self.palette.text,
            ));
        }
    }

    fn day_headers(&mut self) {
        let grid = self.grid;
        let top = grid.origin_y as f64 - DAY_HEADER_RISE;
        let baseline = grid.origin_y as f64 - DAY_LABEL_RISE;
        for (j, day) in grid.days.iter().enumerate() {
            let cell = Rect::new(
                column_left(grid, j),
                top,
                grid.entry_width as f64,
                DAY_HEADER_HEIGHT,
            );
            self.commands
                .push(DrawCommand::fill(cell, self.radius, self.palette.day_header));
            self.centered_text(cell, baseline, day, TextStyle::bold(16.0));
        }
    }

    fn grid_lines(&mut self) {
        let grid = self.grid;
        let color = self.palette.grid_line;

        let left = GRID_LINE_MARGIN;
        let right = grid.canvas_width as f64 - GRID_LINE_MARGIN;
        for i in 0..=grid.time_slots.len() {
            let y = row_top(grid, i) + GRID_LINE_DROP;
            self.commands
                .push(DrawCommand::line((left, y), (right, y), color));
        }

        // Day boundaries sit halfway into the gap between neighbouring columns.
        let gutter = (grid.column_width as f64 - grid.entry_width as f64) / 2.0;
        let top = grid.origin_y as f64 - DAY_HEADER_RISE;
        let bottom = row_top(grid, grid.time_slots.len());
        for j in 0..=grid.days.len() {
            let x = column_left(grid, j) - gutter;
            self.commands
                .push(DrawCommand::line((x, top), (x, bottom), color));
        }
    }

    fn entry(&mut self, entry: &Entry, default_room: &str) {
        let Some(placement) = place_entry(self.grid, entry) else {
            return;
        };
        let rect = placement.rect;
        self.commands.push(DrawCommand::fill(
            rect,
            self.radius,
            self.palette.entry_fill(entry.is_lab),
        ));

        let row = row_top(self.grid, placement.time_index);
        let pick = |(regular, lab): (f64, f64)| if entry.is_lab { lab } else { regular };

        self.centered_text(
            rect,
            row + pick(NAME_BASELINE),
            &entry.display_name(),
            TextStyle::regular(16.0),
        );

        if let Some(room) = entry.room_override(default_room) {
            self.centered_text(
                rect,
                row + pick(ROOM_LABEL_BASELINE),
                &format!("Room: {room}"),
                TextStyle::regular(12.0),
            );
        }
    }
}

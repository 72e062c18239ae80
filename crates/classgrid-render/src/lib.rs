#![forbid(unsafe_code)]

//! Headless timetable layout and drawing.
//!
//! [`layout::layout_schedule`] is a pure function from grid, header and entries to an ordered list
//! of [`model::DrawCommand`]s. A [`surface::RenderSurface`] then executes those commands; the
//! recording and SVG surfaces live here, the raster surface in the `classgrid` crate.

pub mod layout;
pub mod model;
pub mod surface;
pub mod svg;
pub mod text;

use crate::model::DrawCommand;
use crate::surface::RenderSurface;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use classgrid_core::{GridConfig, Palette, Schedule};
use std::sync::Arc;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub palette: Palette,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            palette: Palette::default(),
        }
    }
}

/// Lays out a whole [`Schedule`] with the measurer and palette from `options`.
pub fn layout_schedule(
    grid: &GridConfig,
    schedule: &Schedule,
    options: &LayoutOptions,
) -> Vec<DrawCommand> {
    layout::layout_schedule(
        grid,
        &schedule.header,
        schedule.entries(),
        &options.palette,
        options.text_measurer.as_ref(),
    )
}

/// Lays out `schedule` measuring text with `surface` itself, then draws it onto `surface`.
///
/// Returns the executed commands.
pub fn render_to_surface<S>(
    surface: &mut S,
    grid: &GridConfig,
    schedule: &Schedule,
    palette: &Palette,
) -> Vec<DrawCommand>
where
    S: RenderSurface + TextMeasurer,
{
    let commands = layout::layout_schedule(
        grid,
        &schedule.header,
        schedule.entries(),
        palette,
        &*surface,
    );
    surface.execute(&commands);
    commands
}

/// Renders `schedule` to an SVG document sized to the grid canvas.
pub fn render_svg(grid: &GridConfig, schedule: &Schedule, options: &LayoutOptions) -> String {
    let mut surface = svg::SvgSurface::with_measurer(
        grid.canvas_width,
        grid.canvas_height,
        Arc::clone(&options.text_measurer),
    );
    render_to_surface(&mut surface, grid, schedule, &options.palette);
    surface.finish()
}

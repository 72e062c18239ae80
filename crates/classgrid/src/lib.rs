#![forbid(unsafe_code)]

//! `classgrid` renders weekly class timetables headlessly.
//!
//! # Features
//!
//! - `render` (default): layout + SVG rendering (`classgrid::render`)
//! - `raster`: PNG/JPG/PDF output through a tiny-skia raster surface

pub use classgrid_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use classgrid_render::layout::{EntryPlacement, centered_x, place_entry, span_height};
    pub use classgrid_render::model::{DrawCommand, Rect};
    pub use classgrid_render::surface::{RecordingSurface, RenderSurface};
    pub use classgrid_render::svg::SvgSurface;
    pub use classgrid_render::text::{
        DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
    };
    pub use classgrid_render::{LayoutOptions, render_to_surface};

    use classgrid_core::{GridConfig, LoadedSchedule, Schedule, ScheduleDocument};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Schedule(#[from] classgrid_core::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Parses a JSON or YAML schedule document into render inputs.
    pub fn load_schedule(text: &str) -> Result<LoadedSchedule> {
        let loaded = ScheduleDocument::parse(text)?.load()?;
        for draft in &loaded.rejected {
            tracing::debug!(
                name = %draft.name,
                day = %draft.day,
                time = %draft.time,
                "ignoring incomplete schedule entry"
            );
        }
        Ok(loaded)
    }

    /// Bundles the grid and layout options used for every render of a schedule.
    ///
    /// All work is CPU-bound and synchronous; every call recomputes the layout from scratch.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub grid: GridConfig,
        pub layout: LayoutOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_grid(mut self, grid: GridConfig) -> Result<Self> {
            grid.validate()?;
            self.grid = grid;
            Ok(self)
        }

        pub fn with_layout_options(mut self, layout: LayoutOptions) -> Self {
            self.layout = layout;
            self
        }

        pub fn from_loaded(loaded: &LoadedSchedule) -> Self {
            Self {
                grid: loaded.grid.clone(),
                layout: LayoutOptions {
                    palette: loaded.palette.clone(),
                    ..LayoutOptions::default()
                },
            }
        }

        fn trace_unplaced(&self, schedule: &Schedule) {
            for entry in schedule.unplaced_entries(&self.grid) {
                tracing::debug!(
                    id = %entry.id,
                    name = %entry.name,
                    day = %entry.day,
                    time = %entry.time,
                    "entry does not match the grid labels; not drawn"
                );
            }
        }

        pub fn layout_sync(&self, schedule: &Schedule) -> Vec<DrawCommand> {
            self.trace_unplaced(schedule);
            let commands = classgrid_render::layout_schedule(&self.grid, schedule, &self.layout);
            tracing::debug!(
                entries = schedule.len(),
                commands = commands.len(),
                "laid out schedule"
            );
            commands
        }

        pub fn render_svg_sync(&self, schedule: &Schedule) -> String {
            self.trace_unplaced(schedule);
            classgrid_render::render_svg(&self.grid, schedule, &self.layout)
        }

        /// Draws onto a caller-provided surface, measuring text with that surface.
        pub fn render_to<S>(&self, surface: &mut S, schedule: &Schedule) -> Vec<DrawCommand>
        where
            S: RenderSurface + TextMeasurer,
        {
            self.trace_unplaced(schedule);
            render_to_surface(surface, &self.grid, schedule, &self.layout.palette)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            schedule: &Schedule,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            self.trace_unplaced(schedule);
            raster::render_png(&self.grid, schedule, &self.layout.palette, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            schedule: &Schedule,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            self.trace_unplaced(schedule);
            raster::render_jpeg(&self.grid, schedule, &self.layout.palette, raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, schedule: &Schedule) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf(&self.render_svg_sync(schedule))
        }
    }
}

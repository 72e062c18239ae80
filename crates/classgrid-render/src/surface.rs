use crate::model::{DrawCommand, Rect};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
use classgrid_core::Color;
use std::sync::Arc;

/// A fixed-size drawing target that executes [`DrawCommand`]s in order.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color);

    /// Draws `text` with its left edge at `x` and its alphabetic baseline at `y`.
    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, color: Color);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color);

    fn apply(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FillRoundedRect {
                x,
                y,
                width,
                height,
                radius,
                color,
            } => self.fill_rounded_rect(Rect::new(*x, *y, *width, *height), *radius, *color),
            DrawCommand::DrawText {
                x,
                y,
                text,
                style,
                color,
            } => self.draw_text(*x, *y, text, style, *color),
            DrawCommand::StrokeLine {
                x1,
                y1,
                x2,
                y2,
                color,
            } => self.stroke_line((*x1, *y1), (*x2, *y2), *color),
        }
    }

    fn execute(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// Surface that only records what it is asked to draw.
pub struct RecordingSurface {
    width: u32,
    height: u32,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_measurer(width, height, Arc::new(DeterministicTextMeasurer::default()))
    }

    pub fn with_measurer(
        width: u32,
        height: u32,
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        Self {
            width,
            height,
            measurer,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        self.commands.push(DrawCommand::fill(rect, radius, color));
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, color: Color) {
        self.commands
            .push(DrawCommand::text(x, y, text, style.clone(), color));
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        self.commands.push(DrawCommand::line(from, to, color));
    }
}

impl TextMeasurer for RecordingSurface {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.measurer.measure(text, style)
    }
}

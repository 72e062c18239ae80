use crate::text::TextStyle;
use classgrid_core::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One drawing instruction. Commands carry their own style, so a surface needs no state other
/// than its pixels to execute them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRoundedRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Color,
    },
    /// `x` is the left edge of the text run, `y` its alphabetic baseline.
    DrawText {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
        color: Color,
    },
    StrokeLine {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
}

impl DrawCommand {
    pub fn fill(rect: Rect, radius: f64, color: Color) -> Self {
        DrawCommand::FillRoundedRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            radius,
            color,
        }
    }

    pub fn text(x: f64, y: f64, text: impl Into<String>, style: TextStyle, color: Color) -> Self {
        DrawCommand::DrawText {
            x,
            y,
            text: text.into(),
            style,
            color,
        }
    }

    pub fn line(from: (f64, f64), to: (f64, f64), color: Color) -> Self {
        DrawCommand::StrokeLine {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color,
        }
    }

    pub fn fill_rect(&self) -> Option<Rect> {
        match *self {
            DrawCommand::FillRoundedRect {
                x,
                y,
                width,
                height,
                ..
            } => Some(Rect::new(x, y, width, height)),
            _ => None,
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match self {
            DrawCommand::DrawText { text, .. } => Some(text),
            _ => None,
        }
    }
}

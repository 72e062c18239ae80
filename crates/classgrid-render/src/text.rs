use serde::{Deserialize, Serialize};

/// Font family used by every label of the timetable.
pub const DEFAULT_FONT_FAMILY: &str = "'Sour Gummy', sans-serif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn regular(font_size: f64) -> Self {
        Self {
            font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
            font_size,
            font_weight: None,
        }
    }

    pub fn bold(font_size: f64) -> Self {
        Self {
            font_weight: Some("bold".to_string()),
            ..Self::regular(font_size)
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(
            self.font_weight.as_deref().map(str::trim),
            Some("bold" | "bolder" | "600" | "700" | "800" | "900")
        )
    }

    /// CSS `font` shorthand, e.g. `bold 16px 'Sour Gummy', sans-serif`.
    pub fn css_font(&self) -> String {
        let family = self.font_family.as_deref().unwrap_or("sans-serif");
        match self.font_weight.as_deref() {
            Some(weight) => format!("{weight} {}px {family}", self.font_size),
            None => format!("{}px {family}", self.font_size),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures rendered text. Layout asks for widths before emitting the matching draw command,
/// so surfaces that draw text should measure with the same fonts they draw with.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    fn measure_width(&self, text: &str, style: &TextStyle) -> f64 {
        self.measure(text, style).width
    }
}

/// Font-independent measurer: every char is `char_width_factor` em wide.
///
/// Used by tests and by headless callers that need reproducible layout across machines.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut line_count = 0usize;
        let mut max_chars = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            max_chars = max_chars.max(line.chars().count());
        }

        let width = max_chars as f64 * font_size * char_width_factor;
        let height = line_count as f64 * font_size * line_height_factor;
        TextMetrics {
            width,
            height,
            line_count,
        }
    }
}

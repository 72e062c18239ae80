#![forbid(unsafe_code)]

use super::{RenderSurface, TextMeasurer, TextMetrics, TextStyle, render_to_surface};
use classgrid_core::{Color, GridConfig, Palette, Schedule};
use classgrid_render::model::Rect;
use classgrid_render::text::DeterministicTextMeasurer;
use std::fmt::Write as _;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering")]
    JpegBackground,
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Color painted under the schedule; the schedule background normally covers it.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Families tried, in order, as the stand-in for generic `sans-serif` and for unresolved families.
const PREFERRED_SANS_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "FreeSans",
];

/// Picks the fallback family from the installed family names: a preferred sans face when one is
/// installed, otherwise the first family listed.
fn fallback_family<'a>(installed: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let installed: Vec<&str> = installed.into_iter().collect();
    PREFERRED_SANS_FAMILIES
        .iter()
        .find(|family| installed.iter().any(|name| name.eq_ignore_ascii_case(family)))
        .copied()
        .or_else(|| installed.first().copied())
        .map(str::to_string)
}

/// Glyph placed on both sides of a run while measuring it, so side bearings and edge spaces count.
const MEASURE_FRAME: char = 'X';

/// Measures text with the fonts the raster surface draws with.
///
/// Widths are advance widths, as a canvas `measureText` reports them: the run is laid out between
/// two frame glyphs through usvg, and the ink width of the frames alone is subtracted.
/// Falls back to [`DeterministicTextMeasurer`] when no installed font can shape the text.
#[derive(Clone)]
pub struct FontTextMeasurer {
    fontdb: Arc<usvg::fontdb::Database>,
    font_family: String,
    fallback: DeterministicTextMeasurer,
}

impl Default for FontTextMeasurer {
    fn default() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::with_database(Arc::new(db))
    }
}

impl FontTextMeasurer {
    /// Uses `fontdb` as is, except that generic `sans-serif` is pointed at an installed family.
    pub fn with_database(mut fontdb: Arc<usvg::fontdb::Database>) -> Self {
        let family = fallback_family(
            fontdb
                .faces()
                .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str())),
        );
        if let Some(family) = family.as_deref() {
            Arc::make_mut(&mut fontdb).set_sans_serif_family(family);
        }
        Self {
            fontdb,
            font_family: family.unwrap_or_else(|| "Arial".to_string()),
            fallback: DeterministicTextMeasurer::default(),
        }
    }

    pub fn has_fonts(&self) -> bool {
        !self.fontdb.is_empty()
    }

    /// Family used for text whose requested families are not installed.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    fn usvg_options(&self) -> usvg::Options<'static> {
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        opt.font_family = self.font_family.clone();
        opt
    }

    fn parse_text_tree(
        &self,
        width: u32,
        height: u32,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
        color: Color,
    ) -> Result<usvg::Tree> {
        let svg = text_svg(width, height, x, y, text, style, color);
        usvg::Tree::from_str(&svg, &self.usvg_options()).map_err(|_| RasterError::SvgParse)
    }

    /// Ink extent `(width, height)` of `text` on one line, or `None` when nothing was shaped.
    fn ink_extent(&self, text: &str, style: &TextStyle) -> Option<(f64, f64)> {
        let font_size = style.font_size.max(1.0);
        let baseline = font_size * 2.0;
        let tree = self
            .parse_text_tree(
                (text.chars().count() as f64 * font_size * 2.0).ceil().max(1.0) as u32,
                (baseline * 2.0).ceil() as u32,
                0.0,
                baseline,
                text,
                style,
                Color::BLACK,
            )
            .ok()?;
        if tree.root().children().is_empty() {
            return None;
        }
        let bbox = tree.root().abs_bounding_box();
        Some((f64::from(bbox.width()), f64::from(bbox.height())))
    }
}

impl TextMeasurer for FontTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics {
                width: 0.0,
                height: 0.0,
                line_count: 1,
            };
        }
        let framed = format!("{MEASURE_FRAME}{text}{MEASURE_FRAME}");
        let frames = format!("{MEASURE_FRAME}{MEASURE_FRAME}");
        let (Some((framed_width, height)), Some((frames_width, _))) = (
            self.ink_extent(&framed, style),
            self.ink_extent(&frames, style),
        ) else {
            return self.fallback.measure(text, style);
        };
        TextMetrics {
            width: (framed_width - frames_width).max(0.0),
            height,
            line_count: 1,
        }
    }
}

/// A fixed-size RGBA canvas backed by a [`tiny_skia::Pixmap`].
///
/// Shapes are filled and stroked with tiny-skia directly; text runs go through usvg/resvg so
/// they use the same font database as [`FontTextMeasurer`].
pub struct RasterSurface {
    pixmap: tiny_skia::Pixmap,
    fonts: FontTextMeasurer,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_fonts(width, height, FontTextMeasurer::default())
    }

    pub fn with_fonts(width: u32, height: u32, fonts: FontTextMeasurer) -> Result<Self> {
        let pixmap = tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc)?;
        Ok(Self { pixmap, fonts })
    }

    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(skia_color(color));
    }

    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> tiny_skia::Pixmap {
        self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap.encode_png().map_err(|_| RasterError::PngEncode)
    }

    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());

        // JPG has no alpha channel; callers paint an opaque background first.
        let rgba = self.pixmap.data();
        let mut rgb = vec![0u8; (w as usize) * (h as usize) * 3];
        for (src, dst) in rgba.chunks_exact(4).zip(rgb.chunks_exact_mut(3)) {
            dst[0] = src[0];
            dst[1] = src[1];
            dst[2] = src[2];
        }

        let mut out = Vec::new();
        let mut enc = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
        enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
            .map_err(|_| RasterError::JpegEncode)?;
        Ok(out)
    }
}

impl RenderSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Color) {
        let Some(path) = rounded_rect_path(rect, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            tiny_skia::FillRule::Winding,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle, color: Color) {
        if text.is_empty() {
            return;
        }
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        match self
            .fonts
            .parse_text_tree(width, height, x, y, text, style, color)
        {
            Ok(tree) => resvg::render(
                &tree,
                tiny_skia::Transform::identity(),
                &mut self.pixmap.as_mut(),
            ),
            Err(err) => tracing::debug!(%err, text, "skipping text run"),
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(from.0 as f32, from.1 as f32);
        pb.line_to(to.0 as f32, to.1 as f32);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: 1.0,
            ..tiny_skia::Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &stroke,
            tiny_skia::Transform::identity(),
            None,
        );
    }
}

impl TextMeasurer for RasterSurface {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        self.fonts.measure(text, style)
    }
}

/// Draws `schedule` onto a fresh raster surface of the grid's canvas size.
pub fn render_surface(
    grid: &GridConfig,
    schedule: &Schedule,
    palette: &Palette,
    options: &RasterOptions,
) -> Result<RasterSurface> {
    let mut surface = RasterSurface::new(grid.canvas_width, grid.canvas_height)?;
    if let Some(bg) = options.background.as_deref().and_then(Color::parse) {
        surface.fill(bg);
    }
    render_to_surface(&mut surface, grid, schedule, palette);
    Ok(surface)
}

pub fn render_png(
    grid: &GridConfig,
    schedule: &Schedule,
    palette: &Palette,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    render_surface(grid, schedule, palette, options)?.encode_png()
}

pub fn render_jpeg(
    grid: &GridConfig,
    schedule: &Schedule,
    palette: &Palette,
    options: &RasterOptions,
) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = Color::parse(bg) else {
        return Err(RasterError::JpegBackground);
    };
    if !color.is_opaque() {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let options = RasterOptions {
        background: Some(bg.to_string()),
        ..options.clone()
    };
    render_surface(grid, schedule, palette, &options)?.encode_jpeg(options.jpeg_quality)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let family = fallback_family(
        opt.fontdb
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.as_str())),
    );
    if let Some(family) = family {
        opt.fontdb_mut().set_sans_serif_family(family.as_str());
        opt.font_family = family;
    }

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint(color: Color) -> tiny_skia::Paint<'static> {
    let mut paint = tiny_skia::Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Rectangle with circular corners; the radius is clamped to half the shorter side.
fn rounded_rect_path(rect: Rect, radius: f64) -> Option<tiny_skia::Path> {
    let (x, y) = (rect.x as f32, rect.y as f32);
    let (w, h) = (rect.width as f32, rect.height as f32);
    if !(w > 0.0 && h > 0.0) {
        return None;
    }
    let r = (radius as f32).clamp(0.0, w.min(h) / 2.0);
    if r <= 0.0 {
        return Some(tiny_skia::PathBuilder::from_rect(
            tiny_skia::Rect::from_xywh(x, y, w, h)?,
        ));
    }

    // Cubic approximation of a quarter circle.
    const KAPPA: f32 = 0.552_284_8;
    let k = r * KAPPA;
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// A one-text SVG document the size of the target pixmap.
fn text_svg(
    width: u32,
    height: u32,
    x: f64,
    y: f64,
    text: &str,
    style: &TextStyle,
    color: Color,
) -> String {
    let mut out = String::with_capacity(text.len() + 256);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><text x="{x}" y="{y}" font-size="{}""#,
        style.font_size
    );
    if let Some(family) = style.font_family.as_deref() {
        out.push_str(r#" font-family=""#);
        escape_xml_into(&mut out, family);
        out.push('"');
    }
    if let Some(weight) = style.font_weight.as_deref() {
        out.push_str(r#" font-weight=""#);
        escape_xml_into(&mut out, weight);
        out.push('"');
    }
    let _ = write!(
        out,
        r##" fill="#{:02x}{:02x}{:02x}" fill-opacity="{}" xml:space="preserve">"##,
        color.r,
        color.g,
        color.b,
        f64::from(color.a) / 255.0
    );
    escape_xml_into(&mut out, text);
    out.push_str("</text></svg>");
    out
}

fn escape_xml_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

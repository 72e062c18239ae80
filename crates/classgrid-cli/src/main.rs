use classgrid::render::raster::{FontTextMeasurer, RasterError, RasterOptions};
use classgrid::render::{
    DeterministicTextMeasurer, HeadlessError, HeadlessRenderer, LayoutOptions, TextMeasurer,
    load_schedule,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Schedule(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Schedule(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Schedule(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Layout,
    List,
}

#[derive(Debug, Clone, Copy, Default)]
enum TextMeasurerKind {
    #[default]
    Deterministic,
    Font,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    text_measurer: Option<TextMeasurerKind>,
    render_format: Option<RenderFormat>,
    background: Option<String>,
    jpeg_quality: Option<u8>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "classgrid-cli\n\
\n\
USAGE:\n\
  classgrid-cli [render] [--format svg|png|jpg|pdf] [--background <color>] [--quality <1-100>] [--text-measurer deterministic|font] [--out <path>] [<path>|-]\n\
  classgrid-cli layout [--pretty] [--text-measurer deterministic|font] [<path>|-]\n\
  classgrid-cli list [<path>|-]\n\
\n\
NOTES:\n\
  - <path> is a JSON or YAML schedule document; if omitted or '-', input is read from stdin.\n\
  - layout prints the draw commands as JSON.\n\
  - list prints one line per entry: id, name and summary.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - --out - writes any format to stdout.\n\
  - --background applies to png/jpg, --quality to jpg, --text-measurer to svg/pdf (pdf defaults to font).\n\
  - RUST_LOG=debug reports entries that are skipped or not placed on the grid.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "list" => args.command = Command::List,
            "--pretty" => args.pretty = true,
            "--text-measurer" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.text_measurer = Some(match kind.as_str() {
                    "deterministic" => TextMeasurerKind::Deterministic,
                    "font" => TextMeasurerKind::Font,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = Some(
                    fmt.parse::<RenderFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--quality" => {
                let Some(q) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let q = q.parse::<u8>().map_err(|_| CliError::Usage(usage()))?;
                if !(1..=100).contains(&q) {
                    return Err(CliError::Usage(usage()));
                }
                args.jpeg_quality = Some(q);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    check_flags(&args)?;
    Ok(args)
}

/// Rejects options that have no effect on the selected command or output format.
fn check_flags(args: &Args) -> Result<(), CliError> {
    let render_only = args.render_format.is_some()
        || args.background.is_some()
        || args.jpeg_quality.is_some()
        || args.out.is_some();
    match args.command {
        Command::List if render_only || args.pretty || args.text_measurer.is_some() => Err(
            CliError::Usage("list accepts no options besides the input path"),
        ),
        Command::Layout if render_only => Err(CliError::Usage(
            "--format, --background, --quality and --out apply only to render",
        )),
        Command::List | Command::Layout => Ok(()),
        Command::Render => {
            let format = args.render_format.unwrap_or_default();
            if args.pretty {
                return Err(CliError::Usage("--pretty applies only to layout"));
            }
            if args.background.is_some() && !matches!(format, RenderFormat::Png | RenderFormat::Jpeg)
            {
                return Err(CliError::Usage(
                    "--background applies only to png and jpg output",
                ));
            }
            if args.jpeg_quality.is_some() && !matches!(format, RenderFormat::Jpeg) {
                return Err(CliError::Usage("--quality applies only to jpg output"));
            }
            if args.text_measurer.is_some()
                && matches!(format, RenderFormat::Png | RenderFormat::Jpeg)
            {
                return Err(CliError::Usage(
                    "--text-measurer applies only to svg and pdf output; png and jpg measure with the fonts they draw with",
                ));
            }
            Ok(())
        }
    }
}

fn init_logging() {
    // Logs go to stderr so stdout stays clean for SVG/JSON output.
    FmtSubscriber::builder()
        .with_max_level(
            std::env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::WARN),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn build_text_measurer(kind: TextMeasurerKind) -> Arc<dyn TextMeasurer + Send + Sync> {
    match kind {
        TextMeasurerKind::Deterministic => Arc::new(DeterministicTextMeasurer::default()),
        TextMeasurerKind::Font => Arc::new(FontTextMeasurer::default()),
    }
}

fn default_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
        tracing::info!(path = out, bytes = bytes.len(), "wrote output");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let loaded = load_schedule(&text)?;
    let renderer = HeadlessRenderer::from_loaded(&loaded);
    let schedule = &loaded.schedule;

    match args.command {
        Command::List => {
            let mut stdout = std::io::stdout().lock();
            for entry in schedule.entries() {
                writeln!(stdout, "{}\t{}\t{}", entry.id, entry.name, entry.summary())?;
            }
            Ok(())
        }
        Command::Layout => {
            let layout = LayoutOptions {
                text_measurer: build_text_measurer(args.text_measurer.unwrap_or_default()),
                ..renderer.layout.clone()
            };
            let commands = renderer.with_layout_options(layout).layout_sync(schedule);
            write_json(&commands, args.pretty)
        }
        Command::Render => {
            let format = args.render_format.unwrap_or_default();
            let raster = RasterOptions {
                background: args.background.clone(),
                jpeg_quality: args
                    .jpeg_quality
                    .unwrap_or(RasterOptions::default().jpeg_quality),
            };

            match format {
                RenderFormat::Svg => {
                    let layout = LayoutOptions {
                        text_measurer: build_text_measurer(args.text_measurer.unwrap_or_default()),
                        ..renderer.layout.clone()
                    };
                    let svg = renderer.with_layout_options(layout).render_svg_sync(schedule);
                    match args.out.as_deref() {
                        None => {
                            print!("{svg}");
                            Ok(())
                        }
                        Some(out) => write_bytes(svg.as_bytes(), out),
                    }
                }
                format => {
                    let bytes = match format {
                        RenderFormat::Png => renderer.render_png_sync(schedule, &raster)?,
                        RenderFormat::Jpeg => renderer.render_jpeg_sync(schedule, &raster)?,
                        _ => {
                            // svg2pdf draws with system fonts, so center with them too.
                            let kind = args.text_measurer.unwrap_or(TextMeasurerKind::Font);
                            let layout = LayoutOptions {
                                text_measurer: build_text_measurer(kind),
                                ..renderer.layout.clone()
                            };
                            renderer
                                .with_layout_options(layout)
                                .render_pdf_sync(schedule)?
                        }
                    };
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_out_path(args.input.as_deref(), format.extension())
                            .to_string_lossy()
                            .to_string()
                    });
                    write_bytes(&bytes, &out)
                }
            }
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_logging();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

use classgrid::render::{
    DrawCommand, HeadlessError, HeadlessRenderer, LayoutOptions, RecordingSurface, load_schedule,
};
use classgrid::{Color, EntryDraft, GridConfig, HeaderInfo, Schedule};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn read_fixture(name: &str) -> String {
    let path = workspace_root()
        .join("fixtures")
        .join("schedules")
        .join(name);
    std::fs::read_to_string(&path).expect("fixture")
}

fn texts(commands: &[DrawCommand]) -> Vec<&str> {
    commands.iter().filter_map(DrawCommand::text_content).collect()
}

#[test]
fn fixture_renders_to_svg() {
    let loaded = load_schedule(&read_fixture("basic.yaml")).expect("load");
    let renderer = HeadlessRenderer::from_loaded(&loaded);
    let svg = renderer.render_svg_sync(&loaded.schedule);

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="1200" height="800""#));
    assert!(svg.contains(">Algorithms</text>"));
    assert!(svg.contains(">Networks (Lab)</text>"));
    assert!(svg.contains(">Room: L-2</text>"));
    // Sunday is not a grid column.
    assert!(!svg.contains("Weekend Seminar"));
    // Same room as the header: no per-entry label.
    assert!(!svg.contains(">Room: B-204</text>"));
}

#[test]
fn layout_is_deterministic_across_renderers() {
    let loaded = load_schedule(&read_fixture("basic.json")).expect("load");
    let a = HeadlessRenderer::from_loaded(&loaded).layout_sync(&loaded.schedule);
    let b = HeadlessRenderer::new().layout_sync(&loaded.schedule);
    assert_eq!(a, b);
    assert!(texts(&a).contains(&"WEEK 1"));
    assert!(texts(&a).contains(&"Room: C-3"));
}

#[test]
fn render_to_surface_matches_layout() {
    let loaded = load_schedule(&read_fixture("basic.yaml")).expect("load");
    let renderer = HeadlessRenderer::from_loaded(&loaded);

    let mut surface = RecordingSurface::new(1200, 800);
    let returned = renderer.render_to(&mut surface, &loaded.schedule);
    assert_eq!(surface.commands(), returned.as_slice());
    assert_eq!(returned, renderer.layout_sync(&loaded.schedule));
}

#[test]
fn incomplete_drafts_are_reported_not_fatal() {
    let loaded = load_schedule(
        r#"{"entries": [
            {"name": "", "day": "Monday", "time": "10:00"},
            {"name": "Physics", "day": "Monday", "time": "10:00", "duration_slots": 0},
            {"name": "Chemistry", "day": "Monday", "time": "10:00"}
        ]}"#,
    )
    .expect("load");
    assert_eq!(loaded.schedule.len(), 1);
    assert_eq!(loaded.rejected.len(), 2);
}

#[test]
fn invalid_documents_surface_core_errors() {
    assert!(matches!(
        load_schedule("{ not json"),
        Err(HeadlessError::Schedule(classgrid::Error::Json(_)))
    ));
    assert!(matches!(
        load_schedule("grid:\n  days: []\n"),
        Err(HeadlessError::Schedule(classgrid::Error::InvalidGrid { .. }))
    ));

    let empty = GridConfig {
        time_slots: Vec::new(),
        ..GridConfig::default()
    };
    assert!(HeadlessRenderer::new().with_grid(empty).is_err());
}

#[test]
fn palette_override_from_document_reaches_output() {
    let loaded = load_schedule(
        "palette:\n  background: \"#000000\"\nentries:\n  - { name: Lab, day: Monday, time: \"10:00\", is_lab: true }\n",
    )
    .expect("load");
    let renderer = HeadlessRenderer::from_loaded(&loaded);
    let commands = renderer.layout_sync(&loaded.schedule);

    let DrawCommand::FillRoundedRect { color, .. } = &commands[0] else {
        panic!("background first");
    };
    assert_eq!(*color, Color::BLACK);
    assert!(commands.iter().any(|c| matches!(
        c,
        DrawCommand::FillRoundedRect { color, .. } if *color == Color::rgb(0xff, 0x99, 0x99)
    )));
}

#[test]
fn removing_an_entry_restores_previous_render() {
    let renderer = HeadlessRenderer::new().with_layout_options(LayoutOptions::default());
    let mut schedule = Schedule::new(HeaderInfo {
        section: "CSE-3A".to_string(),
        ..HeaderInfo::default()
    });
    schedule.add_entry(EntryDraft::new("Algorithms", "Tuesday", "11:00").duration(2));
    let before = renderer.render_svg_sync(&schedule);

    let id = schedule
        .add_entry(EntryDraft::new("Compilers", "Thursday", "15:00").room("B-12"))
        .expect("complete draft");
    assert_ne!(renderer.render_svg_sync(&schedule), before);

    schedule.remove_entry(&id).expect("present");
    assert_eq!(renderer.render_svg_sync(&schedule), before);
}

use classgrid::render::{HeadlessRenderer, load_schedule};
use classgrid::{EntryDraft, HeaderInfo, Schedule};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn fixtures() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", "header:\n  section: CSE-3A\n"),
        (
            "week",
            r#"header:
  section: CSE-3A
  default_room: B-204
entries:
  - { name: Algorithms, day: Tuesday, time: "11:00", duration_slots: 2 }
  - { name: Operating Systems, day: Monday, time: "10:00", room_no: B-204 }
  - { name: Networks, day: Wednesday, time: "14:00", duration_slots: 2, is_lab: true, room_no: L-2 }
  - { name: Databases, day: Friday, time: "16:00", room_no: C-3 }
  - { name: Compilers, day: Thursday, time: "09:00" }"#,
        ),
    ]
}

/// Fills every cell of the default grid with a one-slot entry.
fn full_grid() -> Schedule {
    let mut schedule = Schedule::new(HeaderInfo::default());
    let grid = classgrid::GridConfig::default();
    for day in &grid.days {
        for time in &grid.time_slots {
            let draft = EntryDraft::new(format!("{day} {time}"), day, time).room("R-1");
            let _ = schedule.add_entry(draft);
        }
    }
    schedule
}

fn bench_load_and_render_svg(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_and_render_svg");
    for (name, input) in fixtures() {
        group.bench_function(name, |b| {
            b.iter_batched(
                || input,
                |text| {
                    let loaded = load_schedule(text).unwrap();
                    let renderer = HeadlessRenderer::from_loaded(&loaded);
                    let _svg = renderer.render_svg_sync(&loaded.schedule);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_layout_only(c: &mut Criterion) {
    let renderer = HeadlessRenderer::new();
    let schedule = full_grid();

    let mut group = c.benchmark_group("layout_only");
    group.bench_function("full_grid", |b| {
        b.iter(|| {
            let _ = renderer.layout_sync(&schedule);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_load_and_render_svg, bench_layout_only);
criterion_main!(benches);

//! Folding performance baseline benchmarks
//!
//! Folding runs on every keystroke, so a full cartridge (8 tabs, ~8k tokens)
//! should stay well under a frame:
//! - Full analysis of a large cartridge: <5ms
//! - Reading alone: <2ms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use pico8_lsp::config::Settings;
use pico8_lsp::structural::{FoldingWalker, RegionScanner, TabLineAnnotator};
use pico8_lsp::syntax::parse;
use pico8_lsp::{Document, FoldingAnalyzer};

/// Create a cartridge with the given number of tabs
fn generate_cartridge(tab_count: usize) -> String {
    let mut content = String::from("pico-8 cartridge // http://www.pico-8.com\nversion 41\n__lua__\n");

    for tab in 0..tab_count {
        if tab > 0 {
            content.push_str("-->8\n");
        }
        content.push_str(&generate_tab(tab));
    }

    content.push_str("__gfx__\n");
    for _ in 0..128 {
        content.push_str(&"0".repeat(128));
        content.push('\n');
    }
    content
}

/// Generate one tab of typical game code
fn generate_tab(tab: usize) -> String {
    let mut content = format!("-- tab {tab}\n-- #region state\n");
    content.push_str(&format!("t{tab} = {{x = 0, y = 0, items = {{}}}}\n-- #endregion\n\n"));

    for i in 0..12 {
        content.push_str(&format!(
            r#"function update_{tab}_{i}(o)
  if (o.dead) return
  for k, v in pairs(o.items) do
    if v.t > 0 then
      v.t -= 1
    elseif v.t == 0 then
      del(o.items, v)
    else
      v.t = 30
    end
  end
  local n = 0
  while n < 4 do
    n += 1
    repeat
      o.x += cos(n / 4)
    until o.x > 128
      or o.x < 0
  end
  return function()
    print("⬅️ " .. o.x, 0, 0, 7)
  end
end

"#
        ));
    }
    content
}

/// Benchmark the full analysis pipeline
fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    for tabs in [1, 4, 8] {
        group.bench_with_input(BenchmarkId::new("tabs", tabs), &tabs, |b, &count| {
            let document = Document::new(&generate_cartridge(count));
            let analyzer = FoldingAnalyzer::default();
            b.iter(|| {
                let info = analyzer.analyze(black_box(&document)).unwrap();
                black_box(info)
            });
        });
    }

    group.finish();
}

/// Benchmark each pass on its own
fn bench_passes(c: &mut Criterion) {
    let mut group = c.benchmark_group("passes");
    group.warm_up_time(Duration::from_millis(200));
    group.measurement_time(Duration::from_secs(2));

    let document = Document::new(&generate_cartridge(8));
    let settings = Settings::default();
    let parsed = parse(document.text());

    group.bench_function("read", |b| {
        b.iter(|| {
            let parsed = parse(black_box(document.text()));
            black_box(parsed)
        });
    });

    group.bench_function("block_ranges", |b| {
        b.iter(|| {
            let ranges = FoldingWalker::generate_ranges(black_box(&parsed.chunk)).unwrap();
            black_box(ranges)
        });
    });

    group.bench_function("regions", |b| {
        let lines = document.lines();
        b.iter(|| {
            let regions = RegionScanner::scan(black_box(&lines), &parsed.comments, &settings);
            black_box(regions)
        });
    });

    group.bench_function("tab_lines", |b| {
        b.iter(|| {
            let lines = TabLineAnnotator::annotate(black_box(document.text()), &settings.markers);
            black_box(lines)
        });
    });

    group.finish();
}

/// Benchmark settings parsing
fn bench_configuration(c: &mut Criterion) {
    let mut group = c.benchmark_group("configuration");
    group.warm_up_time(Duration::from_millis(100));
    group.measurement_time(Duration::from_secs(1));

    let sample_toml = r#"
[markers]
lua_section = "__lua__"
gfx_section = "__gfx__"
tab_separator = "-->8"

[names]
default_tab = "tab"
default_region = "region"
"#;

    group.bench_function("parse_settings", |b| {
        b.iter(|| {
            let settings = Settings::from_toml_str(black_box(sample_toml)).unwrap();
            black_box(settings)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_passes, bench_configuration);
criterion_main!(benches);

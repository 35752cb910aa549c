//! Corpus tests - run the sanitizer on every SVG in the corpus directory.
//! These check that reports and fixes work on real-world files without Chrome.

use std::fs;
use std::path::Path;

use grayscrub::{AutoPrompt, Mode, Options, Report, parse_svg, sanitize_svg};
use ignore::WalkBuilder;

fn fix_options() -> Options {
    Options {
        mode: Mode::Fix,
        ..Options::default()
    }
}

/// Fix a file with every prompt accepted, then check the result in report
/// mode. Returns a description of the first problem found.
fn check(content: &str) -> Result<(Report, Report), String> {
    let (_, report) = sanitize_svg(content, &Options::default(), &mut AutoPrompt::decline_all())
        .map_err(|e| format!("report run failed: {}", e))?;

    let (fixed, fix_report) = sanitize_svg(content, &fix_options(), &mut AutoPrompt::accept_all())
        .map_err(|e| format!("fix run failed: {}", e))?;
    parse_svg(&fixed).map_err(|e| format!("fixed output invalid: {}", e))?;

    let (_, after) = sanitize_svg(&fixed, &Options::default(), &mut AutoPrompt::decline_all())
        .map_err(|e| format!("re-check failed: {}", e))?;

    if after.filled_open_paths + after.filled_lines != fix_report.unresolved_filled_open_paths() {
        return Err(format!(
            "{} filled open paths left, {} reported unresolved",
            after.filled_open_paths + after.filled_lines,
            fix_report.unresolved_filled_open_paths()
        ));
    }
    let leftovers = [
        (after.stray_points, "stray points"),
        (after.hidden_layers, "hidden layers"),
        (after.hidden_items, "hidden objects"),
        (after.locked_layers, "locked layers"),
        (after.locked_items, "locked objects"),
        (after.colorless_paths, "colorless paths"),
        (after.off_artboard_items, "off-artboard objects"),
    ];
    for (count, what) in leftovers {
        if count > 0 {
            return Err(format!("{} {} left after fixing", count, what));
        }
    }
    if after.raster_color_model.is_some() || after.raster_resolution.is_some() {
        return Err("raster settings left after fixing".into());
    }

    Ok((report, fix_report))
}

/// Test that all corpus SVGs can be checked and fixed without errors.
#[test]
fn test_corpus_sanitize() {
    let corpus_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus");

    if !corpus_dir.exists() {
        println!("Corpus directory not found, skipping");
        return;
    }

    let mut total = 0;
    let mut passed = 0;
    let mut failed = 0;
    let mut closed = 0usize;
    let mut split = 0usize;

    for entry in WalkBuilder::new(&corpus_dir).git_ignore(false).build() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().is_some_and(|e| e == "svg") {
            let rel_path = path.strip_prefix(&corpus_dir).unwrap_or(path);
            let content = match fs::read_to_string(path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("  SKIP {}: {}", rel_path.display(), e);
                    continue;
                }
            };
            total += 1;

            match check(&content) {
                Ok((report, fixed)) => {
                    println!(
                        "  OK {}: {} findings, {} left after fixing",
                        rel_path.display(),
                        report.outstanding(),
                        fixed.outstanding()
                    );
                    closed += fixed.closed_paths;
                    split += fixed.split_paths;
                    passed += 1;
                }
                Err(e) => {
                    eprintln!("  FAIL {}: {}", rel_path.display(), e);
                    failed += 1;
                }
            }
        }
    }

    if total > 0 {
        println!("\nCorpus: {}/{} passed, {} failed", passed, total, failed);
        println!("Paths: {} closed, {} split", closed, split);
    }

    assert_eq!(failed, 0, "{} SVG files failed", failed);
}

/// Inkscape layers, sub-layers and pages.
#[test]
fn test_inkscape_document() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/inkscape_layers.svg");
    let content = fs::read_to_string(path).unwrap();

    let (report, fixed) = check(&content).unwrap();
    assert_eq!(report.artboards, 1);
    assert_eq!(report.locked_layers, 1);
    assert_eq!(report.empty_layers, 1);
    assert_eq!(report.hidden_layers, 1);
    assert_eq!(report.filled_open_paths, 2);
    assert_eq!(report.filled_lines, 1);
    assert_eq!(report.text_frames, 1);

    assert_eq!(fixed.closed_paths, 1);
    assert_eq!(fixed.split_paths, 1);
    assert_eq!(fixed.fills_removed, 1);
    assert_eq!(fixed.text_frames, 0);
}

/// Open paths inside compound paths are reported and left alone.
#[test]
fn test_compound_paths_are_not_split() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/compound.svg");
    let content = fs::read_to_string(path).unwrap();

    let (_, fixed) = check(&content).unwrap();
    assert_eq!(fixed.split_paths, 0);
    assert_eq!(fixed.unresolved_filled_open_paths(), 2);
    assert_eq!(fixed.placed_items, 1);
    assert!(!fixed.is_clean());
}

/// Content directly under the root stays there.
#[test]
fn test_root_content() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/root_content.svg");
    let content = fs::read_to_string(path).unwrap();

    let (fixed_svg, fixed) =
        sanitize_svg(&content, &fix_options(), &mut AutoPrompt::accept_all()).unwrap();
    assert_eq!(fixed.stray_points, 1);
    assert_eq!(fixed.colorless_paths, 1);
    assert_eq!(fixed.off_artboard_items, 1);

    let tree = parse_svg(&fixed_svg).unwrap();
    let names: Vec<_> = tree
        .root
        .child_elements()
        .map(|e| e.name.local.as_str())
        .collect();
    assert_eq!(names, ["title", "polygon", "path", "path"]);
}

/// A straight subpath with fill and stroke inside a compound path keeps its
/// fill, wherever it sits among the subpaths.
#[test]
fn test_compound_path_lines_keep_their_fill() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/compound_lines.svg");
    let content = fs::read_to_string(path).unwrap();

    let (report, fixed) = check(&content).unwrap();
    assert_eq!(report.filled_lines, 2);
    assert_eq!(fixed.fills_removed, 0);
    assert_eq!(fixed.unresolved_filled_open_paths(), 2);

    let (fixed_svg, _) =
        sanitize_svg(&content, &fix_options(), &mut AutoPrompt::accept_all()).unwrap();
    let tree = parse_svg(&fixed_svg).unwrap();
    let paths: Vec<_> = tree
        .root
        .child_elements()
        .flat_map(|layer| layer.child_elements())
        .map(|path| (path.get_attr("id"), path.get_attr("fill")))
        .collect();
    assert_eq!(
        paths,
        [(Some("flag"), Some("#c00")), (Some("pennant"), Some("#0c0"))]
    );
}

//! End-to-end evaluation regression test
//!
//! Builds synthetic run directories on disk (PNG glyphs plus
//! `class_labels.txt`) and checks the evaluator and aggregator against
//! known ground truth.

use glyphmatch_core::Bitmap;
use glyphmatch_recog::{
    Error, ExperimentConfig, RunSpec, evaluate_run, run_experiment,
};
use glyphmatch_test::{RegParams, glyph_bitmap, write_glyph};
use std::fs;
use std::path::Path;
use tempdir::TempDir;

/// Three visually distinct glyphs for the candidate pool.
fn glyphs() -> Vec<Bitmap> {
    vec![
        glyph_bitmap(&[
            "..#..", //
            "..#..", //
            "..#..", //
            "..#..", //
            "..#..",
        ])
        .unwrap(),
        glyph_bitmap(&[
            ".....", //
            ".....", //
            "#####", //
            ".....", //
            ".....",
        ])
        .unwrap(),
        glyph_bitmap(&[
            "#...#", //
            ".#.#.", //
            "..#..", //
            ".#.#.", //
            "#...#",
        ])
        .unwrap(),
    ]
}

/// Write one run directory. `test_sources[i]` picks which class glyph
/// is used as the test image paired with training class `i`.
fn write_run(root: &Path, run_name: &str, test_sources: &[usize]) -> Vec<(String, String)> {
    let glyphs = glyphs();
    let mut pairs = Vec::new();
    let mut labels = String::new();

    for (i, &source) in test_sources.iter().enumerate() {
        let test_rel = format!("{}/test/item{:02}.png", run_name, i + 1);
        let train_rel = format!("{}/training/class{:02}.png", run_name, i + 1);
        write_glyph(root.join(&test_rel), &glyphs[source]).unwrap();
        write_glyph(root.join(&train_rel), &glyphs[i]).unwrap();
        labels.push_str(&format!("{} {}\n", test_rel, train_rel));
        pairs.push((test_rel, train_rel));
    }

    fs::write(root.join(run_name).join("class_labels.txt"), labels).unwrap();
    pairs
}

#[test]
fn test_perfect_run_has_zero_error() {
    let mut rp = RegParams::new("run_perfect");
    let dir = TempDir::new("glyphmatch_run_perfect").unwrap();

    // Every test image is a copy of its paired training image
    write_run(dir.path(), "run01", &[0, 1, 2]);

    let spec = RunSpec::load(dir.path(), "run01", "class_labels.txt").unwrap();
    let result = evaluate_run(&spec).unwrap();

    rp.compare_values(3.0, result.item_count() as f64, 0.0);
    rp.compare_values(0.0, result.miss_count() as f64, 0.0);
    rp.compare_values(0.0, result.error_rate(), 0.0);

    assert!(rp.cleanup(), "perfect run regression failed");
}

#[test]
fn test_single_swapped_item_is_identified() {
    let mut rp = RegParams::new("run_one_miss");
    let dir = TempDir::new("glyphmatch_run_one_miss").unwrap();

    // Pair 2's test image is a copy of pair 3's training glyph, so it
    // must classify as class 3 and be counted as the one miss.
    write_run(dir.path(), "run01", &[0, 2, 2]);

    let spec = RunSpec::load(dir.path(), "run01", "class_labels.txt").unwrap();
    let result = evaluate_run(&spec).unwrap();

    rp.compare_values(1.0, result.miss_count() as f64, 0.0);
    rp.compare_values(result.error_rate(), 100.0 / 3.0, 1e-9);
    rp.compare_values(1.0, result.misclassified()[0] as f64, 0.0);

    assert!(rp.cleanup(), "single-miss regression failed");
}

#[test]
fn test_fully_mismatched_run_has_full_error() {
    let mut rp = RegParams::new("run_all_miss");
    let dir = TempDir::new("glyphmatch_run_all_miss").unwrap();

    // Cyclic shift: every test image copies another pair's glyph
    write_run(dir.path(), "run01", &[1, 2, 0]);

    let spec = RunSpec::load(dir.path(), "run01", "class_labels.txt").unwrap();
    let result = evaluate_run(&spec).unwrap();

    rp.compare_values(3.0, result.miss_count() as f64, 0.0);
    rp.compare_values(100.0, result.error_rate(), 0.0);

    assert!(rp.cleanup(), "full-miss regression failed");
}

#[test]
fn test_experiment_mean_and_order() {
    let mut rp = RegParams::new("experiment_mean");
    let dir = TempDir::new("glyphmatch_experiment").unwrap();

    write_run(dir.path(), "run01", &[0, 1, 2]); // 0% error
    write_run(dir.path(), "run02", &[1, 2, 0]); // 100% error

    let config = ExperimentConfig::new(dir.path()).with_run_count(2);
    let result = run_experiment(&config).unwrap();

    rp.compare_values(2.0, result.runs().len() as f64, 0.0);
    rp.compare_strings("run01", result.runs()[0].id());
    rp.compare_strings("run02", result.runs()[1].id());
    rp.compare_values(0.0, result.runs()[0].error_rate(), 0.0);
    rp.compare_values(100.0, result.runs()[1].error_rate(), 0.0);
    rp.compare_values(50.0, result.mean_error_rate(), 0.0);

    assert!(rp.cleanup(), "experiment mean regression failed");
}

#[test]
fn test_parallel_matches_sequential() {
    let mut rp = RegParams::new("experiment_parallel");
    let dir = TempDir::new("glyphmatch_parallel").unwrap();

    write_run(dir.path(), "run01", &[0, 1, 2]);
    write_run(dir.path(), "run02", &[0, 2, 2]);
    write_run(dir.path(), "run03", &[1, 2, 0]);

    let sequential = run_experiment(&ExperimentConfig::new(dir.path()).with_run_count(3)).unwrap();
    let parallel = run_experiment(
        &ExperimentConfig::new(dir.path())
            .with_run_count(3)
            .with_parallel(true),
    )
    .unwrap();

    rp.compare_strings(&sequential.to_string(), &parallel.to_string());

    assert!(rp.cleanup(), "parallel determinism regression failed");
}

#[test]
fn test_discovery_selects_runs_in_lexical_order() {
    let mut rp = RegParams::new("experiment_discovery");
    let dir = TempDir::new("glyphmatch_discovery").unwrap();

    write_run(dir.path(), "trial_b", &[0, 1, 2]);
    write_run(dir.path(), "trial_a", &[1, 2, 0]);

    let config = ExperimentConfig::new(dir.path()).with_discovery();
    let result = run_experiment(&config).unwrap();

    rp.compare_strings("trial_a", result.runs()[0].id());
    rp.compare_strings("trial_b", result.runs()[1].id());
    rp.compare_values(50.0, result.mean_error_rate(), 0.0);

    assert!(rp.cleanup(), "discovery regression failed");
}

#[test]
fn test_missing_image_fails_run_with_asset_error() {
    let dir = TempDir::new("glyphmatch_missing").unwrap();

    write_run(dir.path(), "run01", &[0, 1, 2]);
    // Break the run: remove one referenced training image
    fs::remove_file(dir.path().join("run01/training/class02.png")).unwrap();

    let config = ExperimentConfig::new(dir.path()).with_run_count(1);
    let err = run_experiment(&config).unwrap_err();

    match err {
        Error::RunFailed { run, source } => {
            assert_eq!(run, "run01");
            match *source {
                Error::MissingAsset { path, .. } => {
                    assert!(path.ends_with("run01/training/class02.png"));
                }
                other => panic!("expected MissingAsset, got {:?}", other),
            }
        }
        other => panic!("expected RunFailed, got {:?}", other),
    }
}

#[test]
fn test_malformed_label_file_fails_run() {
    let dir = TempDir::new("glyphmatch_badlabels").unwrap();

    write_run(dir.path(), "run01", &[0]);
    fs::write(
        dir.path().join("run01/class_labels.txt"),
        "a.png b.png c.png\n",
    )
    .unwrap();

    let config = ExperimentConfig::new(dir.path()).with_run_count(1);
    let err = run_experiment(&config).unwrap_err();

    match err {
        Error::RunFailed { run, source } => {
            assert_eq!(run, "run01");
            assert!(matches!(*source, Error::LabelFile { .. }));
        }
        other => panic!("expected RunFailed, got {:?}", other),
    }
}

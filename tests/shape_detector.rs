use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use hebb_shapes::{
    ClassTotals, DatasetLayout, HebbianTrainerConfig, Label, ShapeDetector, WeightSnapshot,
};
use image::{GrayImage, Luma};
use rstest::{fixture, rstest};
use tempfile::TempDir;

const SIDE: u32 = 50;

fn canvas() -> GrayImage {
    GrayImage::from_pixel(SIDE, SIDE, Luma([255]))
}

/// Filled rectangle in the upper-left quadrant.
fn rectangle() -> GrayImage {
    let mut img = canvas();
    for y in 4..20 {
        for x in 6..22 {
            img.put_pixel(x, y, Luma([0]));
        }
    }
    img
}

/// Filled right triangle in the lower-right quadrant.
fn triangle() -> GrayImage {
    let mut img = canvas();
    for y in 28..46 {
        for x in (74 - y)..46 {
            img.put_pixel(x, y, Luma([30]));
        }
    }
    img
}

fn save(dir: &Path, name: &str, img: &GrayImage) {
    fs::create_dir_all(dir).unwrap();
    img.save(dir.join(name)).unwrap();
}

struct Workspace {
    _root: TempDir,
    layout: DatasetLayout,
}

#[fixture]
fn workspace() -> Workspace {
    let root = tempfile::tempdir().unwrap();
    let layout = DatasetLayout::under(root.path().join("shapes"));
    for i in 0..3 {
        save(&layout.rectangles, &format!("rect_{i}.png"), &rectangle());
        save(&layout.triangles, &format!("tri_{i}.png"), &triangle());
    }
    save(&layout.mixed, "m_001_1.png", &rectangle());
    save(&layout.mixed, "m_002_0.png", &triangle());
    save(&layout.mixed, "m_003_2.png", &triangle());
    fs::write(layout.mixed.join("m_004_1.png"), b"not a png").unwrap();
    save(&layout.mixed, "unlabelled.png", &rectangle());
    Workspace {
        _root: root,
        layout,
    }
}

fn detector() -> ShapeDetector {
    ShapeDetector::new(HebbianTrainerConfig::default())
}

#[rstest]
fn training_then_testing_separates_the_classes(workspace: Workspace) {
    let detector = detector();
    let report = detector.train(&workspace.layout).unwrap();

    let order: Vec<_> = report.classes.iter().map(|c| c.label).collect();
    assert_eq!(order, vec![Label::Triangle, Label::Rectangle]);
    assert_eq!(report.applied(), 6);
    assert_eq!(report.stats.bias, 0);

    let evaluation = detector.test(&workspace.layout).unwrap();
    assert_eq!(evaluation.overall().total, 6);
    assert_relative_eq!(evaluation.accuracy().unwrap(), 1.0);
    assert_eq!(evaluation.records()[0].actual, Label::Rectangle);
    assert!(evaluation.records()[0].score > 0.0);
    assert!(evaluation.records()[5].score < 0.0);
}

#[rstest]
fn prediction_isolates_bad_examples(workspace: Workspace) {
    let detector = detector();
    detector.train(&workspace.layout).unwrap();

    let report = detector.predict(&workspace.layout, None).unwrap();
    assert_eq!(report.overall().total, 3);
    assert_eq!(report.overall().correct, 3);
    assert_eq!(report.class(Label::Triangle).total, 2);

    let failed: Vec<_> = report.failures().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["m_004_1.png", "unlabelled.png"]);
}

#[rstest]
fn prediction_honours_expected_totals(workspace: Workspace) {
    let detector = detector();
    detector.train(&workspace.layout).unwrap();

    let totals = ClassTotals {
        rectangle: 4,
        triangle: 8,
    };
    let report = detector.predict(&workspace.layout, Some(totals)).unwrap();
    assert_eq!(report.class(Label::Rectangle).total, 4);
    assert_relative_eq!(
        report.class(Label::Rectangle).correct_pct.value().unwrap(),
        25.0
    );
    assert_relative_eq!(
        report.class(Label::Triangle).correct_pct.value().unwrap(),
        25.0
    );
}

#[rstest]
fn clear_zeroes_weights_and_everything_becomes_triangle(workspace: Workspace) {
    let detector = detector();
    detector.train(&workspace.layout).unwrap();
    assert!(!detector.weights().is_zero());

    detector.clear();
    assert!(detector.weights().is_zero());

    let evaluation = detector.test(&workspace.layout).unwrap();
    assert!(evaluation.records().iter().all(|r| r.score == 0.0));
    assert!(evaluation.records().iter().all(|r| r.predicted == Label::Triangle));
    assert_eq!(evaluation.class(Label::Rectangle).correct, 0);
    assert_eq!(evaluation.class(Label::Triangle).correct, 3);
}

#[rstest]
fn mismatched_image_aborts_only_its_class_batch(workspace: Workspace) {
    let odd = GrayImage::from_pixel(40, 40, Luma([0]));
    save(&workspace.layout.rectangles, "rect_9.png", &odd);

    let detector = detector();
    let err = detector.train(&workspace.layout).unwrap_err();
    assert!(format!("{err:#}").contains("rect_9.png"));

    // Triangles were installed before the rectangle batch was rejected.
    let weights = detector.weights();
    assert_eq!(weights.bias(), -3);
}

#[rstest]
fn trained_weights_survive_a_snapshot_round_trip(workspace: Workspace) {
    let detector = detector();
    detector.train(&workspace.layout).unwrap();
    let path = workspace.layout.mixed.parent().unwrap().join("weights/hebb.wbin");
    WeightSnapshot::write_weights(&path, &detector.weights()).unwrap();

    let restored = hebb_shapes::ShapeDetector::new(HebbianTrainerConfig::default());
    let weights = WeightSnapshot::load_or_zeroed(&path, restored.store().shape()).unwrap();
    restored.load_weights(weights).unwrap();

    let evaluation = restored.test(&workspace.layout).unwrap();
    assert_relative_eq!(evaluation.accuracy().unwrap(), 1.0);
}

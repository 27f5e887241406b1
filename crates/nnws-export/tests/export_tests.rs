use std::fs;
use std::path::PathBuf;

use nnws_engine::{AnchorParams, Design, Generator, GeneratorConfig, InsertParams, WallParams};
use nnws_export::{
    export_design, read_design_file, run_triggers, spawn_batch_trigger, write_design_file,
    BatchConfig, BatchDriver, BatchReport, DesignFile, DesignMetadata, ExportError, ExportFormat,
    MANIFEST_FILE,
};
use nnws_kernel::{MockKernel, MockOp};
use uuid::Uuid;

// ── Helpers ─────────────────────────────────────────────────────────────

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("nnws-export-{}", Uuid::new_v4()))
}

fn small_batch(dir: PathBuf) -> BatchConfig {
    BatchConfig {
        widths: vec![1, 2],
        heights: vec![1],
        ..BatchConfig::new(dir)
    }
}

// ── Export ──────────────────────────────────────────────────────────────

#[test]
fn test_export_step_creates_parent_dirs() {
    let dir = scratch_dir();
    let mut kernel = MockKernel::new();
    let generated = Generator::new(GeneratorConfig::default())
        .unwrap()
        .generate(&mut kernel, &Design::OffsetAnchor(AnchorParams::default()))
        .unwrap();

    let path = dir.join("parts").join("anchor.step");
    let bytes = export_design(&kernel, &generated, &path, ExportFormat::Step).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.len(), bytes);
    assert!(text.starts_with("ISO-10303-21;"));
    assert!(text.contains("AnchorOffsetInsert"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_stl() {
    let dir = scratch_dir();
    let mut kernel = MockKernel::new();
    let generated = Generator::new(GeneratorConfig::default())
        .unwrap()
        .generate(&mut kernel, &Design::Insert(InsertParams::default()))
        .unwrap();

    let path = dir.join("insert.stl");
    let format = ExportFormat::from_path(&path).unwrap();
    assert_eq!(format, ExportFormat::Stl);
    export_design(&kernel, &generated, &path, format).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid Insert"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unknown_extension() {
    let err = ExportFormat::from_path(std::path::Path::new("part.obj")).unwrap_err();
    assert!(matches!(err, ExportError::UnknownExtension(ext) if ext == "obj"));
}

#[test]
fn test_kernel_export_failure_surfaces() {
    let dir = scratch_dir();
    let mut kernel = MockKernel::new();
    let generated = Generator::new(GeneratorConfig::default())
        .unwrap()
        .generate(&mut kernel, &Design::Anchor(AnchorParams::default()))
        .unwrap();
    kernel.fail_on(MockOp::Export);
    let err = export_design(&kernel, &generated, &dir.join("a.step"), ExportFormat::Step)
        .unwrap_err();
    assert!(matches!(err, ExportError::Kernel(_)));
    assert!(!dir.exists());
}

// ── Design files ────────────────────────────────────────────────────────

#[test]
fn test_design_file_on_disk() {
    let dir = scratch_dir();
    let path = dir.join("designs").join("wall.json");
    let file = DesignFile::new(
        DesignMetadata::new("hallway"),
        GeneratorConfig::with_clearance_mm(0.2),
        Design::Wall(WallParams::standard(4, 3, true)),
    );
    write_design_file(&path, &file).unwrap();
    let loaded = read_design_file(&path).unwrap();
    assert_eq!(loaded, file);
    assert_eq!(loaded.metadata.name, "hallway");

    fs::remove_dir_all(&dir).unwrap();
}

// ── Batch ───────────────────────────────────────────────────────────────

#[test]
fn test_batch_writes_files_and_manifest() {
    let dir = scratch_dir();
    let mut kernel = MockKernel::new();
    let driver = BatchDriver::new(small_batch(dir.clone())).unwrap();
    let report = driver.run(&mut kernel).unwrap();

    assert_eq!(report.files.len(), 4);
    assert!(dir.join("wall_2x1.step").is_file());
    assert!(dir.join("notched").join("wall_1x1_notched.step").is_file());
    // every run's bodies are gone before the next one
    assert_eq!(kernel.solid_count(), 0);

    let manifest = fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();
    let parsed: BatchReport = serde_json::from_str(&manifest).unwrap();
    assert_eq!(parsed, report);
    assert_eq!(parsed.files[0].width, 1);
    assert!(parsed.files[0].notch);
    assert_eq!(parsed.files[1].bodies, 2);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_batch_export_failure_still_cleans_up() {
    let dir = scratch_dir();
    let mut kernel = MockKernel::new();
    kernel.fail_on(MockOp::Export);
    let driver = BatchDriver::new(small_batch(dir.clone())).unwrap();
    let err = driver.run(&mut kernel).unwrap_err();
    assert!(matches!(err, ExportError::Kernel(_)));
    assert_eq!(kernel.solid_count(), 0);
    assert!(!dir.join(MANIFEST_FILE).exists());
}

#[test]
fn test_trigger_runs_on_calling_thread() {
    let dir = scratch_dir();
    let mut kernel = MockKernel::new();
    let rx = spawn_batch_trigger(small_batch(dir.clone()));
    let results = run_triggers(rx, &mut kernel);

    assert_eq!(results.len(), 1);
    let report = results[0].as_ref().unwrap();
    assert_eq!(report.files.len(), 4);
    assert!(dir.join(MANIFEST_FILE).is_file());

    fs::remove_dir_all(&dir).unwrap();
}

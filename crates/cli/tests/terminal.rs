use std::{env, fs, io::Cursor, path::PathBuf, process};

use vfview_cli::surface::TerminalSurface;
use vfview_core::{ViewerConfig, ViewerSession};
use vfview_font_engine::SkrifaEngine;

fn write_font(name: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("vfview-{}-{name}", process::id()));
    fs::write(&path, font_test_data::VAZIRMATN_VAR).unwrap();
    path
}

fn run(fonts: Vec<PathBuf>, input: &str) -> (u64, String) {
    let config = ViewerConfig { fonts, ..ViewerConfig::default() };
    let mut output = Vec::new();
    let failures = {
        let input = Cursor::new(input.to_string());
        let mut surface = TerminalSurface::new(input, &mut output, 640, 480).unwrap();
        let mut session = ViewerSession::new(SkrifaEngine::new(), config);
        session.run(&mut surface).unwrap()
    };
    (failures, String::from_utf8(output).unwrap())
}

#[test]
fn steps_weight_axis() {
    let font = write_font("weight.ttf");
    let (failures, text) = run(vec![font.clone()], "A\nA\nq\n");
    fs::remove_file(&font).ok();

    assert_eq!(failures, 0);
    assert_eq!(text.matches("--- frame").count(), 3);
    assert!(text.contains("truetype interpreter, size: 64 ppem, glyphs: 0-3"));
    assert!(text.contains("axes (± 2.5%):"));
    assert!(text.contains("A Weight: 400"));
    assert!(text.contains("A Weight: 420"));
    assert!(text.contains("A Weight: 440"));
}

#[test]
fn unreadable_font_is_reported_and_skipped() {
    let font = write_font("next.ttf");
    let missing = env::temp_dir().join("vfview-does-not-exist.ttf");
    let (_, text) = run(vec![missing, font.clone()], "F5\n.\nclose\n");
    fs::remove_file(&font).ok();

    assert!(text.contains("vfview-does-not-exist.ttf: could not be opened at 64 ppem"));
    assert!(text.contains("glyphs: 0-3"));
}

#[test]
fn end_of_input_quits() {
    let font = write_font("eof.ttf");
    let (_, text) = run(vec![font.clone()], "space\n");
    fs::remove_file(&font).ok();

    assert_eq!(text.matches("--- frame").count(), 2);
    assert!(text.contains("rendering test text string"));
}

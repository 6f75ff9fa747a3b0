//! Manifest construction over a multi-scene project tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use docbot::cancel::CancelToken;
use docbot::config::Config;
use docbot::media::{VideoAssembler, MANIFEST_NAME};
use docbot::tools::Toolbox;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn manifest_lists_clips_scene_by_scene_in_ascending_id_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    // Created out of order on purpose.
    touch(&root.join("scene_2/videos/commands_1.mp4"));
    touch(&root.join("scene_1/videos/commands_2.mp4"));
    touch(&root.join("scene_1/videos/commands_1.mp4"));
    // Non-mp4 leftovers must not leak into the manifest.
    touch(&root.join("scene_1/videos/commands_1.trimmed.gif"));

    let config = Config::default();
    let toolbox = Toolbox::from_config(&config.tools);
    let assembler = VideoAssembler::new(&toolbox, CancelToken::new());

    let clips = assembler.ordered_clips(root).unwrap();
    let manifest = root.join(MANIFEST_NAME);
    assembler.write_manifest(&clips, &manifest).unwrap();

    let content = fs::read_to_string(&manifest).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("scene_1") && lines[0].contains("commands_1.mp4"));
    assert!(lines[1].contains("scene_1") && lines[1].contains("commands_2.mp4"));
    assert!(lines[2].contains("scene_2") && lines[2].contains("commands_1.mp4"));
    for line in &lines {
        assert!(line.starts_with("file '") && line.ends_with('\''));
    }
}

#[test]
fn assembling_an_empty_project_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("scene_1/videos")).unwrap();

    let config = Config::default();
    let toolbox = Toolbox::from_config(&config.tools);
    let assembler = VideoAssembler::new(&toolbox, CancelToken::new());

    let result = assembler.assemble(root, &root.join("final.mp4"));
    assert!(result.is_err());
}

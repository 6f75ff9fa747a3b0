//! Cataloging a scene tree laid out on a real filesystem.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use docbot::catalog::{ContentCatalog, ContentKind};
use docbot::project::{list_scenes, Scene};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

#[test]
fn scenes_and_items_come_back_in_ascending_order() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    // Scene ids with a gap, created out of order.
    touch(&root.join("scene_3/commands/commands_1.yaml"));
    touch(&root.join("scene_1/commands/commands_2.yaml"));
    touch(&root.join("scene_1/edit/edit_1.yaml"));
    touch(&root.join("scene_1/commands/commands_10.yaml"));

    let scenes = list_scenes(root).unwrap();
    let ids: Vec<u32> = scenes.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let catalog = ContentCatalog::scan(&scenes[0]).unwrap();
    let sequence: Vec<(ContentKind, u32)> = catalog
        .items()
        .into_iter()
        .map(|i| (i.kind, i.id))
        .collect();
    assert_eq!(
        sequence,
        vec![
            (ContentKind::Edit, 1),
            (ContentKind::Commands, 2),
            (ContentKind::Commands, 10),
        ]
    );
}

#[test]
fn non_scene_directories_and_unnumbered_files_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    touch(&root.join("scene_1/commands/commands_1.yaml"));
    touch(&root.join("scene_1/commands/notes.yaml"));
    touch(&root.join("assets/logo.png"));
    fs::create_dir_all(root.join("scene_abc")).unwrap();
    fs::create_dir_all(root.join("scene_0")).unwrap();

    let scenes = list_scenes(root).unwrap();
    assert_eq!(scenes.len(), 1);

    let catalog = ContentCatalog::scan(&scenes[0]).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.skipped.len(), 1);
}

#[test]
fn scanning_missing_content_directories_yields_empty_catalog() {
    let tmp = TempDir::new().unwrap();
    let scene_path = tmp.path().join("scene_1");
    fs::create_dir_all(&scene_path).unwrap();

    let scene = Scene {
        id: 1,
        path: scene_path,
    };
    let catalog = ContentCatalog::scan(&scene).unwrap();
    assert!(catalog.is_empty());
}

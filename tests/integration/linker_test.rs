//! Pairing clips with narration on a real scene tree.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use docbot::media::link_scene;
use docbot::project::Scene;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn scene(root: &Path) -> Scene {
    let path = root.join("scene_1");
    fs::create_dir_all(&path).unwrap();
    Scene { id: 1, path }
}

#[test]
fn ids_are_matched_exactly_not_by_substring() {
    let tmp = TempDir::new().unwrap();
    let scene = scene(tmp.path());

    touch(&scene.path.join("gifs/commands_1.gif"));
    touch(&scene.path.join("gifs/commands_11.gif"));
    touch(&scene.path.join("audio/read_11.mp3"));

    let pairings = link_scene(&scene).unwrap();
    assert_eq!(pairings.len(), 2);

    // Clip 1 must not pick up the audio for clip 11.
    assert_eq!(pairings[0].id, 1);
    assert!(pairings[0].audio.is_none());
    assert_eq!(pairings[1].id, 11);
    assert_eq!(
        pairings[1].audio.as_deref(),
        Some(scene.path.join("audio/read_11.mp3").as_path())
    );
}

#[test]
fn linking_is_deterministic_across_repeated_scans() {
    let tmp = TempDir::new().unwrap();
    let scene = scene(tmp.path());

    for id in [3, 1, 2] {
        touch(&scene.path.join(format!("gifs/commands_{id}.gif")));
    }
    touch(&scene.path.join("audio/read_2.mp3"));

    let first = link_scene(&scene).unwrap();
    let second = link_scene(&scene).unwrap();
    let ids: Vec<u32> = first.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.clip, b.clip);
        assert_eq!(a.audio, b.audio);
    }
}

#[test]
fn missing_audio_directory_means_silent_pairings() {
    let tmp = TempDir::new().unwrap();
    let scene = scene(tmp.path());
    touch(&scene.path.join("gifs/commands_1.gif"));

    let pairings = link_scene(&scene).unwrap();
    assert_eq!(pairings.len(), 1);
    assert!(pairings[0].audio.is_none());
}

use std::io::Cursor;

use super::*;
use serde_json::json;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "lottie_verify_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_raw(w, h, vec![255u8; (w * h * 4) as usize]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

fn doc(assets: serde_json::Value) -> AnimationDocument {
    serde_json::from_value(json!({ "layers": [], "assets": assets })).unwrap()
}

#[test]
fn relative_paths_are_normalized() {
    assert_eq!(relative_asset_path("images/./a.png").unwrap(), "images/a.png");
    assert_eq!(relative_asset_path("images\\a.png").unwrap(), "images/a.png");
    assert!(relative_asset_path("/etc/passwd").is_err());
    assert!(relative_asset_path("C:/x.png").is_err());
    assert!(relative_asset_path("images/../../x.png").is_err());
    assert!(relative_asset_path("./").is_err());
}

#[test]
fn probes_existing_and_missing_files() {
    let tmp = temp_dir("probe_files");
    std::fs::create_dir_all(tmp.join("images")).unwrap();
    write_png(&tmp.join("images/img_0.png"), 4, 3);
    write_png(&tmp.join("images/img_1.png"), 2, 2);

    let d = doc(json!([
        { "id": "img_0", "w": 4, "h": 3, "u": "images/", "p": "img_0.png", "e": 0 },
        { "id": "img_1", "w": 4, "h": 4, "u": "images/", "p": "img_1.png", "e": 0 },
        { "id": "img_2", "w": 4, "h": 4, "u": "images/", "p": "img_2.png", "e": 0 },
        { "id": "inline", "p": "data:image/png;base64,AAAA", "e": 1 }
    ]));
    let probes = probe_external_assets(&d, &tmp);
    assert_eq!(probes.len(), 3);

    assert_eq!(
        probes[0].state,
        ProbeState::Found {
            width: 4,
            height: 3,
            dims_match: Some(true)
        }
    );
    assert_eq!(
        probes[1].state,
        ProbeState::Found {
            width: 2,
            height: 2,
            dims_match: Some(false)
        }
    );
    assert!(probes[1].describe().contains("differs"));
    assert_eq!(probes[2].state, ProbeState::NotFound);
    assert!(!probes[2].exists());

    std::fs::remove_dir_all(&tmp).unwrap();
}

#[test]
fn non_image_file_is_unreadable() {
    let tmp = temp_dir("probe_unreadable");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("notes.png"), b"not an image").unwrap();

    let probes = probe_external_assets(&doc(json!([{ "id": "n", "p": "notes.png" }])), &tmp);
    assert!(matches!(probes[0].state, ProbeState::Unreadable { .. }));
    assert!(probes[0].exists());

    std::fs::remove_dir_all(&tmp).unwrap();
}

#[test]
fn traversal_is_rejected_without_touching_disk() {
    let probes = probe_external_assets(
        &doc(json!([{ "id": "x", "u": "../", "p": "secret.png" }])),
        Path::new("/nonexistent"),
    );
    assert_eq!(probes.len(), 1);
    assert!(matches!(probes[0].state, ProbeState::UnsafePath { .. }));
    assert_eq!(probes[0].resolved, None);
    assert_eq!(probes[0].path, "../secret.png");
}

use pretty_assertions::assert_eq;
use tmap_engine::{export_to_folder, read_map, AssetResolver, EngineError, LoadOptions, SaveOptions, TileAnimation, EXPORT_MAP_NAME};

use super::write_png;
use crate::create_test_document;

#[test]
fn test_export_to_folder() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    let out = dir.path().join("export");
    write_png(&root.join("tile_0.png"), 16, 16);
    write_png(&root.join("tile_1.png"), 16, 16);
    write_png(&root.join("fx/1.png"), 16, 16);
    write_png(&root.join("fx/2.png"), 16, 16);

    let mut doc = create_test_document((2, 2), (2, 2), 2);
    doc.set_animation(1, TileAnimation::new("./fx", 40, 2).unwrap()).unwrap();
    let resolver = AssetResolver::new(&root).with_install_dir(None);

    let summary = export_to_folder(&doc, &resolver, &out, &SaveOptions::default()).unwrap();
    assert_eq!(summary.tiles, 2);
    assert_eq!(summary.animation_frames, 2);
    assert!(out.join("tile_1.png").is_file());
    assert!(out.join("anim_1/2.png").is_file());

    let exported = read_map(&out.join(EXPORT_MAP_NAME), &LoadOptions::default()).unwrap();
    assert_eq!(exported.tile_paths(), &["./tile_0.png".to_string(), "./tile_1.png".to_string()]);
    assert_eq!(exported.animation(1).unwrap().folder, "./anim_1");
    // source document keeps its paths
    assert_eq!(doc.animation(1).unwrap().folder, "./fx");
}

#[test]
fn test_export_missing_tile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let doc = create_test_document((1, 1), (1, 1), 1);
    let resolver = AssetResolver::new(dir.path().join("nowhere")).with_install_dir(None);
    assert!(matches!(
        export_to_folder(&doc, &resolver, &dir.path().join("out"), &SaveOptions::default()),
        Err(EngineError::MissingAsset { .. })
    ));
}

use tmap_engine::{EngineError, MapDocument, Rectangle, Size, EMPTY_TILE};

use crate::{create_test_document, fill_layer};

#[test]
fn test_new_document_is_centered_and_empty() {
    let doc = MapDocument::new((16, 16), (40, 30), (21, 9)).unwrap();
    assert_eq!(doc.canvas_size(), Size::new(40, 30));
    assert_eq!(doc.drawable(), Rectangle::from(9, 10, 21, 9));
    assert_eq!(doc.layer_count(), 1);
    assert!(doc.layers()[0].cells().iter().all(|c| *c == EMPTY_TILE));
    assert_eq!(doc.layers()[0].len(), 1200);
}

#[test]
fn test_new_document_validates() {
    assert!(MapDocument::new((0, 16), (4, 4), (4, 4)).is_err());
    assert!(MapDocument::new((16, 16), (256, 4), (4, 4)).is_err());
    assert!(MapDocument::new((16, 16), (4, 4), (5, 4)).is_err());
}

#[test]
fn test_add_and_remove_layer() {
    let mut doc = create_test_document((2, 2), (2, 2), 1);
    assert_eq!(doc.add_layer(), 1);
    assert_eq!(doc.layers()[1].len(), 4);
    doc.remove_layer(0).unwrap();
    assert_eq!(doc.layer_count(), 1);
    assert!(matches!(doc.remove_layer(0), Err(EngineError::Validation { .. })));
    assert!(matches!(doc.remove_layer(3), Err(EngineError::LayerOutOfRange { layer: 3, max: 1 })));
}

#[test]
fn test_remove_layer_adjusts_prop_layer() {
    let mut doc = create_test_document((1, 1), (1, 1), 1);
    doc.add_layer();
    doc.add_layer();
    doc.set_prop_layer(Some(2)).unwrap();

    doc.remove_layer(0).unwrap();
    assert_eq!(doc.prop_layer(), Some(1));
    doc.remove_layer(1).unwrap();
    assert_eq!(doc.prop_layer(), None);
}

#[test]
fn test_move_layer_carries_prop_layer() {
    let mut doc = create_test_document((1, 1), (1, 1), 2);
    doc.add_layer();
    fill_layer(&mut doc, 1, &[1]);
    doc.set_prop_layer(Some(1)).unwrap();

    assert_eq!(doc.move_layer(1, -1).unwrap(), 0);
    assert_eq!(doc.layers()[0].cells(), &[1]);
    assert_eq!(doc.prop_layer(), Some(0));
    assert!(doc.move_layer(0, -1).is_err());
}

#[test]
fn test_set_prop_layer_validates() {
    let mut doc = create_test_document((1, 1), (1, 1), 1);
    assert!(doc.set_prop_layer(Some(1)).is_err());
    doc.set_prop_layer(Some(0)).unwrap();
    doc.set_prop_layer(None).unwrap();
    assert_eq!(doc.prop_layer(), None);
}

#[test]
fn test_clear_prop_layer() {
    let mut doc = create_test_document((1, 1), (1, 1), 1);
    doc.set_prop_layer(Some(0)).unwrap();
    doc.clear_prop_layer();
    assert_eq!(doc.prop_layer(), None);
}

use uuid::Uuid;

use super::*;

fn product(name: &str, active: bool) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        image: format!("assets/{name}.png"),
        x: 10.0,
        y: 20.0,
        width: 120.0,
        height: 80.0,
        active,
    }
}

fn placement_with(products: Vec<Product>) -> Placement {
    let active_product = products.iter().find(|p| p.active).map(|p| p.id);
    Placement {
        id: Uuid::new_v4(),
        name: "sofa".to_owned(),
        visible: true,
        products,
        active_product,
    }
}

// --- Placement lookups ---

#[test]
fn active_resolves_the_referenced_product() {
    let placement = placement_with(vec![product("a", false), product("b", true)]);
    let active = placement.active().map(|p| p.name.clone());
    assert_eq!(active.as_deref(), Some("b"));
}

#[test]
fn active_is_none_without_reference() {
    let placement = placement_with(vec![product("a", false)]);
    assert!(placement.active().is_none());
}

#[test]
fn active_index_matches_list_position() {
    let placement = placement_with(vec![product("a", false), product("b", true), product("c", false)]);
    assert_eq!(placement.active_index(), Some(1));
}

#[test]
fn contains_member_and_non_member() {
    let placement = placement_with(vec![product("a", true)]);
    let member = placement.products[0].id;
    assert!(placement.contains(member));
    assert!(!placement.contains(Uuid::new_v4()));
}

// --- Scene background resolution ---

#[test]
fn background_for_prefers_space_override() {
    let scene = Scene {
        id: Uuid::new_v4(),
        name: "living room".to_owned(),
        background: "assets/room.jpg".to_owned(),
        background_size: Some(Size::new(2000.0, 1000.0)),
        tag: Some("indoor".to_owned()),
        spaces: Vec::new(),
    };
    let space = Space {
        id: Uuid::new_v4(),
        name: "corner".to_owned(),
        background: Some("assets/corner.jpg".to_owned()),
        background_size: Some(Size::new(1200.0, 900.0)),
        placements: Vec::new(),
    };
    let (image, size) = scene.background_for(&space);
    assert_eq!(image, "assets/corner.jpg");
    assert_eq!(size, Some(Size::new(1200.0, 900.0)));
}

#[test]
fn background_for_falls_back_to_scene() {
    let scene = Scene {
        id: Uuid::new_v4(),
        name: "living room".to_owned(),
        background: "assets/room.jpg".to_owned(),
        background_size: Some(Size::new(2000.0, 1000.0)),
        tag: None,
        spaces: Vec::new(),
    };
    let space = Space {
        id: Uuid::new_v4(),
        name: "corner".to_owned(),
        background: None,
        background_size: None,
        placements: Vec::new(),
    };
    let (image, size) = scene.background_for(&space);
    assert_eq!(image, "assets/room.jpg");
    assert_eq!(size, Some(Size::new(2000.0, 1000.0)));
}

// --- Serde round trip ---

#[test]
fn scene_serde_round_trip() {
    let placement = placement_with(vec![product("a", true), product("b", false)]);
    let scene = Scene {
        id: Uuid::new_v4(),
        name: "patio".to_owned(),
        background: "assets/patio.jpg".to_owned(),
        background_size: Some(Size::new(1920.0, 1080.0)),
        tag: Some("outdoor".to_owned()),
        spaces: vec![Space {
            id: Uuid::new_v4(),
            name: "deck".to_owned(),
            background: None,
            background_size: None,
            placements: vec![placement],
        }],
    };
    let json = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(scene, back);
}

use super::*;
use crate::net::types::{PlacementDetail, ProductDetail, SceneSummary, SpaceDetail, SpaceSummary};

const GOOD_ID: &str = "8f14e45f-ceea-467f-a0e7-0000000000aa";
const OTHER_ID: &str = "8f14e45f-ceea-467f-a0e7-0000000000ab";

fn product(id: &str) -> ProductDetail {
    ProductDetail {
        id: id.to_owned(),
        name: "red".to_owned(),
        image: "assets/red.png".to_owned(),
        x: 10.0,
        y: 20.0,
        width: 100.0,
        height: 80.0,
        active: false,
    }
}

// --- parse_id ---

#[test]
fn parse_id_accepts_uuids() {
    assert!(parse_id(GOOD_ID).is_some());
}

#[test]
fn parse_id_rejects_garbage() {
    assert!(parse_id("not-a-uuid").is_none());
    assert!(parse_id("").is_none());
}

// --- space_from_detail ---

#[test]
fn space_from_detail_maps_the_tree() {
    let detail = SpaceDetail {
        id: GOOD_ID.to_owned(),
        name: "corner".to_owned(),
        background: Some("assets/corner.jpg".to_owned()),
        background_width: Some(1200.0),
        background_height: Some(900.0),
        placements: vec![PlacementDetail {
            id: OTHER_ID.to_owned(),
            name: "sofa".to_owned(),
            visible: false,
            products: vec![product(GOOD_ID)],
            active_product: Some(GOOD_ID.to_owned()),
        }],
    };
    let space = space_from_detail(&detail).unwrap();
    assert_eq!(space.name, "corner");
    assert_eq!(space.background_size, Some(stage::geom::Size::new(1200.0, 900.0)));
    assert_eq!(space.placements.len(), 1);
    let placement = &space.placements[0];
    assert!(!placement.visible);
    assert_eq!(placement.products.len(), 1);
    assert_eq!(placement.active_product, placement.products.first().map(|p| p.id));
}

#[test]
fn space_from_detail_rejects_bad_space_id() {
    let detail = SpaceDetail {
        id: "nope".to_owned(),
        name: "corner".to_owned(),
        background: None,
        background_width: None,
        background_height: None,
        placements: Vec::new(),
    };
    assert!(space_from_detail(&detail).is_none());
}

#[test]
fn corrupt_product_rows_are_dropped_not_fatal() {
    let detail = SpaceDetail {
        id: GOOD_ID.to_owned(),
        name: "corner".to_owned(),
        background: None,
        background_width: None,
        background_height: None,
        placements: vec![PlacementDetail {
            id: OTHER_ID.to_owned(),
            name: "sofa".to_owned(),
            visible: true,
            products: vec![product("broken-id"), product(GOOD_ID)],
            active_product: None,
        }],
    };
    let space = space_from_detail(&detail).unwrap();
    assert_eq!(space.placements[0].products.len(), 1);
}

#[test]
fn degenerate_background_size_is_dropped() {
    let detail = SpaceDetail {
        id: GOOD_ID.to_owned(),
        name: "corner".to_owned(),
        background: Some("assets/corner.jpg".to_owned()),
        background_width: Some(0.0),
        background_height: Some(900.0),
        placements: Vec::new(),
    };
    let space = space_from_detail(&detail).unwrap();
    assert_eq!(space.background_size, None);
}

// --- scene_from_summary ---

#[test]
fn scene_from_summary_builds_space_stubs() {
    let summary = SceneSummary {
        id: GOOD_ID.to_owned(),
        name: "loft".to_owned(),
        background: "assets/loft.jpg".to_owned(),
        background_width: Some(2000.0),
        background_height: Some(1000.0),
        tag: Some("indoor".to_owned()),
        spaces: vec![
            SpaceSummary { id: OTHER_ID.to_owned(), name: "corner".to_owned() },
            SpaceSummary { id: "bad".to_owned(), name: "dropped".to_owned() },
        ],
    };
    let scene = scene_from_summary(&summary).unwrap();
    assert_eq!(scene.spaces.len(), 1);
    assert_eq!(scene.spaces[0].name, "corner");
    assert!(scene.spaces[0].placements.is_empty());
    assert_eq!(scene.tag.as_deref(), Some("indoor"));
}

// --- scene_list_item ---

#[test]
fn scene_list_item_counts_spaces() {
    let summary = SceneSummary {
        id: GOOD_ID.to_owned(),
        name: "loft".to_owned(),
        background: "assets/loft.jpg".to_owned(),
        background_width: None,
        background_height: None,
        tag: None,
        spaces: vec![SpaceSummary { id: OTHER_ID.to_owned(), name: "corner".to_owned() }],
    };
    let item = scene_list_item(&summary);
    assert_eq!(item.space_count, 1);
    assert_eq!(item.id, GOOD_ID);
}

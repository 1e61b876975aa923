use super::*;

#[test]
fn space_detail_round_trips() {
    let detail = SpaceDetail {
        id: "8f14e45f-ceea-467f-a0e7-0000000000aa".to_owned(),
        name: "corner".to_owned(),
        background: Some("assets/corner.jpg".to_owned()),
        background_width: Some(1200.0),
        background_height: Some(900.0),
        placements: vec![PlacementDetail {
            id: "8f14e45f-ceea-467f-a0e7-0000000000ab".to_owned(),
            name: "sofa".to_owned(),
            visible: true,
            products: vec![ProductDetail {
                id: "8f14e45f-ceea-467f-a0e7-0000000000ac".to_owned(),
                name: "red".to_owned(),
                image: "assets/red.png".to_owned(),
                x: 100.0,
                y: 50.0,
                width: 120.0,
                height: 80.0,
                active: true,
            }],
            active_product: Some("8f14e45f-ceea-467f-a0e7-0000000000ac".to_owned()),
        }],
    };
    let json = serde_json::to_string(&detail).unwrap();
    let back: SpaceDetail = serde_json::from_str(&json).unwrap();
    assert_eq!(detail, back);
}

#[test]
fn placement_visible_defaults_to_true() {
    let json = r#"{"id":"x","name":"sofa","products":[],"active_product":null}"#;
    let placement: PlacementDetail = serde_json::from_str(json).unwrap();
    assert!(placement.visible);
    assert!(placement.products.is_empty());
}

#[test]
fn scene_summary_tolerates_missing_spaces() {
    let json = r#"{"id":"x","name":"loft","background":"assets/loft.jpg","background_width":null,"background_height":null,"tag":"indoor"}"#;
    let summary: SceneSummary = serde_json::from_str(json).unwrap();
    assert!(summary.spaces.is_empty());
    assert_eq!(summary.tag.as_deref(), Some("indoor"));
}

#[test]
fn product_active_defaults_to_false() {
    let json = r#"{"id":"x","name":"red","image":"assets/red.png","x":1.0,"y":2.0,"width":3.0,"height":4.0}"#;
    let product: ProductDetail = serde_json::from_str(json).unwrap();
    assert!(!product.active);
}

#[test]
fn uploaded_exposes_the_opaque_reference() {
    let json = r#"{"reference":"asset://abc123"}"#;
    let uploaded: Uploaded = serde_json::from_str(json).unwrap();
    assert_eq!(uploaded.reference, "asset://abc123");
}

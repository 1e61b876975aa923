use super::*;

#[test]
fn endpoints_nest_spaces_under_scenes() {
    assert_eq!(scenes_endpoint(), "/api/scenes");
    assert_eq!(scene_endpoint("s1"), "/api/scenes/s1");
    assert_eq!(spaces_endpoint("s1"), "/api/scenes/s1/spaces");
    assert_eq!(space_endpoint("s1", "sp2"), "/api/scenes/s1/spaces/sp2");
    assert_eq!(placements_endpoint("s1", "sp2"), "/api/scenes/s1/spaces/sp2/placements");
}

#[test]
fn placement_scoped_endpoints_are_flat() {
    assert_eq!(placement_endpoint("p1"), "/api/placements/p1");
    assert_eq!(placement_images_endpoint("p1"), "/api/placements/p1/images");
    assert_eq!(placement_active_endpoint("p1"), "/api/placements/p1/active");
}

#[test]
fn product_endpoints_use_image_paths() {
    assert_eq!(product_endpoint("i1"), "/api/images/i1");
    assert_eq!(product_position_endpoint("i1"), "/api/images/i1/position");
}

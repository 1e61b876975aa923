use uuid::Uuid;

use super::*;
use crate::geom::{Point, Size};

fn seeded_store() -> (HierarchyStore, SceneId, SpaceId, PlacementId) {
    let mut store = HierarchyStore::new();
    let (scene, _) = store.create_scene("living room", "assets/room.jpg".to_owned(), None).unwrap();
    let (space, _) = store.create_space(scene, "corner").unwrap();
    let (placement, _) = store
        .create_placement(SpacePath { scene, space }, "sofa")
        .unwrap();
    (store, scene, space, placement)
}

fn placement_path(scene: SceneId, space: SpaceId, placement: PlacementId) -> PlacementPath {
    PlacementPath { scene, space, placement }
}

fn add_named_product(store: &mut HierarchyStore, path: PlacementPath, name: &str) -> ProductId {
    let (id, _) = store
        .add_product(
            path,
            name,
            format!("assets/{name}.png"),
            Point::new(100.0, 100.0),
            Size::new(120.0, 80.0),
        )
        .unwrap();
    id
}

/// After any mutation: every placement with products has exactly one active
/// flag agreeing with its reference.
fn assert_invariant(snapshot: &Snapshot) {
    for scene in snapshot.scenes() {
        for space in &scene.spaces {
            for placement in &space.placements {
                if placement.products.is_empty() {
                    assert_eq!(placement.active_product, None);
                    continue;
                }
                let flagged: Vec<_> = placement.products.iter().filter(|p| p.active).collect();
                assert_eq!(flagged.len(), 1, "placement {} must have one active product", placement.name);
                assert_eq!(placement.active_product, Some(flagged[0].id));
            }
        }
    }
}

// =============================================================
// Creation and naming
// =============================================================

#[test]
fn create_scene_requires_nonempty_name() {
    let mut store = HierarchyStore::new();
    let err = store.create_scene("   ", "assets/x.jpg".to_owned(), None).unwrap_err();
    assert_eq!(err, StoreError::EmptyName);
    assert!(store.snapshot().scenes().is_empty());
}

#[test]
fn create_scene_trims_name() {
    let mut store = HierarchyStore::new();
    let (id, snapshot) = store.create_scene("  patio  ", "assets/p.jpg".to_owned(), None).unwrap();
    assert_eq!(snapshot.scene(id).map(|s| s.name.as_str()), Some("patio"));
}

#[test]
fn create_space_under_unknown_scene_fails() {
    let mut store = HierarchyStore::new();
    let ghost = Uuid::new_v4();
    assert_eq!(store.create_space(ghost, "x").unwrap_err(), StoreError::UnknownScene(ghost));
}

#[test]
fn create_placement_starts_empty_and_visible() {
    let (store, scene, space, placement) = seeded_store();
    let snapshot = store.snapshot();
    let p = snapshot.placement(placement_path(scene, space, placement)).unwrap();
    assert!(p.visible);
    assert!(p.products.is_empty());
    assert_eq!(p.active_product, None);
}

#[test]
fn rename_space_rejects_empty_name_without_state_change() {
    let (mut store, scene, space, _) = seeded_store();
    let before = store.snapshot();
    let err = store.rename_space(SpacePath { scene, space }, "").unwrap_err();
    assert_eq!(err, StoreError::EmptyName);
    assert_eq!(before.scenes(), store.snapshot().scenes());
}

// =============================================================
// Snapshot immutability
// =============================================================

#[test]
fn older_snapshot_does_not_observe_later_edits() {
    let (mut store, scene, space, _) = seeded_store();
    let before = store.snapshot();
    store.rename_space(SpacePath { scene, space }, "renamed").unwrap();

    let old_name = before.space(SpacePath { scene, space }).map(|s| s.name.clone());
    let new_name = store.snapshot().space(SpacePath { scene, space }).map(|s| s.name.clone());
    assert_eq!(old_name.as_deref(), Some("corner"));
    assert_eq!(new_name.as_deref(), Some("renamed"));
}

#[test]
fn failed_mutation_leaves_tree_untouched() {
    let (mut store, scene, space, placement) = seeded_store();
    let before = store.snapshot();
    let bad = ProductPath { scene, space, placement, product: Uuid::new_v4() };
    assert!(store.set_product_position(bad, Point::new(1.0, 2.0)).is_err());
    assert_eq!(before.scenes(), store.snapshot().scenes());
}

// =============================================================
// Path addressing across branches
// =============================================================

#[test]
fn sibling_branch_survives_concurrent_edits() {
    let (mut store, scene, space_a, placement_a) = seeded_store();
    let (space_b, _) = store.create_space(scene, "window").unwrap();
    let (placement_b, _) = store
        .create_placement(SpacePath { scene, space: space_b }, "lamp")
        .unwrap();

    // Rename one space while editing a placement under the other.
    store.rename_space(SpacePath { scene, space: space_a }, "corner v2").unwrap();
    store
        .rename_placement(placement_path(scene, space_b, placement_b), "lamp v2")
        .unwrap();

    let snapshot = store.snapshot();
    assert_eq!(
        snapshot.placement(placement_path(scene, space_a, placement_a)).map(|p| p.name.as_str()),
        Some("sofa")
    );
    assert_eq!(
        snapshot.placement(placement_path(scene, space_b, placement_b)).map(|p| p.name.as_str()),
        Some("lamp v2")
    );
    assert_eq!(snapshot.space(SpacePath { scene, space: space_a }).map(|s| s.name.as_str()), Some("corner v2"));
}

#[test]
fn placement_is_not_reachable_through_wrong_space_path() {
    let (mut store, scene, _space_a, placement_a) = seeded_store();
    let (space_b, _) = store.create_space(scene, "window").unwrap();
    let wrong = placement_path(scene, space_b, placement_a);
    assert_eq!(
        store.rename_placement(wrong, "x").unwrap_err(),
        StoreError::UnknownPlacement(placement_a)
    );
}

// =============================================================
// Deletes cascade
// =============================================================

#[test]
fn delete_space_removes_descendants() {
    let (mut store, scene, space, placement) = seeded_store();
    add_named_product(&mut store, placement_path(scene, space, placement), "chair");

    let snapshot = store.delete_space(SpacePath { scene, space }).unwrap();
    assert!(snapshot.space(SpacePath { scene, space }).is_none());
    assert!(snapshot.placement(placement_path(scene, space, placement)).is_none());
}

#[test]
fn delete_scene_cascades_to_spaces() {
    let (mut store, scene, space, _) = seeded_store();
    let snapshot = store.delete_scene(scene).unwrap();
    assert!(snapshot.scene(scene).is_none());
    assert!(snapshot.space(SpacePath { scene, space }).is_none());
}

// =============================================================
// Products and the active invariant
// =============================================================

#[test]
fn first_product_becomes_active() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let first = add_named_product(&mut store, path, "chair");
    let second = add_named_product(&mut store, path, "stool");

    let snapshot = store.snapshot();
    let p = snapshot.placement(path).unwrap();
    assert_eq!(p.active_product, Some(first));
    assert!(p.contains(second));
    assert_invariant(&snapshot);
}

#[test]
fn set_active_switches_and_holds_invariant() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    add_named_product(&mut store, path, "chair");
    let stool = add_named_product(&mut store, path, "stool");

    let snapshot = store.set_active(path, stool).unwrap();
    assert_eq!(snapshot.placement(path).unwrap().active_product, Some(stool));
    assert_invariant(&snapshot);
}

#[test]
fn set_active_twice_yields_identical_snapshot() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    add_named_product(&mut store, path, "chair");
    let stool = add_named_product(&mut store, path, "stool");

    let first = store.set_active(path, stool).unwrap();
    let second = store.set_active(path, stool).unwrap();
    assert_eq!(first.scenes(), second.scenes());
}

#[test]
fn set_active_non_member_changes_nothing() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let chair = add_named_product(&mut store, path, "chair");

    let snapshot = store.set_active(path, Uuid::new_v4()).unwrap();
    assert_eq!(snapshot.placement(path).unwrap().active_product, Some(chair));
    assert_invariant(&snapshot);
}

#[test]
fn remove_active_product_reassigns() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let chair = add_named_product(&mut store, path, "chair");
    let stool = add_named_product(&mut store, path, "stool");

    let snapshot = store
        .remove_product(ProductPath { scene, space, placement, product: chair })
        .unwrap();
    let p = snapshot.placement(path).unwrap();
    assert_eq!(p.active_product, Some(stool));
    assert_invariant(&snapshot);
}

#[test]
fn remove_last_product_clears_active() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let chair = add_named_product(&mut store, path, "chair");

    let snapshot = store
        .remove_product(ProductPath { scene, space, placement, product: chair })
        .unwrap();
    assert_eq!(snapshot.placement(path).unwrap().active_product, None);
    assert_invariant(&snapshot);
}

#[test]
fn set_product_position_updates_logical_coords() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let chair = add_named_product(&mut store, path, "chair");
    let product_path = ProductPath { scene, space, placement, product: chair };

    let snapshot = store.set_product_position(product_path, Point::new(250.0, 175.0)).unwrap();
    let p = snapshot.product(product_path).unwrap();
    assert_eq!((p.x, p.y), (250.0, 175.0));
}

// =============================================================
// Reorder
// =============================================================

#[test]
fn reorder_product_moves_within_list() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let a = add_named_product(&mut store, path, "a");
    let b = add_named_product(&mut store, path, "b");
    let c = add_named_product(&mut store, path, "c");

    let snapshot = store
        .reorder_product(ProductPath { scene, space, placement, product: c }, 0)
        .unwrap();
    let order: Vec<_> = snapshot.placement(path).unwrap().products.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![c, a, b]);
    assert_invariant(&snapshot);
}

#[test]
fn reorder_space_clamps_index() {
    let (mut store, scene, space, _) = seeded_store();
    let (other, _) = store.create_space(scene, "window").unwrap();
    let snapshot = store.reorder_space(SpacePath { scene, space }, 99).unwrap();
    let order: Vec<_> = snapshot.scene(scene).unwrap().spaces.iter().map(|s| s.id).collect();
    assert_eq!(order, vec![other, space]);
}

// =============================================================
// Background measurement
// =============================================================

#[test]
fn background_size_is_fixed_once_measured() {
    let (mut store, scene, _, _) = seeded_store();
    store.set_scene_background_size(scene, Size::new(2000.0, 1000.0)).unwrap();
    let snapshot = store.set_scene_background_size(scene, Size::new(50.0, 50.0)).unwrap();
    assert_eq!(snapshot.scene(scene).unwrap().background_size, Some(Size::new(2000.0, 1000.0)));
}

// =============================================================
// Id reconciliation
// =============================================================

#[test]
fn reconcile_space_id_rewrites_in_place() {
    let (mut store, scene, space, placement) = seeded_store();
    let server = Uuid::new_v4();
    let snapshot = store.reconcile_space_id(SpacePath { scene, space }, server).unwrap();
    assert!(snapshot.space(SpacePath { scene, space }).is_none());
    let migrated = SpacePath { scene, space: server };
    assert!(snapshot.space(migrated).is_some());
    assert!(snapshot.placement(PlacementPath { scene, space: server, placement }).is_some());
}

#[test]
fn reconcile_product_id_follows_active_reference() {
    let (mut store, scene, space, placement) = seeded_store();
    let path = placement_path(scene, space, placement);
    let temp = add_named_product(&mut store, path, "chair");
    let server = Uuid::new_v4();

    let snapshot = store
        .reconcile_product_id(ProductPath { scene, space, placement, product: temp }, server)
        .unwrap();
    let p = snapshot.placement(path).unwrap();
    assert_eq!(p.active_product, Some(server));
    assert_invariant(&snapshot);
}

#[test]
fn reconcile_vanished_temp_id_fails_cleanly() {
    let (mut store, scene, space, _) = seeded_store();
    store.delete_space(SpacePath { scene, space }).unwrap();
    let err = store.reconcile_space_id(SpacePath { scene, space }, Uuid::new_v4()).unwrap_err();
    assert_eq!(err, StoreError::UnknownSpace(space));
}

// =============================================================
// Loading
// =============================================================

#[test]
fn load_scenes_normalizes_active_flags() {
    let mut store = HierarchyStore::new();
    let product_id = Uuid::new_v4();
    let scenes = vec![crate::model::Scene {
        id: Uuid::new_v4(),
        name: "loft".to_owned(),
        background: "assets/loft.jpg".to_owned(),
        background_size: None,
        tag: None,
        spaces: vec![crate::model::Space {
            id: Uuid::new_v4(),
            name: "main".to_owned(),
            background: None,
            background_size: None,
            placements: vec![crate::model::Placement {
                id: Uuid::new_v4(),
                name: "rug".to_owned(),
                visible: true,
                products: vec![crate::model::Product {
                    id: product_id,
                    name: "red".to_owned(),
                    image: "assets/red.png".to_owned(),
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                    active: false,
                }],
                // Wire data disagrees: no flag set, no reference.
                active_product: None,
            }],
        }],
    }];
    let snapshot = store.load_scenes(scenes);
    assert_invariant(&snapshot);
    let scene = &snapshot.scenes()[0];
    assert_eq!(scene.spaces[0].placements[0].active_product, Some(product_id));
}

#[test]
fn replace_space_keeps_path_identity() {
    let (mut store, scene, space, _) = seeded_store();
    let detail = crate::model::Space {
        id: Uuid::new_v4(), // payload id is ignored in favor of the path
        name: "corner detail".to_owned(),
        background: None,
        background_size: None,
        placements: Vec::new(),
    };
    let snapshot = store.replace_space(SpacePath { scene, space }, detail).unwrap();
    let got = snapshot.space(SpacePath { scene, space }).unwrap();
    assert_eq!(got.id, space);
    assert_eq!(got.name, "corner detail");
}

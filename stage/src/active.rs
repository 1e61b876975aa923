//! Active-image selection: the single-active-product-per-placement invariant.
//!
//! Both operations mutate one placement as a single atomic step — no caller
//! ever observes an intermediate state with zero or multiple active products
//! on a non-empty placement.

#[cfg(test)]
#[path = "active_test.rs"]
mod active_test;

use crate::model::{Placement, Product, ProductId};

/// Make `product_id` the placement's active product.
///
/// A non-member id is a stale reference, not user intent: the call is a
/// silent no-op. Switching to the already-active product is also a no-op.
/// Returns whether the placement changed.
pub fn set_active(placement: &mut Placement, product_id: ProductId) -> bool {
    if !placement.contains(product_id) {
        return false;
    }
    if placement.active_product == Some(product_id) {
        return false;
    }
    placement.active_product = Some(product_id);
    for product in &mut placement.products {
        product.active = product.id == product_id;
    }
    true
}

/// Remove `product_id` from the placement, returning the removed record.
///
/// If the removed product was active, the first remaining product becomes
/// active; if the list is now empty, the active reference clears to `None`.
pub fn remove_product(placement: &mut Placement, product_id: ProductId) -> Option<Product> {
    let index = placement.products.iter().position(|p| p.id == product_id)?;
    let removed = placement.products.remove(index);

    if placement.active_product == Some(product_id) {
        placement.active_product = placement.products.first().map(|p| p.id);
        let next = placement.active_product;
        for product in &mut placement.products {
            product.active = Some(product.id) == next;
        }
    }
    Some(removed)
}

/// Re-derive every product's `active` flag from the placement's reference.
///
/// Used when hydrating wire data whose flags may disagree with the
/// authoritative reference.
pub fn normalize(placement: &mut Placement) {
    let active = match placement.active_product {
        Some(id) if placement.contains(id) => Some(id),
        _ => placement.products.first().map(|p| p.id),
    };
    placement.active_product = active;
    for product in &mut placement.products {
        product.active = Some(product.id) == active;
    }
}

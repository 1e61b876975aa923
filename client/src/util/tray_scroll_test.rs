use super::*;

#[test]
fn latest_generation_wins() {
    assert!(is_latest(3, 3));
}

#[test]
fn superseded_generation_loses() {
    // More scroll events arrived while this settle check was sleeping.
    assert!(!is_latest(3, 7));
}

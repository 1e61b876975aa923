//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`scenes`, `editor`, `viewport`, `notify`) so
//! individual components can depend on small focused models. Each lives in
//! an `RwSignal` context provided by the root component; every mutation goes
//! through `update` so readers always observe a complete state.

pub mod editor;
pub mod notify;
pub mod scenes;
pub mod viewport;

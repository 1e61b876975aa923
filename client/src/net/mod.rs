//! Networking modules for the persistence collaborator.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls and `types` defines the shared wire schema. The
//! collaborator owns storage; this layer only speaks its contract — stable
//! string identifiers and logical coordinates.

pub mod api;
pub mod types;

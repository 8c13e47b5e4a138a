//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `editor`) so individual components can
//! depend on small focused models. Structs here are plain and synchronously
//! testable; reactivity comes from wrapping them in `RwSignal` at the
//! context layer.

pub mod auth;
pub mod editor;

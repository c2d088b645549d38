// systems/mod.rs
//
// Passes that run over the whole body table after configuration or a
// policy change. Per-frame propagation lives on the bodies themselves.

pub mod layout;

pub use layout::OrbitLayoutEngine;

//! Asset loading
//!
//! Scene file importers that turn external formats into stage objects.

pub mod gltf_loader;

pub use gltf_loader::{GltfError, GltfLoader};

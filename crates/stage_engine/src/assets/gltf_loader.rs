//! glTF scene loader
//!
//! Imports a glTF file as a flat list of stage objects. Every node in every
//! scene becomes one object; parent transforms are composed down the node
//! hierarchy so the recorded transforms are world-space.
//!
//! glTF is Y-up while the stage is Z-up, so the loader rotates everything
//! +90 degrees about the X axis on the way in, the same convention rotation
//! host-tool importers apply.

use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::stage::StageObject;

/// glTF import errors
#[derive(Error, Debug)]
pub enum GltfError {
    /// Scene file rejected by the glTF importer
    #[error("glTF import error: {0}")]
    Import(#[from] gltf::Error),
}

/// glTF scene loader
pub struct GltfLoader;

impl GltfLoader {
    /// Import a glTF file and return one stage object per node
    ///
    /// Buffers referenced by the file are resolved as part of the import, so
    /// a scene with dangling buffer URIs is rejected the way a host tool
    /// would reject it.
    pub fn load_objects<P: AsRef<Path>>(path: P) -> Result<Vec<StageObject>, GltfError> {
        let (document, _buffers, _images) = gltf::import(path)?;

        let convention = Self::up_axis_conversion();
        let mut objects = Vec::new();
        for scene in document.scenes() {
            for node in scene.nodes() {
                Self::collect(&node, &convention, &mut objects);
            }
        }
        Ok(objects)
    }

    /// The Y-up to Z-up convention rotation applied to imported scenes
    #[must_use]
    pub fn up_axis_conversion() -> Mat4 {
        Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2).to_homogeneous()
    }

    fn collect(node: &gltf::Node<'_>, parent: &Mat4, objects: &mut Vec<StageObject>) {
        let local = Self::node_matrix(node);
        let world = parent * local;

        let name = node
            .name()
            .map_or_else(|| format!("Node.{:03}", node.index()), str::to_owned);
        objects.push(StageObject::new(name, Transform::from_matrix(&world)));

        for child in node.children() {
            Self::collect(&child, &world, objects);
        }
    }

    fn node_matrix(node: &gltf::Node<'_>) -> Mat4 {
        let columns = node.transform().matrix();
        let flat: Vec<f64> = columns
            .iter()
            .flat_map(|column| column.iter().map(|v| f64::from(*v)))
            .collect();
        Mat4::from_column_slice(&flat)
    }
}

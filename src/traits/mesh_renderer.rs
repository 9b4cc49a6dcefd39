use crate::external::ExternalTrait;
use serde::{Deserialize, Serialize};
use crate::objects::ObjectId;
use crate::traits::Trait;
use crate::error::Result;

/// How the polygons of a mesh are rasterized.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PolygonMode {
	Point,
	Line,
	#[default]
	Fill,
}

/// One mesh drawn with one material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshMaterial {
	pub polygon_mode: PolygonMode,
	pub mesh: String,
	pub material: String,
}

/// A list of meshes to draw at the object's transform.
#[derive(Trait, Clone, Debug, Default)]
#[trait_index(2)]
pub struct MeshRenderer {
	object: ObjectId,
	data: Vec<MeshMaterial>,
}

impl MeshRenderer {
	pub fn data(&self) -> &[MeshMaterial] {
		&self.data
	}

	pub fn data_mut(&mut self) -> &mut Vec<MeshMaterial> {
		&mut self.data
	}

	/// Append a mesh drawn with `material` in [fill](PolygonMode::Fill) mode.
	pub fn push(&mut self, mesh: impl Into<String>, material: impl Into<String>) {
		self.data.push(MeshMaterial {
			polygon_mode: PolygonMode::Fill,
			mesh: mesh.into(),
			material: material.into(),
		});
	}

	/// Replace the mesh of an existing entry. Returns `false` if `index` is out of range.
	pub fn set_mesh_at(&mut self, index: usize, mesh: impl Into<String>) -> bool {
		match self.data.get_mut(index) {
			Some(entry) => {
				entry.mesh = mesh.into();
				true
			},
			None => false,
		}
	}

	/// Replace the material of an existing entry. Returns `false` if `index` is out of range.
	pub fn set_material_at(&mut self, index: usize, material: impl Into<String>) -> bool {
		match self.data.get_mut(index) {
			Some(entry) => {
				entry.material = material.into();
				true
			},
			None => false,
		}
	}

	pub fn set_polygon_mode_at(&mut self, index: usize, polygon_mode: PolygonMode) -> bool {
		match self.data.get_mut(index) {
			Some(entry) => {
				entry.polygon_mode = polygon_mode;
				true
			},
			None => false,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshMaterialRecord {
	pub mesh: String,
	pub material: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshRendererRecord {
	pub data: Vec<MeshMaterialRecord>,
}

impl ExternalTrait for MeshRenderer {
	type Record = MeshRendererRecord;

	fn to_external(&self) -> MeshRendererRecord {
		MeshRendererRecord {
			data: self
				.data
				.iter()
				.map(|entry| MeshMaterialRecord {
					mesh: entry.mesh.clone(),
					material: entry.material.clone(),
				})
				.collect(),
		}
	}

	/// Polygon modes are not persisted; every entry loads as [fill](PolygonMode::Fill).
	fn from_external(record: MeshRendererRecord, object: ObjectId) -> Result<Self> {
		let mut renderer = MeshRenderer {
			object,
			data: Vec::with_capacity(record.data.len()),
		};

		for entry in record.data {
			renderer.push(entry.mesh, entry.material);
		}
		Ok(renderer)
	}
}

use crate::external::{ExternalRef, ExternalTrait};
use crate::error::{Result, TraitSystemError};
use serde::{Deserialize, Serialize};
use crate::objects::ObjectId;
use crate::traits::Trait;
use serde::de::Error;

/// The geometry of a [Collider].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColliderShape {
	Plane { width: f32, height: f32 },
	Box { width: f32, height: f32, depth: f32 },
	Sphere { radius: f32 },
	Capsule { radius: f32, height: f32, density: f32 },
	ConvexMesh { width: f32, height: f32, depth: f32 },
	TriangleMesh { width: f32, height: f32, depth: f32 },
}

impl ColliderShape {
	/// The discriminant strings used by external records, in declaration order.
	pub const NAMES: [&'static str; 6] = [
		"ColliderShape_Plane",
		"ColliderShape_Box",
		"ColliderShape_Sphere",
		"ColliderShape_Capsule",
		"ColliderShape_ConvexMesh",
		"ColliderShape_TriangleMesh",
	];

	pub fn name(&self) -> &'static str {
		match self {
			ColliderShape::Plane { .. } => Self::NAMES[0],
			ColliderShape::Box { .. } => Self::NAMES[1],
			ColliderShape::Sphere { .. } => Self::NAMES[2],
			ColliderShape::Capsule { .. } => Self::NAMES[3],
			ColliderShape::ConvexMesh { .. } => Self::NAMES[4],
			ColliderShape::TriangleMesh { .. } => Self::NAMES[5],
		}
	}

	pub fn width(&self) -> Option<f32> {
		match *self {
			ColliderShape::Plane { width, .. }
			| ColliderShape::Box { width, .. }
			| ColliderShape::ConvexMesh { width, .. }
			| ColliderShape::TriangleMesh { width, .. } => Some(width),
			_ => None,
		}
	}

	pub fn height(&self) -> Option<f32> {
		match *self {
			ColliderShape::Plane { height, .. }
			| ColliderShape::Box { height, .. }
			| ColliderShape::Capsule { height, .. }
			| ColliderShape::ConvexMesh { height, .. }
			| ColliderShape::TriangleMesh { height, .. } => Some(height),
			ColliderShape::Sphere { .. } => None,
		}
	}

	pub fn depth(&self) -> Option<f32> {
		match *self {
			ColliderShape::Box { depth, .. }
			| ColliderShape::ConvexMesh { depth, .. }
			| ColliderShape::TriangleMesh { depth, .. } => Some(depth),
			_ => None,
		}
	}

	pub fn radius(&self) -> Option<f32> {
		match *self {
			ColliderShape::Sphere { radius } | ColliderShape::Capsule { radius, .. } => Some(radius),
			_ => None,
		}
	}

	pub fn density(&self) -> Option<f32> {
		match *self {
			ColliderShape::Capsule { density, .. } => Some(density),
			_ => None,
		}
	}
}

impl Default for ColliderShape {
	fn default() -> Self {
		ColliderShape::Box {
			width: 1.0,
			height: 1.0,
			depth: 1.0,
		}
	}
}

/// A physics collision shape.
#[derive(Trait, Clone, Debug, Default)]
#[trait_index(1)]
pub struct Collider {
	object: ObjectId,
	shape_ref: Option<ExternalRef>,
	shape: ColliderShape,
	name_ref: String,
}

impl Collider {
	pub fn shape(&self) -> &ColliderShape {
		&self.shape
	}

	pub fn set_shape(&mut self, shape: ColliderShape) {
		self.shape = shape;
	}

	/// The physics shape backing this collider, owned by the physics layer.
	pub fn shape_ref(&self) -> Option<ExternalRef> {
		self.shape_ref
	}

	pub fn set_shape_ref(&mut self, shape_ref: Option<ExternalRef>) {
		self.shape_ref = shape_ref;
	}

	/// The display name of the shape, or of the mesh it was cooked from.
	pub fn name_ref(&self) -> &str {
		&self.name_ref
	}

	pub fn set_name_ref(&mut self, name_ref: impl Into<String>) {
		self.name_ref = name_ref.into();
	}

	/// Set a dimension on shapes that have it. Returns `false` otherwise.
	pub fn set_width(&mut self, value: f32) -> bool {
		match &mut self.shape {
			ColliderShape::Plane { width, .. }
			| ColliderShape::Box { width, .. }
			| ColliderShape::ConvexMesh { width, .. }
			| ColliderShape::TriangleMesh { width, .. } => {
				*width = value;
				true
			},
			_ => false,
		}
	}

	pub fn set_height(&mut self, value: f32) -> bool {
		match &mut self.shape {
			ColliderShape::Plane { height, .. }
			| ColliderShape::Box { height, .. }
			| ColliderShape::Capsule { height, .. }
			| ColliderShape::ConvexMesh { height, .. }
			| ColliderShape::TriangleMesh { height, .. } => {
				*height = value;
				true
			},
			ColliderShape::Sphere { .. } => false,
		}
	}

	pub fn set_depth(&mut self, value: f32) -> bool {
		match &mut self.shape {
			ColliderShape::Box { depth, .. }
			| ColliderShape::ConvexMesh { depth, .. }
			| ColliderShape::TriangleMesh { depth, .. } => {
				*depth = value;
				true
			},
			_ => false,
		}
	}

	pub fn set_radius(&mut self, value: f32) -> bool {
		match &mut self.shape {
			ColliderShape::Sphere { radius } | ColliderShape::Capsule { radius, .. } => {
				*radius = value;
				true
			},
			_ => false,
		}
	}

	pub fn set_density(&mut self, value: f32) -> bool {
		match &mut self.shape {
			ColliderShape::Capsule { density, .. } => {
				*density = value;
				true
			},
			_ => false,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColliderRecord {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name_ref: Option<String>,
	pub shape_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub depth: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub radius: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub density: Option<f32>,
}

fn required(value: Option<f32>, field: &'static str) -> Result<f32> {
	value.ok_or_else(|| TraitSystemError::Malformed(serde_json::Error::missing_field(field)))
}

fn mesh_name(prefix: &str, name_ref: Option<String>) -> String {
	let name_ref = name_ref.unwrap_or_default();
	format!("{}{}", prefix, name_ref.strip_prefix(prefix).unwrap_or(name_ref.as_str()))
}

impl ExternalTrait for Collider {
	type Record = ColliderRecord;

	fn to_external(&self) -> ColliderRecord {
		ColliderRecord {
			name_ref: Some(self.name_ref.clone()),
			shape_type: self.shape.name().to_string(),
			width: self.shape.width(),
			height: self.shape.height(),
			depth: self.shape.depth(),
			radius: self.shape.radius(),
			density: self.shape.density(),
		}
	}

	/// Primitive shapes take their dimensions from the record. Mesh shapes are
	/// unit sized and are named after the mesh they are cooked from.
	fn from_external(record: ColliderRecord, object: ObjectId) -> Result<Self> {
		let (shape, name_ref) = match record.shape_type.as_str() {
			"ColliderShape_Plane" => (
				ColliderShape::Plane {
					width: required(record.width, "width")?,
					height: required(record.height, "height")?,
				},
				"PLANE".to_string(),
			),
			"ColliderShape_Box" => (
				ColliderShape::Box {
					width: required(record.width, "width")?,
					height: required(record.height, "height")?,
					depth: required(record.depth, "depth")?,
				},
				"CUBE".to_string(),
			),
			"ColliderShape_Sphere" => (
				ColliderShape::Sphere {
					radius: required(record.radius, "radius")?,
				},
				"SPHERE".to_string(),
			),
			"ColliderShape_Capsule" => (
				ColliderShape::Capsule {
					radius: required(record.radius, "radius")?,
					height: required(record.height, "height")?,
					density: required(record.density, "density")?,
				},
				"CAPSULE".to_string(),
			),
			"ColliderShape_ConvexMesh" => (
				ColliderShape::ConvexMesh {
					width: 1.0,
					height: 1.0,
					depth: 1.0,
				},
				mesh_name("(CONVEX) ", record.name_ref),
			),
			"ColliderShape_TriangleMesh" => (
				ColliderShape::TriangleMesh {
					width: 1.0,
					height: 1.0,
					depth: 1.0,
				},
				mesh_name("(TRIMESH) ", record.name_ref),
			),
			other => {
				log::error!("object {}: unhandled collider shape `{}`", object.value(), other);
				return Err(TraitSystemError::UnknownShape(other.to_string()));
			},
		};

		Ok(Collider {
			object,
			shape_ref: None,
			shape,
			name_ref,
		})
	}
}

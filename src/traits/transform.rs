use crate::external::ExternalTrait;
use serde::{Deserialize, Serialize};
use crate::objects::ObjectId;
use crate::traits::Trait;
use crate::error::Result;
use nalgebra_glm as glm;

/// The smallest scale a decomposed model matrix may report on any axis.
pub const MIN_SCALE: f32 = 0.001;

/// Position, orientation and scale of an object.
///
/// The component vectors and the model matrices are two views of the same
/// state. Writing the components and calling [`update_model`](Transform::update_model)
/// rebuilds the matrices; writing a matrix through [`set_model`](Transform::set_model)
/// marks the components stale, and they are recomputed from the scaled model
/// on the next read.
#[derive(Trait, Clone, Debug)]
#[trait_index(5)]
pub struct Transform {
	object: ObjectId,
	model: glm::Mat4,
	model_scaled: glm::Mat4,
	position: glm::Vec3,
	/// Euler angles, in degrees.
	rotation: glm::Vec3,
	scale: glm::Vec3,
	needs_physics_sync: bool,
	needs_components_sync: bool,
}

struct Components {
	position: glm::Vec3,
	rotation: glm::Vec3,
	scale: glm::Vec3,
	clamped: bool,
}

impl Transform {
	pub fn model(&self) -> &glm::Mat4 {
		&self.model
	}

	/// The model matrix with the scale applied.
	pub fn model_scaled(&self) -> &glm::Mat4 {
		&self.model_scaled
	}

	/// Replace the unscaled model matrix. The current scale is re-applied on top.
	pub fn set_model(&mut self, model: glm::Mat4) {
		self.model = model;
		self.model_scaled = glm::scale(&model, &self.scale);
		self.needs_components_sync = true;
	}

	/// Replace the scaled model matrix, deriving the unscaled one from the current scale.
	pub fn set_model_scaled(&mut self, model_scaled: glm::Mat4) {
		let inverse = glm::vec3(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
		self.model_scaled = model_scaled;
		self.model = glm::scale(&model_scaled, &inverse);
		self.needs_components_sync = true;
	}

	pub fn position(&self) -> glm::Vec3 {
		if self.needs_components_sync {
			self.decompose().position
		} else {
			self.position
		}
	}

	/// Euler angles, in degrees.
	pub fn rotation(&self) -> glm::Vec3 {
		if self.needs_components_sync {
			self.decompose().rotation
		} else {
			self.rotation
		}
	}

	pub fn scale(&self) -> glm::Vec3 {
		if self.needs_components_sync {
			self.decompose().scale
		} else {
			self.scale
		}
	}

	pub fn set_position(&mut self, position: glm::Vec3) {
		self.sync_components();
		self.position = position;
		self.update_model();
	}

	/// Set the euler angles, in degrees.
	pub fn set_rotation(&mut self, rotation: glm::Vec3) {
		self.sync_components();
		self.rotation = rotation;
		self.update_model();
	}

	pub fn set_scale(&mut self, scale: glm::Vec3) {
		self.sync_components();
		self.scale = scale;
		self.update_model();
	}

	/// Whether the physics layer still has to pick up a change.
	pub fn needs_physics_sync(&self) -> bool {
		self.needs_physics_sync
	}

	pub fn set_needs_physics_sync(&mut self, needs_physics_sync: bool) {
		self.needs_physics_sync = needs_physics_sync;
	}

	/// Whether the component vectors are stale relative to the model matrix.
	pub fn needs_components_sync(&self) -> bool {
		self.needs_components_sync
	}

	/// Recompute position, rotation and scale from the scaled model matrix if
	/// they are stale. A scale below [MIN_SCALE] is clamped and the scaled
	/// model rebuilt with it.
	pub fn sync_components(&mut self) {
		if !self.needs_components_sync {
			return;
		}

		let components = self.decompose();
		self.position = components.position;
		self.rotation = components.rotation;
		self.scale = components.scale;
		self.needs_components_sync = false;

		if components.clamped {
			self.model_scaled = glm::scale(&self.model, &self.scale);
		}
	}

	/// Rebuild both model matrices from the component vectors.
	pub fn update_model(&mut self) {
		let model = glm::translate(&glm::Mat4::identity(), &self.position);
		let model = glm::rotate(&model, self.rotation.x.to_radians(), &glm::vec3(1.0, 0.0, 0.0));
		let model = glm::rotate(&model, self.rotation.y.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
		let model = glm::rotate(&model, self.rotation.z.to_radians(), &glm::vec3(0.0, 0.0, 1.0));

		self.model = model;
		self.model_scaled = glm::scale(&model, &self.scale);
		self.needs_components_sync = false;
	}

	fn decompose(&self) -> Components {
		let m = &self.model_scaled;
		let position = glm::vec3(m[(0, 3)], m[(1, 3)], m[(2, 3)]);

		let columns = [
			glm::vec3(m[(0, 0)], m[(1, 0)], m[(2, 0)]),
			glm::vec3(m[(0, 1)], m[(1, 1)], m[(2, 1)]),
			glm::vec3(m[(0, 2)], m[(1, 2)], m[(2, 2)]),
		];

		let lengths = glm::vec3(columns[0].norm(), columns[1].norm(), columns[2].norm());
		let axis = |column: usize, row: usize| {
			if lengths[column] > f32::EPSILON {
				columns[column][row] / lengths[column]
			} else {
				0.0
			}
		};

		// The model is T * Rx * Ry * Rz.
		let rotation = glm::vec3(
			f32::atan2(-axis(2, 1), axis(2, 2)).to_degrees(),
			axis(2, 0).clamp(-1.0, 1.0).asin().to_degrees(),
			f32::atan2(-axis(1, 0), axis(0, 0)).to_degrees(),
		);

		let scale = glm::vec3(lengths.x.max(MIN_SCALE), lengths.y.max(MIN_SCALE), lengths.z.max(MIN_SCALE));
		let clamped = scale != lengths;

		Components {
			position,
			rotation,
			scale,
			clamped,
		}
	}
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			object: ObjectId::NONE,
			model: glm::Mat4::identity(),
			model_scaled: glm::Mat4::identity(),
			position: glm::Vec3::zeros(),
			rotation: glm::Vec3::zeros(),
			scale: glm::vec3(1.0, 1.0, 1.0),
			needs_physics_sync: false,
			needs_components_sync: false,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
	pub position: [f32; 3],
	pub rotation: [f32; 3],
	pub scale: [f32; 3],
}

impl ExternalTrait for Transform {
	type Record = TransformRecord;

	fn to_external(&self) -> TransformRecord {
		TransformRecord {
			position: self.position().into(),
			rotation: self.rotation().into(),
			scale: self.scale().into(),
		}
	}

	/// A loaded transform is flagged for the physics layer to pick up.
	fn from_external(record: TransformRecord, object: ObjectId) -> Result<Self> {
		let mut transform = Transform {
			object,
			position: record.position.into(),
			rotation: record.rotation.into(),
			scale: record.scale.into(),
			..Transform::default()
		};

		transform.update_model();
		transform.needs_physics_sync = true;
		Ok(transform)
	}
}

use crate::external::{ExternalRef, ExternalTrait};
use serde::{Deserialize, Serialize};
use crate::objects::ObjectId;
use crate::traits::Trait;
use crate::error::Result;
use nalgebra_glm as glm;

/// A simulated physics body.
#[derive(Trait, Clone, Debug)]
#[trait_index(3)]
pub struct Rigidbody {
	object: ObjectId,
	rigidbody_ref: Option<ExternalRef>,
	linear_velocity: glm::Vec3,
	linear_damping: f32,
	angular_velocity: glm::Vec3,
	angular_damping: f32,
	mass: f32,
	lock_linear: [bool; 3],
	lock_angular: [bool; 3],
	is_static: bool,
	is_trigger: bool,
}

impl Rigidbody {
	/// The body in the physics layer, if it has been created.
	pub fn rigidbody_ref(&self) -> Option<ExternalRef> {
		self.rigidbody_ref
	}

	pub fn set_rigidbody_ref(&mut self, rigidbody_ref: Option<ExternalRef>) {
		self.rigidbody_ref = rigidbody_ref;
	}

	pub fn linear_velocity(&self) -> &glm::Vec3 {
		&self.linear_velocity
	}

	pub fn linear_velocity_mut(&mut self) -> &mut glm::Vec3 {
		&mut self.linear_velocity
	}

	pub fn linear_damping(&self) -> f32 {
		self.linear_damping
	}

	pub fn set_linear_damping(&mut self, damping: f32) {
		self.linear_damping = damping;
	}

	pub fn angular_velocity(&self) -> &glm::Vec3 {
		&self.angular_velocity
	}

	pub fn angular_velocity_mut(&mut self) -> &mut glm::Vec3 {
		&mut self.angular_velocity
	}

	pub fn angular_damping(&self) -> f32 {
		self.angular_damping
	}

	pub fn set_angular_damping(&mut self, damping: f32) {
		self.angular_damping = damping;
	}

	pub fn mass(&self) -> f32 {
		self.mass
	}

	pub fn set_mass(&mut self, mass: f32) {
		self.mass = mass;
	}

	/// Per-axis linear locks, x, y, z.
	pub fn lock_linear(&self) -> [bool; 3] {
		self.lock_linear
	}

	pub fn lock_linear_mut(&mut self) -> &mut [bool; 3] {
		&mut self.lock_linear
	}

	/// Per-axis angular locks, x, y, z.
	pub fn lock_angular(&self) -> [bool; 3] {
		self.lock_angular
	}

	pub fn lock_angular_mut(&mut self) -> &mut [bool; 3] {
		&mut self.lock_angular
	}

	pub fn is_static(&self) -> bool {
		self.is_static
	}

	pub fn set_static(&mut self, is_static: bool) {
		self.is_static = is_static;
	}

	pub fn is_trigger(&self) -> bool {
		self.is_trigger
	}

	pub fn set_trigger(&mut self, is_trigger: bool) {
		self.is_trigger = is_trigger;
	}
}

impl Default for Rigidbody {
	fn default() -> Self {
		Self {
			object: ObjectId::NONE,
			rigidbody_ref: None,
			linear_velocity: glm::Vec3::zeros(),
			linear_damping: 1.0,
			angular_velocity: glm::Vec3::zeros(),
			angular_damping: 1.0,
			mass: 1.0,
			lock_linear: [false; 3],
			lock_angular: [false; 3],
			is_static: false,
			is_trigger: false,
		}
	}
}

/// Every field is optional; missing ones take the [Rigidbody] defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RigidbodyRecord {
	pub linear_velocity: Option<[f32; 3]>,
	pub linear_damping: Option<f32>,
	pub angular_velocity: Option<[f32; 3]>,
	pub angular_damping: Option<f32>,
	pub mass: Option<f32>,
	pub lock_linear_x: Option<bool>,
	pub lock_linear_y: Option<bool>,
	pub lock_linear_z: Option<bool>,
	pub lock_angular_x: Option<bool>,
	pub lock_angular_y: Option<bool>,
	pub lock_angular_z: Option<bool>,
	#[serde(rename = "static")]
	pub is_static: Option<bool>,
	#[serde(rename = "trigger")]
	pub is_trigger: Option<bool>,
}

impl ExternalTrait for Rigidbody {
	type Record = RigidbodyRecord;

	fn to_external(&self) -> RigidbodyRecord {
		RigidbodyRecord {
			linear_velocity: Some(self.linear_velocity.into()),
			linear_damping: Some(self.linear_damping),
			angular_velocity: Some(self.angular_velocity.into()),
			angular_damping: Some(self.angular_damping),
			mass: Some(self.mass),
			lock_linear_x: Some(self.lock_linear[0]),
			lock_linear_y: Some(self.lock_linear[1]),
			lock_linear_z: Some(self.lock_linear[2]),
			lock_angular_x: Some(self.lock_angular[0]),
			lock_angular_y: Some(self.lock_angular[1]),
			lock_angular_z: Some(self.lock_angular[2]),
			is_static: Some(self.is_static),
			is_trigger: Some(self.is_trigger),
		}
	}

	fn from_external(record: RigidbodyRecord, object: ObjectId) -> Result<Self> {
		let defaults = Rigidbody::default();
		Ok(Rigidbody {
			object,
			rigidbody_ref: None,
			linear_velocity: record.linear_velocity.map_or(defaults.linear_velocity, Into::into),
			linear_damping: record.linear_damping.unwrap_or(defaults.linear_damping),
			angular_velocity: record.angular_velocity.map_or(defaults.angular_velocity, Into::into),
			angular_damping: record.angular_damping.unwrap_or(defaults.angular_damping),
			mass: record.mass.unwrap_or(defaults.mass),
			lock_linear: [
				record.lock_linear_x.unwrap_or_default(),
				record.lock_linear_y.unwrap_or_default(),
				record.lock_linear_z.unwrap_or_default(),
			],
			lock_angular: [
				record.lock_angular_x.unwrap_or_default(),
				record.lock_angular_y.unwrap_or_default(),
				record.lock_angular_z.unwrap_or_default(),
			],
			is_static: record.is_static.unwrap_or_default(),
			is_trigger: record.is_trigger.unwrap_or_default(),
		})
	}
}

use crate::external::{ExternalRef, ExternalTrait};
use serde::{Deserialize, Serialize};
use crate::objects::ObjectId;
use crate::traits::Trait;
use crate::error::Result;

/// The wheels of a [VehicleChasis], each one an object of its own.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct VehicleWheels {
	pub front_right: ObjectId,
	pub front_left: ObjectId,
	pub back_right: ObjectId,
	pub back_left: ObjectId,
}

/// A drivable vehicle body and its controls.
#[derive(Trait, Clone, Debug, Default)]
#[trait_index(6)]
pub struct VehicleChasis {
	object: ObjectId,
	vehicle_ref: Option<ExternalRef>,
	wheels: VehicleWheels,
	vehicle_index: usize,
	acceleration_pedal: bool,
	brake_pedal: bool,
	right_steer: bool,
	left_steer: bool,
}

impl VehicleChasis {
	pub fn vehicle_ref(&self) -> Option<ExternalRef> {
		self.vehicle_ref
	}

	pub fn set_vehicle_ref(&mut self, vehicle_ref: Option<ExternalRef>, vehicle_index: usize) {
		self.vehicle_ref = vehicle_ref;
		self.vehicle_index = vehicle_index;
	}

	pub fn wheels(&self) -> &VehicleWheels {
		&self.wheels
	}

	pub fn set_wheels(&mut self, wheels: VehicleWheels) {
		self.wheels = wheels;
	}

	/// The index of the vehicle in the physics layer.
	pub fn vehicle_index(&self) -> usize {
		self.vehicle_index
	}

	pub fn acceleration_pedal(&self) -> bool {
		self.acceleration_pedal
	}

	pub fn set_acceleration_pedal(&mut self, pressed: bool) {
		self.acceleration_pedal = pressed;
	}

	pub fn brake_pedal(&self) -> bool {
		self.brake_pedal
	}

	pub fn set_brake_pedal(&mut self, pressed: bool) {
		self.brake_pedal = pressed;
	}

	pub fn right_steer(&self) -> bool {
		self.right_steer
	}

	pub fn set_right_steer(&mut self, steering: bool) {
		self.right_steer = steering;
	}

	pub fn left_steer(&self) -> bool {
		self.left_steer
	}

	pub fn set_left_steer(&mut self, steering: bool) {
		self.left_steer = steering;
	}

	/// Release both pedals and the steering.
	pub fn release_controls(&mut self) {
		self.acceleration_pedal = false;
		self.brake_pedal = false;
		self.right_steer = false;
		self.left_steer = false;
	}
}

/// Vehicles are rebuilt by the physics layer, so nothing but the tag is stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleChasisRecord {}

impl ExternalTrait for VehicleChasis {
	type Record = VehicleChasisRecord;

	fn to_external(&self) -> VehicleChasisRecord {
		VehicleChasisRecord {}
	}

	fn from_external(_: VehicleChasisRecord, object: ObjectId) -> Result<Self> {
		Ok(VehicleChasis {
			object,
			..VehicleChasis::default()
		})
	}
}

use crate::external::ExternalTrait;
use serde::{Deserialize, Serialize};
use crate::objects::ObjectId;
use crate::traits::Trait;
use crate::error::Result;
use nalgebra_glm as glm;

const PITCH_LIMIT: f32 = 80.0;

/// A perspective camera, either free-look or orbiting around its position.
#[derive(Trait, Clone, Debug)]
#[trait_index(0)]
pub struct Camera {
	object: ObjectId,
	view_matrix: glm::Mat4,
	projection_matrix: glm::Mat4,
	rotation_quat: glm::Quat,
	position: glm::Vec3,
	linear_velocity: glm::Vec3,
	linear_rotation: glm::Vec2,
	interpolation_time: f32,
	/// Pitch and yaw, in degrees.
	rotation: glm::Vec2,
	look_sensitivity: f32,
	move_sensitivity: f32,
	resolution: glm::Vec2,
	fov: f32,
	aspect_ratio: f32,
	near: f32,
	far: f32,
	orbital: bool,
}

impl Camera {
	pub fn view_matrix(&self) -> &glm::Mat4 {
		&self.view_matrix
	}

	pub fn projection_matrix(&self) -> &glm::Mat4 {
		&self.projection_matrix
	}

	pub fn rotation_quat(&self) -> &glm::Quat {
		&self.rotation_quat
	}

	pub fn position(&self) -> &glm::Vec3 {
		&self.position
	}

	pub fn set_position(&mut self, position: glm::Vec3) {
		self.position = position;
	}

	pub fn linear_velocity(&self) -> &glm::Vec3 {
		&self.linear_velocity
	}

	pub fn linear_rotation(&self) -> &glm::Vec2 {
		&self.linear_rotation
	}

	pub fn interpolation_time(&self) -> f32 {
		self.interpolation_time
	}

	/// Pitch and yaw, in degrees.
	pub fn rotation(&self) -> &glm::Vec2 {
		&self.rotation
	}

	/// Set pitch and yaw, in degrees, and rebuild the orientation.
	///
	/// Pitch is clamped to ±80° and yaw wraps around at 360°.
	pub fn set_rotation(&mut self, rotation: glm::Vec2) {
		self.rotation = glm::vec2(rotation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT), rotation.y % 360.0);
		self.rotation_quat = orientation(&self.rotation);
		self.linear_rotation = glm::Vec2::zeros();
		self.interpolation_time = 1.0;
	}

	pub fn look_sensitivity(&self) -> f32 {
		self.look_sensitivity
	}

	pub fn set_look_sensitivity(&mut self, sensitivity: f32) {
		self.look_sensitivity = sensitivity;
	}

	pub fn move_sensitivity(&self) -> f32 {
		self.move_sensitivity
	}

	pub fn set_move_sensitivity(&mut self, sensitivity: f32) {
		self.move_sensitivity = sensitivity;
	}

	pub fn resolution(&self) -> &glm::Vec2 {
		&self.resolution
	}

	/// Set the viewport size, updating the aspect ratio and projection.
	/// A zero-sized viewport is ignored.
	pub fn set_resolution(&mut self, width: f32, height: f32) {
		if width <= 0.0 || height <= 0.0 {
			return;
		}

		self.resolution = glm::vec2(width, height);
		self.aspect_ratio = width / height;
		self.update_projection();
	}

	/// The vertical field of view, in degrees.
	pub fn fov(&self) -> f32 {
		self.fov
	}

	pub fn set_fov(&mut self, fov: f32) {
		self.fov = fov;
		self.update_projection();
	}

	pub fn aspect_ratio(&self) -> f32 {
		self.aspect_ratio
	}

	pub fn near(&self) -> f32 {
		self.near
	}

	pub fn set_near(&mut self, near: f32) {
		self.near = near;
		self.update_projection();
	}

	pub fn far(&self) -> f32 {
		self.far
	}

	pub fn set_far(&mut self, far: f32) {
		self.far = far;
		self.update_projection();
	}

	pub fn orbital(&self) -> bool {
		self.orbital
	}

	pub fn set_orbital(&mut self, orbital: bool) {
		self.orbital = orbital;
	}

	/// Rebuild the projection matrix from the fov, aspect ratio and clip planes.
	pub fn update_projection(&mut self) {
		self.projection_matrix = glm::perspective(self.aspect_ratio, self.fov.to_radians(), self.near, self.far);
	}

	/// Rebuild the view matrix from the position and orientation.
	///
	/// A free-look camera rotates around its own position; an orbital camera
	/// rotates the world around the origin and then moves away from it.
	pub fn update_view(&mut self) {
		let translation = glm::translation(&-self.position);
		let rotation = glm::transpose(&glm::quat_to_mat4(&self.rotation_quat));

		self.view_matrix = if self.orbital {
			translation * rotation
		} else {
			rotation * translation
		};
	}
}

fn orientation(rotation: &glm::Vec2) -> glm::Quat {
	let yaw = glm::quat_angle_axis(rotation.y.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
	let pitch = glm::quat_angle_axis(rotation.x.to_radians(), &glm::vec3(1.0, 0.0, 0.0));
	yaw * pitch
}

impl Default for Camera {
	fn default() -> Self {
		let mut camera = Self {
			object: ObjectId::NONE,
			view_matrix: glm::Mat4::identity(),
			projection_matrix: glm::Mat4::identity(),
			rotation_quat: glm::quat_identity(),
			position: glm::Vec3::zeros(),
			linear_velocity: glm::Vec3::zeros(),
			linear_rotation: glm::Vec2::zeros(),
			interpolation_time: 1.0,
			rotation: glm::Vec2::zeros(),
			look_sensitivity: 0.01,
			move_sensitivity: 0.03,
			resolution: glm::vec2(1.0, 1.0),
			fov: 45.0,
			aspect_ratio: 1.0,
			near: 0.01,
			far: 1000.0,
			orbital: false,
		};

		camera.update_projection();
		camera.update_view();
		camera
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraRecord {
	pub fov: f32,
	pub near: f32,
	pub far: f32,
	pub look_sensitivity: f32,
	pub move_sensitivity: f32,
	pub position: [f32; 3],
	pub rotation: [f32; 2],
	pub orbital: bool,
}

impl ExternalTrait for Camera {
	type Record = CameraRecord;

	fn to_external(&self) -> CameraRecord {
		CameraRecord {
			fov: self.fov,
			near: self.near,
			far: self.far,
			look_sensitivity: self.look_sensitivity,
			move_sensitivity: self.move_sensitivity,
			position: self.position.into(),
			rotation: self.rotation.into(),
			orbital: self.orbital,
		}
	}

	/// Motion state (velocity, pending rotation) starts at rest.
	fn from_external(record: CameraRecord, object: ObjectId) -> Result<Self> {
		let mut camera = Camera {
			object,
			fov: record.fov,
			near: record.near,
			far: record.far,
			look_sensitivity: record.look_sensitivity,
			move_sensitivity: record.move_sensitivity,
			position: record.position.into(),
			orbital: record.orbital,
			..Camera::default()
		};

		camera.set_rotation(record.rotation.into());
		camera.update_projection();
		camera.update_view();
		Ok(camera)
	}
}

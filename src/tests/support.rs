use crate::components::Component;

#[derive(Copy, Clone, Debug, Default, PartialEq, Component)]
pub struct Position {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Component)]
pub struct Velocity {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Component)]
pub struct Shape {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Component)]
pub struct Brain {
	pub age: u32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Component)]
pub struct Inspect;

impl Position {
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}
}

impl Velocity {
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}
}

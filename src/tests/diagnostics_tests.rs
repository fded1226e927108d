use crate::tests::support::{Brain, Inspect, Position, Shape};
use crate::components::Signature;
use crate::{World, WorldConfig};

fn world() -> World {
	World::with_config(WorldConfig::new().with_capacity(1000)).unwrap()
}

#[test]
pub fn inspect_live_entity() {
	let mut world = world();
	let entity = world.create_entity().unwrap();
	world.assign(entity, Position::new(1.0, 0.0, 0.0)).unwrap();
	world.assign(entity, Brain { age: 2 }).unwrap();

	let dump = world.inspect(entity);
	assert!(dump.alive);
	assert_eq!(dump.tags.bits(), 0b11);
	assert_eq!(dump.components.len(), 2);
	assert_eq!(dump.component("Brain").unwrap().value, "Brain { age: 2 }");
	assert_eq!(dump.component("Shape"), None);

	assert_eq!(
		dump.to_string(),
		"Entity{0:0 00000011}\n\t|Position { x: 1.0, y: 0.0, z: 0.0 }\n\t|Brain { age: 2 }\n\t*----------\n"
	);
}

#[test]
pub fn inspect_dead_entity() {
	let mut world = world();
	let entity = world.create_entity().unwrap();
	world.assign(entity, Inspect).unwrap();
	world.destroy_entity(entity);

	let dump = world.inspect(entity);
	assert!(!dump.alive);
	assert!(dump.components.is_empty(), "Dead entities carry nothing");
	assert_eq!(dump.tags, Signature::EMPTY);
	assert_eq!(dump.to_string(), "Entity{0:0} dead\n");
}

#[test]
pub fn stats_report_occupancy() {
	let mut world = world();
	let position = world.signature::<(Position,)>().unwrap();
	world.register_component::<Shape>().unwrap();
	world.register_system("Track", position, |_, _| {});

	for i in 0..10 {
		let e = world.create_entity().unwrap();
		world.assign(e, Position::default()).unwrap();
		if i < 3 {
			world.assign(e, Shape::default()).unwrap();
		}
		if i == 9 {
			world.destroy_entity(e);
		}
	}
	world.tick().unwrap();

	let stats = world.stats();
	assert_eq!(stats.entities.capacity, 1000);
	assert_eq!(stats.entities.slots, 10);
	assert_eq!(stats.entities.live, 9);
	assert_eq!(stats.entities.free, 1);
	assert_eq!(stats.ticks, 1);

	assert_eq!(stats.pools.len(), 2);
	assert_eq!(stats.pools[0].name, "Position");
	assert_eq!(stats.pools[0].occupancy, 9, "Destroyed entities do not count");
	assert_eq!(stats.pools[0].total_bytes, 1000 * 24);
	assert_eq!(stats.pools[1].name, "Shape");
	assert_eq!(stats.pools[1].occupancy, 3);
	assert_eq!(stats.total_bytes(), 1000 * 24 + 1000 * 3);

	assert_eq!(stats.systems.len(), 1);
	assert_eq!(stats.systems[0].to_string(), "System{Track 00000001}");
	assert_eq!(stats.pools[0].to_string(), "ComponentPool{Position 0.0MB 00000001}");
	assert_eq!(stats.pools[1].to_string(), "ComponentPool{Shape 0.0MB 00000010}");
}

#[test]
pub fn stats_display_lists_everything() {
	let mut world = World::with_config(WorldConfig::new().with_capacity(100_000)).unwrap();
	world.register_component::<Position>().unwrap();
	world.create_entity().unwrap();

	let text = world.stats().to_string();
	let lines = text.lines().collect::<Vec<_>>();
	assert_eq!(
		lines,
		vec![
			"Entities{1 live 0 free 1 slots / 100000}",
			"ComponentPool{Position 2.4MB 00000001}",
			"Ticks{0}",
		]
	);
}

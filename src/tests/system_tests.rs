use crate::tests::support::{Brain, Position, Shape, Velocity};
use crate::systems::{CommandBuffer, FnSystem, System, SystemContext, SystemRegistry};
use crate::components::{ComponentStore, Signature};
use crate::entities::{EntityId, EntityRegistry};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(&'static str, EntityId)>>>;

struct Recorder {
	name: &'static str,
	signature: Signature,
	log: Log,
}

impl System for Recorder {
	fn name(&self) -> &str {
		self.name
	}

	fn signature(&self) -> Signature {
		self.signature
	}

	fn run(&mut self, entity: EntityId, _: &mut SystemContext<'_>) {
		self.log.borrow_mut().push((self.name, entity));
	}
}

struct Fixture {
	entities: EntityRegistry,
	components: ComponentStore,
	systems: SystemRegistry,
	commands: CommandBuffer,
}

impl Fixture {
	fn new(capacity: usize) -> Self {
		Self {
			entities: EntityRegistry::with_capacity(capacity),
			components: ComponentStore::with_capacity(capacity),
			systems: SystemRegistry::new(),
			commands: CommandBuffer::new(),
		}
	}

	fn spawn(&mut self) -> EntityId {
		self.entities.create().unwrap()
	}

	fn tick(&mut self) -> (usize, usize) {
		let visits = self.systems.run_tick(&self.entities, &mut self.components, &mut self.commands);
		let applied = self.commands.apply(&mut self.entities, &mut self.components).unwrap();
		(visits, applied)
	}
}

#[test]
pub fn systems_run_in_registration_order() {
	let mut fx = Fixture::new(8);
	let position = fx.components.signature_of::<(Position,)>().unwrap();
	let position_shape = fx.components.signature_of::<(Position, Shape)>().unwrap();

	let plain = fx.spawn();
	let shaped = fx.spawn();
	fx.components.assign(&mut fx.entities, plain, Position::default()).unwrap();
	fx.components.assign(&mut fx.entities, shaped, Position::default()).unwrap();
	fx.components.assign(&mut fx.entities, shaped, Shape::default()).unwrap();

	let log = Log::default();
	fx.systems.add(Recorder {
		name: "S1",
		signature: position,
		log: log.clone(),
	});
	fx.systems.add(Recorder {
		name: "S2",
		signature: position_shape,
		log: log.clone(),
	});

	let (visits, _) = fx.tick();
	assert_eq!(visits, 3);
	assert_eq!(
		*log.borrow(),
		vec![("S1", plain), ("S1", shaped), ("S2", shaped)],
		"Each system should finish its pass before the next one starts"
	);
}

#[test]
pub fn duplicate_systems_each_run() {
	let mut fx = Fixture::new(4);
	let entity = fx.spawn();
	fx.components.assign(&mut fx.entities, entity, Brain::default()).unwrap();
	let brain = fx.components.signature_of::<(Brain,)>().unwrap();

	let age = |e: EntityId, ctx: &mut SystemContext<'_>| {
		if let Some(brain) = ctx.get_mut::<Brain>(e) {
			brain.age += 1;
		}
	};
	fx.systems.add(FnSystem::new("Aging", brain, age));
	fx.systems.add(FnSystem::new("Aging", brain, age));

	assert_eq!(fx.systems.len(), 2);
	fx.tick();
	assert_eq!(fx.components.get::<Brain>(&fx.entities, entity).unwrap().age, 2);
}

#[test]
pub fn structural_changes_wait_for_the_end_of_the_tick() {
	let mut fx = Fixture::new(8);
	let position = fx.components.signature_of::<(Position,)>().unwrap();
	let first = fx.spawn();
	let second = fx.spawn();
	fx.components.assign(&mut fx.entities, first, Position::default()).unwrap();
	fx.components.assign(&mut fx.entities, second, Position::default()).unwrap();

	let seen = Rc::new(RefCell::new(Vec::new()));
	let seen_by_handler = seen.clone();
	fx.systems.add(FnSystem::new("Reaper", position, move |e, ctx| {
		seen_by_handler.borrow_mut().push(e);
		ctx.destroy(e);
		ctx.create(|builder| {
			builder.assign(Position::new(5.0, 0.0, 0.0))?;
			Ok(())
		});
		assert!(ctx.is_alive(e), "Destruction must not happen mid-pass");
	}));

	let (visits, applied) = fx.tick();
	assert_eq!(visits, 2, "Entities created by the pass must not be visited in the same tick");
	assert_eq!(applied, 4);
	assert_eq!(*seen.borrow(), vec![first, second]);
	assert!(!fx.entities.is_alive(first));
	assert!(!fx.entities.is_alive(second));

	let spawned = fx.entities.view(position).collect::<Vec<_>>();
	assert_eq!(spawned.len(), 2);
	for entity in spawned {
		assert_eq!(fx.components.get::<Position>(&fx.entities, entity).unwrap().x, 5.0);
	}
}

#[test]
pub fn deferred_assign_and_remove() {
	let mut fx = Fixture::new(8);
	let position = fx.components.signature_of::<(Position,)>().unwrap();
	fx.components.register::<Velocity>().unwrap();
	let entity = fx.spawn();
	fx.components.assign(&mut fx.entities, entity, Position::default()).unwrap();
	fx.components.assign(&mut fx.entities, entity, Velocity::default()).unwrap();

	fx.systems.add(FnSystem::new("Swap", position, |e, ctx| {
		ctx.assign(e, Shape { r: 255, g: 0, b: 0 });
		ctx.remove::<Velocity>(e);
		ctx.remove::<Brain>(e);
		assert!(!ctx.has::<Shape>(e), "The shape is only queued");
		assert!(ctx.has::<Velocity>(e), "The removal is only queued");
		assert_eq!(ctx.pending(), 2, "Removing a kind that was never registered queues nothing");
	}));

	let (_, applied) = fx.tick();
	assert_eq!(applied, 2);
	assert_eq!(fx.components.get::<Shape>(&fx.entities, entity), Some(&Shape { r: 255, g: 0, b: 0 }));
	assert!(!fx.components.has::<Velocity>(&fx.entities, entity));
}

#[test]
pub fn commands_on_dead_entities_are_skipped() {
	let mut entities = EntityRegistry::with_capacity(4);
	let mut components = ComponentStore::with_capacity(4);
	let mut commands = CommandBuffer::new();
	let entity = entities.create().unwrap();

	commands.destroy(entity);
	commands.assign(entity, Brain { age: 1 });
	commands.destroy(entity);
	assert_eq!(commands.len(), 3);

	assert_eq!(commands.apply(&mut entities, &mut components), Ok(1), "Only the first destroy takes effect");
	assert!(commands.is_empty(), "Applying drains the buffer");
	assert_eq!(entities.live_count(), 0);
}

#[test]
pub fn handlers_read_other_entities() {
	let mut fx = Fixture::new(8);
	let brain = fx.components.signature_of::<(Brain,)>().unwrap();
	let target = fx.spawn();
	let leader = fx.spawn();
	fx.components.assign(&mut fx.entities, target, Position::new(3.0, 0.0, 0.0)).unwrap();
	fx.components.assign(&mut fx.entities, leader, Brain::default()).unwrap();

	fx.systems.add(FnSystem::new("Follow", brain, move |e, ctx| {
		let x = ctx.get::<Position>(target).map(|p| p.x).unwrap_or_default();
		let tracked = ctx.view(Signature::EMPTY).count() as u32;
		if let Some(brain) = ctx.get_mut::<Brain>(e) {
			brain.age = x as u32 + tracked;
		}
	}));

	fx.tick();
	assert_eq!(fx.components.get::<Brain>(&fx.entities, leader).unwrap().age, 5);
}

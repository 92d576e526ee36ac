//! InteractionSystem - drives interactables from the host loop

use crate::interactable::{FrameContext, InteractionState, Lifecycle, StartContext};
use crate::prompt::PromptCanvas;
use glint_core::EntityId;
use glint_ecs::GlintWorld;
use glint_runtime::{EventBus, GameEvent};
use tracing::{debug, info};

/// Owns every interactable in a scene.
///
/// Per frame the host should call `handle_event` for each trigger event,
/// then `tick`, then `draw`. Interaction transitions come out of `event_bus`.
pub struct InteractionSystem {
    objects: Vec<Box<dyn Lifecycle>>,
    /// How many objects (from the front of `objects`) have had `on_start`
    started: usize,
    pub event_bus: EventBus,
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionSystem {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            started: 0,
            event_bus: EventBus::new(),
        }
    }

    /// Add an object. It is started by the next `start` call.
    pub fn register(&mut self, object: Box<dyn Lifecycle>) {
        debug!(entity = %object.entity(), "registered interactable");
        self.objects.push(object);
    }

    /// Run `on_start` on every object that has not been started yet
    pub fn start(&mut self, ctx: &StartContext<'_>) {
        for object in &mut self.objects[self.started..] {
            object.on_start(ctx);
        }
        if self.objects.len() > self.started {
            info!(count = self.objects.len() - self.started, "interactables started");
        }
        self.started = self.objects.len();
    }

    /// Route a trigger event to the interactable that owns the trigger volume.
    ///
    /// The owner is the trigger's entity itself, or its nearest ancestor that
    /// is a registered interactable. Other events are ignored.
    pub fn handle_event(&mut self, world: &GlintWorld, event: &GameEvent) {
        match event {
            GameEvent::TriggerEntered { trigger, other } => {
                if let Some(object) = self.owner_of(world, *trigger) {
                    object.on_trigger_enter(*other);
                }
            }
            GameEvent::TriggerExited { trigger, other } => {
                if let Some(object) = self.owner_of(world, *trigger) {
                    object.on_trigger_exit(*other);
                }
            }
            _ => {}
        }
    }

    /// Tick every started object, reporting interaction transitions
    pub fn tick(&mut self, frame: &mut FrameContext<'_>) {
        for object in &mut self.objects[..self.started] {
            let before = object.state();
            object.on_tick(frame);
            report_transition(&mut self.event_bus, object.entity(), before, object.state());
        }
    }

    /// End the running interaction on `entity`. Returns false if there was none.
    pub fn end_interaction(&mut self, entity: EntityId, world: &mut GlintWorld) -> bool {
        let Some(object) = self.objects.iter_mut().find(|o| o.entity() == entity) else {
            return false;
        };
        let before = object.state();
        let ended = object.end_interaction(world);
        report_transition(&mut self.event_bus, entity, before, object.state());
        ended
    }

    /// Let every started object draw its prompt
    pub fn draw(&self, canvas: &mut dyn PromptCanvas) {
        for object in &self.objects[..self.started] {
            object.on_draw_ui(canvas);
        }
    }

    pub fn state_of(&self, entity: EntityId) -> Option<InteractionState> {
        self.objects
            .iter()
            .find(|o| o.entity() == entity)
            .map(|o| o.state())
    }

    pub fn objects(&self) -> &[Box<dyn Lifecycle>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn owner_of(
        &mut self,
        world: &GlintWorld,
        trigger: EntityId,
    ) -> Option<&mut Box<dyn Lifecycle>> {
        let owner = world
            .self_and_ancestors(trigger)
            .find(|id| self.objects.iter().any(|o| o.entity() == *id))?;
        self.objects.iter_mut().find(|o| o.entity() == owner)
    }
}

fn report_transition(
    bus: &mut EventBus,
    entity: EntityId,
    before: InteractionState,
    after: InteractionState,
) {
    let was = before == InteractionState::Interacting;
    let is = after == InteractionState::Interacting;
    if !was && is {
        bus.push(GameEvent::InteractionStarted { entity });
    } else if was && !is {
        bus.push(GameEvent::InteractionEnded { entity });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behaviors::ToggleBehavior;
    use crate::config::InteractConfig;
    use crate::interactable::InteractableObject;
    use crate::prompt::RecordingCanvas;
    use glint_core::{Camera, LayerMask, LayerRegistry, RayHit, Raycaster, Vec3};
    use glint_ecs::{MovementController, Tags};
    use glint_runtime::InputState;
    use winit::keyboard::KeyCode;

    struct AlwaysHit(EntityId);

    impl Raycaster for AlwaysHit {
        fn cast_ray(&self, _o: Vec3, _d: Vec3, _max: f32, _mask: LayerMask) -> Option<RayHit> {
            Some(RayHit {
                entity: self.0,
                distance: 0.5,
            })
        }
    }

    struct Scene {
        world: GlintWorld,
        layers: LayerRegistry,
        camera: Camera,
        input: InputState,
        player: EntityId,
        door: EntityId,
        door_trigger: EntityId,
        system: InteractionSystem,
    }

    impl Scene {
        fn new() -> Self {
            let mut world = GlintWorld::new();
            let player = world.spawn("player").unwrap();
            world.insert(player, Tags::new(["Player"])).unwrap();
            world.insert(player, MovementController::default()).unwrap();
            let door = world.spawn("door").unwrap();
            let door_trigger = world.spawn("door_trigger").unwrap();
            world.set_parent(door_trigger, door).unwrap();

            let config = InteractConfig::default();
            let mut system = InteractionSystem::new();
            system.register(Box::new(InteractableObject::new(
                door,
                ToggleBehavior::new("door"),
                &config,
            )));

            let mut scene = Self {
                world,
                layers: LayerRegistry::from_names(["InteractRaycast"]).unwrap(),
                camera: Camera::default(),
                input: InputState::new(),
                player,
                door,
                door_trigger,
                system,
            };
            let ctx = StartContext {
                world: &scene.world,
                layers: &scene.layers,
                camera: Some(&scene.camera),
            };
            scene.system.start(&ctx);
            scene
        }

        fn tick(&mut self) {
            let ray = AlwaysHit(self.door);
            let mut frame = FrameContext {
                world: &mut self.world,
                input: &self.input,
                raycaster: &ray,
                camera: Some(&self.camera),
                dt: 1.0 / 60.0,
            };
            self.system.tick(&mut frame);
            self.input.end_frame();
        }
    }

    #[test]
    fn test_trigger_on_child_routes_to_owner() {
        let mut scene = Scene::new();
        let event = GameEvent::TriggerEntered {
            trigger: scene.door_trigger,
            other: scene.player,
        };
        scene.system.handle_event(&scene.world, &event);
        scene.tick();

        assert_eq!(
            scene.system.state_of(scene.door),
            Some(InteractionState::Prompting)
        );

        let mut canvas = RecordingCanvas::new(1280.0, 720.0);
        scene.system.draw(&mut canvas);
        assert_eq!(canvas.commands.len(), 1);
        assert_eq!(canvas.commands[0].text, "Open door");
    }

    #[test]
    fn test_non_player_trigger_traffic_is_ignored() {
        let mut scene = Scene::new();
        let cat = scene.world.spawn("cat").unwrap();
        let trigger = scene.door_trigger;

        scene.system.handle_event(
            &scene.world,
            &GameEvent::TriggerEntered {
                trigger,
                other: scene.player,
            },
        );
        scene
            .system
            .handle_event(&scene.world, &GameEvent::TriggerEntered { trigger, other: cat });
        scene.tick();
        scene
            .system
            .handle_event(&scene.world, &GameEvent::TriggerExited { trigger, other: cat });
        scene.tick();

        assert_eq!(
            scene.system.state_of(scene.door),
            Some(InteractionState::Prompting)
        );
        let mut canvas = RecordingCanvas::new(1280.0, 720.0);
        scene.system.draw(&mut canvas);
        assert_eq!(canvas.commands.len(), 1);
    }

    #[test]
    fn test_unrelated_trigger_is_ignored() {
        let mut scene = Scene::new();
        let lamp = scene.world.spawn("lamp").unwrap();
        let event = GameEvent::TriggerEntered {
            trigger: lamp,
            other: scene.player,
        };
        scene.system.handle_event(&scene.world, &event);
        scene.tick();

        assert_eq!(scene.system.state_of(scene.door), Some(InteractionState::Idle));
        assert_eq!(scene.system.state_of(lamp), None);
    }

    #[test]
    fn test_transitions_are_reported() {
        let mut scene = Scene::new();
        let event = GameEvent::TriggerEntered {
            trigger: scene.door,
            other: scene.player,
        };
        scene.system.handle_event(&scene.world, &event);
        scene.tick();
        assert!(scene.system.event_bus.is_empty());

        scene.input.process_key_down(KeyCode::KeyE);
        scene.tick();
        scene.input.process_key_up(KeyCode::KeyE);
        scene.tick();
        assert_eq!(
            scene.system.event_bus.drain(),
            vec![GameEvent::InteractionStarted { entity: scene.door }]
        );

        // Toggle finishes on the tick after it starts
        scene.tick();
        assert_eq!(
            scene.system.event_bus.drain(),
            vec![GameEvent::InteractionEnded { entity: scene.door }]
        );
    }

    #[test]
    fn test_external_end_is_reported_once() {
        let mut scene = Scene::new();
        scene.system.handle_event(
            &scene.world,
            &GameEvent::TriggerEntered {
                trigger: scene.door,
                other: scene.player,
            },
        );
        scene.input.process_mouse_button_down(0);
        scene.tick();
        scene.system.event_bus.drain();

        assert!(scene.system.end_interaction(scene.door, &mut scene.world));
        assert!(!scene.system.end_interaction(scene.door, &mut scene.world));
        assert_eq!(
            scene.system.event_bus.drain(),
            vec![GameEvent::InteractionEnded { entity: scene.door }]
        );
    }

    #[test]
    fn test_objects_start_once() {
        let mut scene = Scene::new();
        assert_eq!(scene.system.len(), 1);

        let ctx = StartContext {
            world: &scene.world,
            layers: &scene.layers,
            camera: Some(&scene.camera),
        };
        scene.system.start(&ctx);
        assert_eq!(scene.system.objects()[0].entity(), scene.door);
    }
}

use crate::events::{EventDispatcher, HostContext, HostEvent};
use crate::material::MaterialManager;
use crate::platform::SpatialMapping;
use crate::scene_graph::Scene;

/// Owns the scene and routes host events to the application state `S`.
pub struct Engine<S> {
    pub scene: Scene,
    pub materials: MaterialManager,
    pub state: S,
    dispatcher: EventDispatcher<S>,
}

impl<S: 'static> Engine<S> {
    pub fn new(state: S, register: impl FnOnce(&mut EventDispatcher<S>)) -> Self {
        let mut dispatcher = EventDispatcher::new();
        register(&mut dispatcher);

        Self {
            scene: Scene::new(),
            materials: MaterialManager::new(),
            state,
            dispatcher,
        }
    }

    pub fn handle(
        &mut self,
        mapping: &mut dyn SpatialMapping,
        event: &HostEvent,
    ) -> anyhow::Result<()> {
        let mut ctx = HostContext {
            scene: &mut self.scene,
            materials: &mut self.materials,
            mapping,
        };

        self.dispatcher.dispatch(&mut self.state, &mut ctx, event)
    }

    pub fn frame(
        &mut self,
        mapping: &mut dyn SpatialMapping,
        time_step: f32,
    ) -> anyhow::Result<()> {
        self.handle(mapping, &HostEvent::Update { time_step })?;
        self.scene.update_transforms();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::demo::test_support::{started_engine, surface};
    use crate::demo::SessionMode;
    use crate::events::HostEvent;

    #[test]
    fn full_session() {
        let (mut engine, mut mapping) = started_engine();
        engine.handle(&mut mapping, &HostEvent::MappingStarted).unwrap();

        for frame in 0..40 {
            engine.frame(&mut mapping, 0.125).unwrap();
            if frame % 10 == 0 {
                let wall = surface("wall", Vec3::new(0.0, 0.0, 4.0));
                engine
                    .handle(&mut mapping, &HostEvent::SurfaceAddedOrUpdated(wall))
                    .unwrap();
            }
        }
        assert!(engine.state.balls().is_empty());

        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();
        for _ in 0..24 {
            engine.frame(&mut mapping, 0.125).unwrap();
        }

        assert_eq!(engine.state.mode(), SessionMode::Stopped);
        assert_eq!(engine.state.balls().len(), 3);
        assert_eq!(mapping.starts.len(), 1);
        assert_eq!(mapping.stops, 1);

        let root = engine.state.surfaces_root().unwrap();
        let wall = engine.scene.get_child_by_name(root, "wall").unwrap();
        let world = engine
            .scene
            .get_object(wall)
            .unwrap()
            .transform
            .world_position();
        assert!(world.abs_diff_eq(Vec3::new(0.0, 0.0, 4.0), 1e-5));
    }
}

//! The scene orchestrator: floor, falling balls and mapped surfaces.

mod floor;
mod gesture;
mod spawner;
mod surfaces;

use std::fmt;

use rand::{rngs::StdRng, SeedableRng};

use crate::config::DemoConfig;
use crate::events::{EventDispatcher, HostContext};
use crate::scene_graph::{ObjectId, Scene};

pub use floor::build_floor;
pub use spawner::{spawn_ball, Spawner};

pub const SURFACES_ROOT_NAME: &str = "DetectedSurfaces";

/// Session state shared by the spawn and gesture handlers. The only
/// transition is `Mapping -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Surfaces are being scanned and shown; no balls fall.
    Mapping,
    /// Scanning is over; surfaces keep their physics but are hidden.
    Stopped,
}

impl SessionMode {
    pub fn allows_spawning(self) -> bool {
        self == SessionMode::Stopped
    }

    pub fn shows_surfaces(self) -> bool {
        self == SessionMode::Mapping
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Mapping => f.write_str("Mapping (tap to stop)"),
            SessionMode::Stopped => f.write_str("Stopped"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoStatus {
    pub mode: SessionMode,
    pub balls: usize,
    pub surfaces: usize,
}

impl fmt::Display for DemoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} balls | {} surfaces",
            self.mode, self.balls, self.surfaces
        )
    }
}

pub struct HoloDemo {
    config: DemoConfig,
    mode: SessionMode,
    spawner: Spawner,
    floor: Option<ObjectId>,
    surfaces_root: Option<ObjectId>,
    balls: Vec<ObjectId>,
}

impl HoloDemo {
    pub fn new(config: DemoConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: DemoConfig, rng: StdRng) -> Self {
        let spawner = Spawner::new(config.spawn_interval, config.spawn_volume, rng);

        Self {
            config,
            mode: SessionMode::Mapping,
            spawner,
            floor: None,
            surfaces_root: None,
            balls: Vec::new(),
        }
    }

    pub fn register(dispatcher: &mut EventDispatcher<HoloDemo>) {
        dispatcher.on_start(|demo, ctx| demo.start(ctx));
        dispatcher.on_update(|demo, ctx, time_step| demo.update(ctx, time_step));
        dispatcher.on_mapping_started(|_, _| {
            log::info!("Spatial mapping is running");
            Ok(())
        });
        dispatcher.on_surface_added_or_updated(|demo, ctx, surface| {
            demo.surface_added_or_updated(ctx, surface)
        });
        dispatcher.on_gesture_tapped(|demo, ctx| demo.gesture_tapped(ctx));
    }

    fn start(&mut self, ctx: &mut HostContext<'_>) -> anyhow::Result<()> {
        if self.floor.is_some() {
            log::warn!("Start received twice, building another floor and surfaces root");
        }

        self.floor = Some(build_floor(ctx.scene, &self.config)?);
        self.surfaces_root = Some(ctx.scene.create_child(None, SURFACES_ROOT_NAME));

        if self.mode == SessionMode::Stopped {
            log::warn!("Spatial mapping was already stopped, not restarting it");
            return Ok(());
        }

        // Set before the request so the first frame already sees it.
        self.mode = SessionMode::Mapping;
        ctx.mapping.request_start(self.config.mapping_extent);
        log::info!(
            "Requested spatial mapping with extent {}",
            self.config.mapping_extent
        );

        Ok(())
    }

    fn update(&mut self, ctx: &mut HostContext<'_>, time_step: f32) -> anyhow::Result<()> {
        if !self.mode.allows_spawning() {
            return Ok(());
        }

        if let Some(position) = self.spawner.tick(time_step) {
            let ball = spawn_ball(ctx.scene, &self.config, position)?;
            self.balls.push(ball);
            log::debug!("Spawned ball #{} at {}", self.balls.len(), position);
        }

        Ok(())
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Ball nodes in creation order.
    #[allow(dead_code)]
    pub fn balls(&self) -> &[ObjectId] {
        &self.balls
    }

    #[allow(dead_code)]
    pub fn floor(&self) -> Option<ObjectId> {
        self.floor
    }

    #[allow(dead_code)]
    pub fn surfaces_root(&self) -> Option<ObjectId> {
        self.surfaces_root
    }

    pub fn status(&self, scene: &Scene) -> DemoStatus {
        DemoStatus {
            mode: self.mode,
            balls: self.balls.len(),
            surfaces: self
                .surfaces_root
                .map(|root| scene.children(root).len())
                .unwrap_or(0),
        }
    }
}


#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::test_support::{started_engine, surface};
    use super::*;
    use crate::events::HostEvent;

    #[test]
    fn start_builds_scene_and_requests_mapping() {
        let (engine, mapping) = started_engine();
        let demo = &engine.state;

        assert_eq!(demo.mode(), SessionMode::Mapping);
        assert_eq!(mapping.starts, vec![Vec3::new(10.0, 10.0, 10.0)]);
        assert_eq!(mapping.stops, 0);

        let root = demo.surfaces_root().unwrap();
        assert_eq!(engine.scene.get_object(root).unwrap().name, SURFACES_ROOT_NAME);
        assert!(demo.floor().is_some());
        assert_eq!(engine.scene.root_objects().count(), 2);
    }

    #[test]
    fn status_tracks_the_session() {
        let (mut engine, mut mapping) = started_engine();
        let status = engine.state.status(&engine.scene);
        assert_eq!(status.to_string(), "Mapping (tap to stop) | 0 balls | 0 surfaces");

        engine
            .handle(
                &mut mapping,
                &HostEvent::SurfaceAddedOrUpdated(surface("S1", Vec3::ZERO)),
            )
            .unwrap();
        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();
        engine.frame(&mut mapping, 1.0).unwrap();

        let status = engine.state.status(&engine.scene);
        assert_eq!(
            status,
            DemoStatus {
                mode: SessionMode::Stopped,
                balls: 1,
                surfaces: 1,
            }
        );
    }

    #[test]
    fn restart_after_stop_keeps_mapping_stopped() {
        let (mut engine, mut mapping) = started_engine();
        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();
        engine.handle(&mut mapping, &HostEvent::Start).unwrap();

        assert_eq!(engine.state.mode(), SessionMode::Stopped);
        assert_eq!(mapping.starts.len(), 1);
        assert_eq!(mapping.stops, 1);

        engine.frame(&mut mapping, 1.0).unwrap();
        assert_eq!(engine.state.balls().len(), 1);
    }

    #[test]
    fn mapping_started_is_accepted_at_any_time() {
        let (mut engine, mut mapping) = started_engine();
        engine.handle(&mut mapping, &HostEvent::MappingStarted).unwrap();
        assert_eq!(engine.state.mode(), SessionMode::Mapping);
    }
}

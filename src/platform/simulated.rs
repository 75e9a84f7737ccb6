//! Stand-in for the OS spatial-mapping service. Scans a fixed synthetic room
//! on a tokio task and refines each surface's mesh on every pass.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use glam::{Quat, Vec2, Vec3};
use rand::Rng;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};

use crate::events::HostEvent;
use crate::math::AABB;
use crate::model::Vertex;
use crate::platform::{SpatialMapping, SpatialMeshInfo, SurfaceId};

#[derive(Debug, Clone)]
pub struct SimulatedMappingConfig {
    /// Delay between the start request and `MappingStarted`.
    pub warmup: Duration,
    pub scan_interval: Duration,
    /// Grid resolution reached after this many passes; later passes resend it.
    pub max_subdivisions: u32,
}

impl Default for SimulatedMappingConfig {
    fn default() -> Self {
        Self {
            warmup: Duration::from_millis(500),
            scan_interval: Duration::from_millis(750),
            max_subdivisions: 8,
        }
    }
}

#[derive(Debug, Clone)]
struct SyntheticSurface {
    id: SurfaceId,
    center: Vec3,
    rotation: Quat,
    half_extents: Vec2,
}

impl SyntheticSurface {
    fn mesh_info(&self, subdivisions: u32) -> SpatialMeshInfo {
        let (vertex_data, index_data) = grid_mesh(self.half_extents, subdivisions);

        SpatialMeshInfo {
            surface_id: self.id.clone(),
            bounds_center: self.center,
            bounds_rotation: self.rotation,
            vertex_data,
            index_data,
        }
    }
}

/// Flat grid in the local XZ plane facing +Y.
fn grid_mesh(half_extents: Vec2, subdivisions: u32) -> (Vec<Vertex>, Vec<u32>) {
    let n = subdivisions.max(1);
    let row = n + 1;

    let vertices = (0..row)
        .flat_map(|z| (0..row).map(move |x| (x, z)))
        .map(|(x, z)| {
            let u = x as f32 / n as f32 * 2.0 - 1.0;
            let v = z as f32 / n as f32 * 2.0 - 1.0;
            Vertex::new(
                Vec3::new(u * half_extents.x, 0.0, v * half_extents.y),
                Vec3::Y,
            )
        })
        .collect();

    let indices = (0..n)
        .flat_map(|z| (0..n).map(move |x| (x, z)))
        .flat_map(|(x, z)| {
            let i = z * row + x;
            [i, i + row, i + 1, i + 1, i + row, i + row + 1]
        })
        .collect();

    (vertices, indices)
}

fn random_surface_id(rng: &mut impl Rng) -> SurfaceId {
    SurfaceId::new(format!(
        "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
        rng.gen::<u32>(),
        rng.gen::<u16>(),
        rng.gen::<u16>(),
        rng.gen::<u16>(),
        rng.gen::<u64>() & 0xffff_ffff_ffff
    ))
}

fn synthetic_room(rng: &mut impl Rng) -> Vec<SyntheticSurface> {
    let mut surface = |center: Vec3, rotation: Quat, half_extents: Vec2| SyntheticSurface {
        id: random_surface_id(rng),
        center,
        rotation,
        half_extents,
    };

    vec![
        // Floor
        surface(Vec3::new(0.0, -1.2, 3.0), Quat::IDENTITY, Vec2::new(3.0, 3.0)),
        // Table top
        surface(
            Vec3::new(0.4, -0.5, 2.8),
            Quat::IDENTITY,
            Vec2::new(0.6, 0.4),
        ),
        // Back wall
        surface(
            Vec3::new(0.0, 0.3, 4.8),
            Quat::from_rotation_x(-FRAC_PI_2),
            Vec2::new(3.0, 1.5),
        ),
        // Side wall
        surface(
            Vec3::new(-3.0, 0.3, 3.0),
            Quat::from_rotation_z(-FRAC_PI_2),
            Vec2::new(1.5, 3.0),
        ),
        // Outside any sensible scan extent
        surface(
            Vec3::new(0.0, -1.2, 40.0),
            Quat::IDENTITY,
            Vec2::new(5.0, 5.0),
        ),
    ]
}

fn surfaces_within(surfaces: Vec<SyntheticSurface>, extent: Vec3) -> Vec<SyntheticSurface> {
    let bounds = AABB::new(-extent * 0.5, extent * 0.5);
    surfaces
        .into_iter()
        .filter(|surface| bounds.contains_point(surface.center))
        .collect()
}

async fn scan(
    surfaces: Vec<SyntheticSurface>,
    config: SimulatedMappingConfig,
    events: mpsc::UnboundedSender<HostEvent>,
    mut stop: watch::Receiver<bool>,
) {
    tokio::select! {
        _ = tokio::time::sleep(config.warmup) => {}
        _ = stop.changed() => {
            log::info!("Spatial mapping stopped before it started");
            return;
        }
    }

    if events.send(HostEvent::MappingStarted).is_err() {
        return;
    }

    let mut interval = tokio::time::interval(config.scan_interval);
    let mut passes = 0;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = stop.changed() => break,
        }

        passes += 1;
        let subdivisions = passes.min(config.max_subdivisions);

        for surface in &surfaces {
            let event = HostEvent::SurfaceAddedOrUpdated(surface.mesh_info(subdivisions));
            if events.send(event).is_err() {
                log::debug!("Host went away, ending scan");
                return;
            }
        }
    }

    log::info!("Spatial mapping stopped after {} passes", passes);
}

/// Simulated platform service. Events go to the receiver returned by `new`.
pub struct SimulatedSpatialMapping {
    runtime: Handle,
    events: mpsc::UnboundedSender<HostEvent>,
    config: SimulatedMappingConfig,
    stop: Option<watch::Sender<bool>>,
}

impl SimulatedSpatialMapping {
    pub fn new(
        runtime: Handle,
        config: SimulatedMappingConfig,
    ) -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        let mapping = Self {
            runtime,
            events,
            config,
            stop: None,
        };

        (mapping, receiver)
    }
}

impl SpatialMapping for SimulatedSpatialMapping {
    fn request_start(&mut self, extent: Vec3) {
        if self.stop.is_some() {
            log::warn!("Spatial mapping already running, ignoring start request");
            return;
        }

        let surfaces = surfaces_within(synthetic_room(&mut rand::thread_rng()), extent);
        log::info!(
            "Starting simulated spatial mapping: extent {}, {} surfaces in range",
            extent,
            surfaces.len()
        );

        let (stop_sender, stop_receiver) = watch::channel(false);
        self.runtime.spawn(scan(
            surfaces,
            self.config.clone(),
            self.events.clone(),
            stop_receiver,
        ));
        self.stop = Some(stop_sender);
    }

    fn request_stop(&mut self) {
        match self.stop.take() {
            Some(stop) => {
                // The scan task may already be gone if the host dropped its receiver.
                let _ = stop.send(true);
                log::info!("Requested spatial mapping stop");
            }
            None => log::warn!("Spatial mapping is not running, ignoring stop request"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use tokio::time::timeout;

    use super::*;
    use crate::model::Model;

    #[test]
    fn grid_mesh_is_a_valid_model() {
        let (vertices, indices) = grid_mesh(Vec2::new(1.0, 2.0), 4);
        assert_eq!(vertices.len(), 25);
        assert_eq!(indices.len(), 4 * 4 * 6);

        let model = Model::from_vertex_data("grid", &vertices, &indices).unwrap();
        assert_eq!(model.bounding_box.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(model.bounding_box.max, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn room_surfaces_have_unique_ids_and_respect_extent() {
        let mut rng = StdRng::seed_from_u64(3);
        let room = synthetic_room(&mut rng);
        let ids: std::collections::HashSet<_> = room.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), room.len());

        let in_range = surfaces_within(room.clone(), Vec3::splat(10.0));
        assert_eq!(in_range.len(), room.len() - 1);
        assert!(surfaces_within(room, Vec3::splat(0.5)).is_empty());
    }

    fn fast_config() -> SimulatedMappingConfig {
        SimulatedMappingConfig {
            warmup: Duration::from_millis(1),
            scan_interval: Duration::from_millis(5),
            max_subdivisions: 2,
        }
    }

    #[tokio::test]
    async fn emits_started_then_surfaces_until_stopped() {
        let (mut mapping, mut events) =
            SimulatedSpatialMapping::new(Handle::current(), fast_config());
        mapping.request_start(Vec3::splat(10.0));

        let first = timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(first, HostEvent::MappingStarted));

        let second = timeout(Duration::from_secs(5), events.recv())
            .await
            .unwrap()
            .unwrap();
        match second {
            HostEvent::SurfaceAddedOrUpdated(surface) => {
                assert!(!surface.index_data.is_empty());
                assert_eq!(surface.index_data.len() % 3, 0);
            }
            other => panic!("unexpected event {other:?}"),
        }

        mapping.request_stop();
        drop(mapping);

        // Once the task exits its sender drops and the channel closes.
        let drained = timeout(Duration::from_secs(5), async {
            while events.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn stop_during_warmup_emits_nothing() {
        let config = SimulatedMappingConfig {
            warmup: Duration::from_secs(60),
            ..fast_config()
        };
        let (mut mapping, mut events) =
            SimulatedSpatialMapping::new(Handle::current(), config);
        mapping.request_start(Vec3::splat(10.0));
        mapping.request_stop();
        drop(mapping);

        let next = timeout(Duration::from_secs(5), events.recv()).await.unwrap();
        assert!(next.is_none());
    }
}

use crate::demo::{HoloDemo, SessionMode};
use crate::events::HostContext;

impl HoloDemo {
    /// Ends the mapping session: stop the feed and hide every surface's
    /// wireframe while keeping its body and collider for the balls.
    pub(super) fn gesture_tapped(&mut self, ctx: &mut HostContext<'_>) -> anyhow::Result<()> {
        if self.mode == SessionMode::Stopped {
            log::debug!("Spatial mapping already stopped, ignoring tap");
            return Ok(());
        }

        self.mode = SessionMode::Stopped;
        log::info!("Gesture tapped, stopping spatial mapping");
        ctx.mapping.request_stop();

        let Some(root) = self.surfaces_root else {
            return Ok(());
        };

        let surfaces = ctx.scene.children(root).to_vec();
        for &surface in &surfaces {
            let object = ctx.scene.object_mut(surface)?;
            match object.static_model.as_mut() {
                Some(static_model) => static_model.enabled = false,
                None => log::warn!("Surface {} has no visual to hide", object.name),
            }
        }

        log::info!("Hid {} mapped surfaces", surfaces.len());

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
    fn tap_hides_visuals_and_keeps_physics() {
        let (mut engine, mut mapping) = started_engine();
        for (id, x) in [("S1", 0.0), ("S2", 1.0), ("S3", 2.0)] {
            engine
                .handle(
                    &mut mapping,
                    &HostEvent::SurfaceAddedOrUpdated(surface(id, Vec3::new(x, 0.0, 0.0))),
                )
                .unwrap();
        }

        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();

        assert_eq!(engine.state.mode(), SessionMode::Stopped);
        assert_eq!(mapping.stops, 1);

        let root = engine.state.surfaces_root().unwrap();
        assert_eq!(engine.scene.children(root).len(), 3);
        for &node in engine.scene.children(root) {
            let object = engine.scene.get_object(node).unwrap();
            assert!(!object.static_model.as_ref().unwrap().enabled);
            assert!(object.is_physical());
        }
    }

    #[test]
    fn second_tap_is_ignored() {
        let (mut engine, mut mapping) = started_engine();

        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();
        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();

        assert_eq!(mapping.stops, 1);
        assert_eq!(engine.state.mode(), SessionMode::Stopped);
    }

    #[test]
    fn late_surface_events_stay_hidden() {
        let (mut engine, mut mapping) = started_engine();
        engine
            .handle(
                &mut mapping,
                &HostEvent::SurfaceAddedOrUpdated(surface("S1", Vec3::ZERO)),
            )
            .unwrap();
        engine.handle(&mut mapping, &HostEvent::GestureTapped).unwrap();

        // One in-flight update for a known surface, one for a new one.
        for id in ["S1", "S2"] {
            engine
                .handle(
                    &mut mapping,
                    &HostEvent::SurfaceAddedOrUpdated(surface(id, Vec3::ONE)),
                )
                .unwrap();
        }

        let root = engine.state.surfaces_root().unwrap();
        assert_eq!(engine.scene.children(root).len(), 2);
        for &node in engine.scene.children(root) {
            let object = engine.scene.get_object(node).unwrap();
            assert!(!object.static_model.as_ref().unwrap().enabled);
            assert!(object.is_physical());
        }
    }
}

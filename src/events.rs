//! Host events and the dispatcher that routes them to registered handlers.

use crate::material::MaterialManager;
use crate::platform::{SpatialMapping, SpatialMeshInfo};
use crate::scene_graph::Scene;

#[derive(Debug, Clone)]
pub enum HostEvent {
    /// Sent once before the first frame.
    Start,
    Update { time_step: f32 },
    /// Completion of a `SpatialMapping::request_start`.
    MappingStarted,
    SurfaceAddedOrUpdated(SpatialMeshInfo),
    GestureTapped,
}

/// Everything a handler may touch besides its own state.
pub struct HostContext<'a> {
    pub scene: &'a mut Scene,
    pub materials: &'a mut MaterialManager,
    pub mapping: &'a mut dyn SpatialMapping,
}

type Handler<S> = Box<dyn FnMut(&mut S, &mut HostContext<'_>, &HostEvent) -> anyhow::Result<()>>;

/// Handlers run in registration order. Dispatch stops at the first error.
pub struct EventDispatcher<S> {
    handlers: Vec<Handler<S>>,
}

impl<S: 'static> EventDispatcher<S> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    fn register(&mut self, handler: Handler<S>) {
        self.handlers.push(handler);
    }

    pub fn on_start<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut S, &mut HostContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.register(Box::new(
            move |state: &mut S, ctx: &mut HostContext<'_>, event: &HostEvent| match event {
                HostEvent::Start => f(state, ctx),
                _ => Ok(()),
            },
        ));
    }

    pub fn on_update<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut S, &mut HostContext<'_>, f32) -> anyhow::Result<()> + 'static,
    {
        self.register(Box::new(
            move |state: &mut S, ctx: &mut HostContext<'_>, event: &HostEvent| match event {
                HostEvent::Update { time_step } => f(state, ctx, *time_step),
                _ => Ok(()),
            },
        ));
    }

    pub fn on_mapping_started<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut S, &mut HostContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.register(Box::new(
            move |state: &mut S, ctx: &mut HostContext<'_>, event: &HostEvent| match event {
                HostEvent::MappingStarted => f(state, ctx),
                _ => Ok(()),
            },
        ));
    }

    pub fn on_surface_added_or_updated<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut S, &mut HostContext<'_>, &SpatialMeshInfo) -> anyhow::Result<()> + 'static,
    {
        self.register(Box::new(
            move |state: &mut S, ctx: &mut HostContext<'_>, event: &HostEvent| match event {
                HostEvent::SurfaceAddedOrUpdated(surface) => f(state, ctx, surface),
                _ => Ok(()),
            },
        ));
    }

    pub fn on_gesture_tapped<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut S, &mut HostContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.register(Box::new(
            move |state: &mut S, ctx: &mut HostContext<'_>, event: &HostEvent| match event {
                HostEvent::GestureTapped => f(state, ctx),
                _ => Ok(()),
            },
        ));
    }

    pub fn dispatch(
        &mut self,
        state: &mut S,
        ctx: &mut HostContext<'_>,
        event: &HostEvent,
    ) -> anyhow::Result<()> {
        for handler in self.handlers.iter_mut() {
            handler(state, ctx, event)?;
        }

        Ok(())
    }
}

use std::time::Instant;

use anyhow::Context;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::config::DemoConfig;
use crate::demo::HoloDemo;
use crate::engine::Engine;
use crate::events::HostEvent;
use crate::platform::{SimulatedMappingConfig, SimulatedSpatialMapping};

const TITLE: &str = "Spatial mapping demo";

struct App {
    window: Option<Window>,
    engine: Engine<HoloDemo>,
    mapping: SimulatedSpatialMapping,
    platform_events: mpsc::UnboundedReceiver<HostEvent>,
    last_frame: Instant,
    title: String,
}

impl App {
    fn new(
        engine: Engine<HoloDemo>,
        mapping: SimulatedSpatialMapping,
        platform_events: mpsc::UnboundedReceiver<HostEvent>,
    ) -> Self {
        Self {
            window: None,
            engine,
            mapping,
            platform_events,
            last_frame: Instant::now(),
            title: String::new(),
        }
    }

    fn handle(&mut self, event: &HostEvent) -> anyhow::Result<()> {
        self.engine.handle(&mut self.mapping, event)
    }

    /// Delivers queued platform events, then runs one frame.
    fn step(&mut self, time_step: f32) -> anyhow::Result<()> {
        while let Ok(event) = self.platform_events.try_recv() {
            self.handle(&event)?;
        }

        self.engine.frame(&mut self.mapping, time_step)
    }

    fn refresh_title(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        let title = format!("{} - {}", TITLE, self.engine.state.status(&self.engine.scene));
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }

    fn fail(&self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:?}", err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes().with_title(TITLE);
        let window = match event_loop
            .create_window(window_attributes)
            .context("Failed to create window")
        {
            Ok(window) => window,
            Err(err) => return self.fail(event_loop, err),
        };
        window.request_redraw();
        self.window = Some(window);

        if let Err(err) = self.handle(&HostEvent::Start) {
            return self.fail(event_loop, err);
        }
        self.last_frame = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let result = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let time_step = now.duration_since(self.last_frame).as_secs_f32();
                self.last_frame = now;

                let result = self.step(time_step);
                self.refresh_title();
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
                result
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            }
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Space),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle(&HostEvent::GestureTapped),
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }
}

pub fn run(runtime: Handle) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;

    let (mapping, platform_events) =
        SimulatedSpatialMapping::new(runtime, SimulatedMappingConfig::default());
    let engine = Engine::new(HoloDemo::new(DemoConfig::default()), HoloDemo::register);

    let mut app = App::new(engine, mapping, platform_events);
    event_loop.run_app(&mut app)?;

    Ok(())
}

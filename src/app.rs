use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::ShowcaseConfig;
use crate::input::PointerHub;
use crate::showcase::Showcase;

/// Configuration for the app window.
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Vista".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Open a window and drive a [`Showcase`] from its events until it closes.
///
/// Pointer movement and resizes feed the showcase's [`PointerHub`]; every
/// redraw ticks it with the measured frame time. Drawing is left to the host
/// renderer, so this loop only logs the camera at trace level.
pub fn run(config: ShowcaseConfig) -> Result<(), winit::error::EventLoopError> {
    run_with_config(AppConfig::default(), config)
}

/// Like [`run`], with custom window settings.
pub fn run_with_config(
    app_config: AppConfig,
    config: ShowcaseConfig,
) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ShowcaseApp::Pending {
        app_config,
        config: Some(config),
    };
    event_loop.run_app(&mut app)
}

enum ShowcaseApp {
    Pending {
        app_config: AppConfig,
        config: Option<ShowcaseConfig>,
    },
    Running {
        window: Window,
        hub: PointerHub,
        showcase: Showcase,
        last_frame: Instant,
    },
}

impl ApplicationHandler for ShowcaseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let ShowcaseApp::Pending { app_config, config } = self else {
            return;
        };
        let Some(config) = config.take() else {
            return;
        };

        let window_attrs = WindowAttributes::default()
            .with_title(&app_config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                app_config.width,
                app_config.height,
            ));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let hub = PointerHub::new();
        let size = window.inner_size();
        hub.set_viewport(Vec2::new(size.width as f32, size.height as f32));

        let showcase = match Showcase::new(config, &hub) {
            Ok(showcase) => showcase,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        *self = ShowcaseApp::Running {
            window,
            hub,
            showcase,
            last_frame: Instant::now(),
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ShowcaseApp::Running {
            window,
            hub,
            showcase,
            last_frame,
        } = self
        else {
            return;
        };

        hub.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                showcase.dispose();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                showcase.tick(dt);

                let camera = showcase.camera();
                log::trace!(
                    "camera at {:?} facing {:?}",
                    camera.position,
                    camera.forward
                );

                window.request_redraw();
            }
            _ => {}
        }
    }
}

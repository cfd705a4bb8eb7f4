//! OS window with a current OpenGL context (winit + glutin)
//!
//! The winit event loop is driven through `pump_app_events` with a zero
//! timeout, so the frame loop keeps control of the thread and only polls
//! for input between frames.

use std::num::NonZeroU32;
use std::time::Duration;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{
    GlSurface, Surface as GlutinSurface, SurfaceAttributesBuilder, SwapInterval, WindowSurface,
};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use tracing::{debug, warn};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::events::WindowFlags;
use crate::run_loop::Surface;
use crate::{InputEvent, LabConfig, LabError, LabResult};

/// A window, its GL surface and current context, and the event loop
/// feeding it.
///
/// Fields drop in declaration order: GL handle and context first, then the
/// surface, the window, and finally the event loop.
pub struct GlWindow {
    gl: glow::Context,
    context: PossiblyCurrentContext,
    surface: GlutinSurface<WindowSurface>,
    window: Window,
    event_loop: EventLoop<()>,
    flags: WindowFlags,
}

struct Parts {
    window: Window,
    surface: GlutinSurface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: glow::Context,
}

impl Parts {
    fn create(event_loop: &ActiveEventLoop, config: &LabConfig) -> LabResult<Self> {
        let (width, height) = config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(config.resizable);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), |mut configs| {
                configs
                    .next()
                    .expect("glutin offers at least one matching config")
            })
            .map_err(|e| LabError::CreateWindow(e.to_string()))?;
        let window = window
            .ok_or_else(|| LabError::CreateWindow("display builder returned no window".into()))?;

        let raw_window_handle = window
            .window_handle()
            .map_err(|e| LabError::CreateWindow(e.to_string()))?
            .as_raw();

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));
        let display = gl_config.display();
        let context = unsafe { display.create_context(&gl_config, &context_attributes) }
            .map_err(LabError::CreateContext)?;

        let size = window.inner_size();
        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            non_zero(size.width),
            non_zero(size.height),
        );
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| LabError::CreateSurface(e.to_string()))?;

        let context = context
            .make_current(&surface)
            .map_err(LabError::MakeCurrent)?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            warn!("Cannot set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s).cast())
        };

        Ok(Self {
            window,
            surface,
            context,
            gl,
        })
    }
}

/// Builds the window on the first `resumed`
struct Bootstrap<'a> {
    config: &'a LabConfig,
    parts: Option<LabResult<Parts>>,
}

impl ApplicationHandler for Bootstrap<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.parts.is_none() {
            self.parts = Some(Parts::create(event_loop, self.config));
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Collects one pump's worth of events for the lab window
struct EventSink<'a> {
    window_id: WindowId,
    events: &'a mut Vec<InputEvent>,
    flags: &'a mut WindowFlags,
    resized: Option<PhysicalSize<u32>>,
}

impl ApplicationHandler for EventSink<'_> {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if window_id != self.window_id {
            return;
        }
        self.flags.observe(&event);
        if let WindowEvent::Resized(size) = event {
            self.resized = Some(size);
        }
        if let Some(input) = InputEvent::from_window_event(&event) {
            self.events.push(input);
        }
    }
}

impl GlWindow {
    /// Create the event loop, the window and a current context as
    /// described by `config`.
    ///
    /// Fails with [`LabError::EventLoop`] when an event loop already
    /// exists in this process.
    pub fn new(config: &LabConfig) -> LabResult<Self> {
        let mut event_loop = EventLoop::new()?;
        let mut bootstrap = Bootstrap {
            config,
            parts: None,
        };

        let parts = loop {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut bootstrap)
            {
                return Err(LabError::EventLoopExited(code));
            }
            if let Some(parts) = bootstrap.parts.take() {
                break parts?;
            }
        };

        let Parts {
            window,
            surface,
            context,
            gl,
        } = parts;
        debug!(window = ?window.id(), "Window created");

        Ok(Self {
            gl,
            context,
            surface,
            window,
            event_loop,
            flags: WindowFlags::default(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Current inner size in physical pixels
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.surface.resize(&self.context, width, height);
        }
    }
}

impl Surface for GlWindow {
    type Gl = glow::Context;

    fn gl(&self) -> &glow::Context {
        &self.gl
    }

    fn swap_buffers(&mut self) -> LabResult<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(LabError::Surface)
    }

    fn poll_events(&mut self, events: &mut Vec<InputEvent>) -> LabResult<()> {
        let mut sink = EventSink {
            window_id: self.window.id(),
            events,
            flags: &mut self.flags,
            resized: None,
        };
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut sink);
        let resized = sink.resized;

        if let PumpStatus::Exit(code) = status {
            debug!(code, "Event loop exited");
            self.flags.close_requested = true;
        }
        // The surface must match the window before the hook sees the size.
        if let Some(size) = resized {
            self.resize(size);
        }
        Ok(())
    }

    fn escape_held(&self) -> bool {
        self.flags.escape_held
    }

    fn close_requested(&self) -> bool {
        self.flags.close_requested
    }
}

impl Drop for GlWindow {
    fn drop(&mut self) {
        debug!(window = ?self.window.id(), "Destroying window");
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

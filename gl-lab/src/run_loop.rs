//! The frame loop, written against a [`Surface`] so it can run headless

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{Application, FrameInfo, InputEvent, LabResult};

/// What the frame loop needs from a window: a GL handle, buffer swaps and
/// an event pump with the two exit conditions.
pub trait Surface {
    type Gl;

    fn gl(&self) -> &Self::Gl;

    fn swap_buffers(&mut self) -> LabResult<()>;

    /// Process pending window events without blocking, appending the ones
    /// addressed to the application to `events`.
    fn poll_events(&mut self, events: &mut Vec<InputEvent>) -> LabResult<()>;

    /// Whether Escape is currently held down
    fn escape_held(&self) -> bool;

    /// Whether the window has been flagged to close
    fn close_requested(&self) -> bool;
}

/// Produces [`FrameInfo`] values for consecutive frames
#[derive(Debug)]
pub struct FrameClock {
    index: u64,
    last_frame: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            index: 0,
            last_frame: None,
        }
    }

    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_frame = Some(now);

        let frame = FrameInfo {
            index: self.index,
            delta,
        };
        self.index += 1;
        frame
    }

    /// Number of frames handed out so far
    pub fn frames(&self) -> u64 {
        self.index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `app` on `surface` until Escape is held or the window closes.
///
/// `start` runs once before the first frame and `finish` once after the
/// last, also when a frame fails. At least one frame is always rendered;
/// the exit condition is checked after each event pump. Returns the
/// number of rendered frames.
pub fn drive<S, A>(surface: &mut S, app: &mut A) -> LabResult<u64>
where
    S: Surface,
    A: Application<S::Gl> + ?Sized,
{
    info!("Starting render loop");
    app.start(surface.gl());

    let mut clock = FrameClock::new();
    let outcome = frames(surface, app, &mut clock);

    app.finish(surface.gl());
    info!(frames = clock.frames(), "Render loop finished");
    outcome.map(|()| clock.frames())
}

fn frames<S, A>(surface: &mut S, app: &mut A, clock: &mut FrameClock) -> LabResult<()>
where
    S: Surface,
    A: Application<S::Gl> + ?Sized,
{
    let mut events = Vec::new();
    loop {
        let frame = clock.tick();
        app.render(surface.gl(), &frame);

        surface.swap_buffers()?;
        surface.poll_events(&mut events)?;
        for event in events.drain(..) {
            event.dispatch::<S::Gl, A>(app);
        }

        if surface.escape_held() {
            debug!("Escape held, leaving render loop");
            return Ok(());
        }
        if surface.close_requested() {
            debug!("Close requested, leaving render loop");
            return Ok(());
        }
    }
}

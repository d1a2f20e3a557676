//! Window and event-loop host.
//!
//! [`SandboxApp`] owns the winit event loop, creates the window and the
//! [`RenderEngine`], translates window events into [`AppEvent`]s and hands
//! them, in order, to a user [`Sandbox`] before each frame it renders.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::{WindowOptions, DEFAULT_LOG_FILTER};
use crate::gfx::{rendering::RenderEngine, resources::TextureManager};

/// Input and timing events delivered to a [`Sandbox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// A key went down (repeats included). `cursor` is the last known
    /// cursor position in window pixels.
    KeyPress { key: KeyCode, cursor: (f64, f64) },
    MouseMove { x: f64, y: f64 },
    Resize { width: u32, height: u32 },
    /// The frame timer fired; a redraw follows.
    FrameTick,
}

/// FIFO of host events awaiting dispatch.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<AppEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: AppEvent) {
        self.events.push_back(event);
    }

    pub fn pop(&mut self) -> Option<AppEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    /// Time since the sandbox was initialized
    pub elapsed: Duration,
    pub frame_index: u64,
}

impl FrameInfo {
    pub fn elapsed_millis(&self) -> f32 {
        self.elapsed.as_secs_f32() * 1000.0
    }
}

/// Everything a sandbox draws with.
pub struct SandboxContext {
    pub engine: RenderEngine,
    pub textures: TextureManager,
}

/// A user program run by [`SandboxApp`].
pub trait Sandbox: Sized {
    /// Called once the window and GPU are ready.
    fn init(ctx: &mut SandboxContext) -> anyhow::Result<Self>;

    fn handle_event(&mut self, _event: &AppEvent, _ctx: &mut SandboxContext) -> EventResponse {
        EventResponse::Continue
    }

    /// Issues this frame's draws. The frame is already begun and cleared.
    fn render(&mut self, ctx: &mut SandboxContext, frame: &FrameInfo);
}

pub struct SandboxApp {
    options: WindowOptions,
}

impl SandboxApp {
    pub fn new(options: WindowOptions) -> Self {
        Self { options }
    }

    /// Initializes logging, opens the window and runs `S` until the window
    /// closes or the sandbox asks to exit.
    pub fn run<S: Sandbox>(self) -> anyhow::Result<()> {
        if let Err(err) = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER),
        )
        .try_init()
        {
            log::debug!("Logger already initialized: {}", err);
        }

        let event_loop = EventLoop::new().context("failed to create event loop")?;
        let mut state = AppState::<S>::new(self.options);
        event_loop
            .run_app(&mut state)
            .context("event loop terminated abnormally")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct AppState<S> {
    options: WindowOptions,
    window: Option<Arc<Window>>,
    context: Option<SandboxContext>,
    sandbox: Option<S>,
    queue: EventQueue,
    cursor: (f64, f64),
    start: Instant,
    next_tick: Instant,
    frame_index: u64,
    error: Option<anyhow::Error>,
}

impl<S: Sandbox> AppState<S> {
    fn new(options: WindowOptions) -> Self {
        let now = Instant::now();
        Self {
            options,
            window: None,
            context: None,
            sandbox: None,
            queue: EventQueue::default(),
            cursor: (0.0, 0.0),
            start: now,
            next_tick: now,
            frame_index: 0,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.options.title.clone())
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );
        self.window = Some(window.clone());

        let (width, height) = window.inner_size().into();
        let engine = pollster::block_on(RenderEngine::new(window, width, height, &self.options))?;

        let mut context = SandboxContext {
            engine,
            textures: TextureManager::new(),
        };
        let sandbox = S::init(&mut context).context("sandbox initialization failed")?;

        self.context = Some(context);
        self.sandbox = Some(sandbox);
        self.start = Instant::now();
        self.next_tick = self.start;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    /// Hands every queued event to the sandbox. Returns false if it asked to exit.
    fn dispatch_events(&mut self) -> bool {
        let (Some(context), Some(sandbox)) = (self.context.as_mut(), self.sandbox.as_mut()) else {
            return true;
        };
        while let Some(event) = self.queue.pop() {
            if sandbox.handle_event(&event, context) == EventResponse::Exit {
                return false;
            }
        }
        true
    }

    fn render(&mut self) {
        let (Some(context), Some(sandbox)) = (self.context.as_mut(), self.sandbox.as_mut()) else {
            return;
        };
        if !context.engine.begin_frame() {
            return;
        }

        let frame = FrameInfo {
            elapsed: self.start.elapsed(),
            frame_index: self.frame_index,
        };
        sandbox.render(context, &frame);
        context.engine.end_frame();
        self.frame_index += 1;
    }
}

impl<S: Sandbox> ApplicationHandler for AppState<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.queue.push(AppEvent::KeyPress {
                    key,
                    cursor: self.cursor,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                self.queue.push(AppEvent::MouseMove {
                    x: position.x,
                    y: position.y,
                });
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(context) = self.context.as_mut() {
                    context.engine.resize(width, height);
                }
                self.queue.push(AppEvent::Resize { width, height });
            }
            WindowEvent::RedrawRequested => {
                if !self.dispatch_events() {
                    event_loop.exit();
                    return;
                }
                self.render();
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_tick {
            self.queue.push(AppEvent::FrameTick);
            if let Some(window) = self.window.as_ref() {
                window.request_redraw();
            }
            self.next_tick += self.options.frame_interval;
            // fell behind: don't try to catch up
            if self.next_tick < now {
                self.next_tick = now + self.options.frame_interval;
            }
        }

        if !self.dispatch_events() {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue_is_fifo() {
        let mut queue = EventQueue::default();
        queue.push(AppEvent::MouseMove { x: 1.0, y: 2.0 });
        queue.push(AppEvent::KeyPress {
            key: KeyCode::KeyW,
            cursor: (1.0, 2.0),
        });
        queue.push(AppEvent::FrameTick);
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some(AppEvent::MouseMove { x: 1.0, y: 2.0 }));
        assert!(matches!(queue.pop(), Some(AppEvent::KeyPress { key: KeyCode::KeyW, .. })));
        assert_eq!(queue.pop(), Some(AppEvent::FrameTick));
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_frame_info_millis() {
        let frame = FrameInfo {
            elapsed: Duration::from_millis(1500),
            frame_index: 45,
        };
        assert!((frame.elapsed_millis() - 1500.0).abs() < 1e-3);
    }
}

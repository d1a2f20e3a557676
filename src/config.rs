use std::time::Duration;

pub const APP_NAME: &str = "Prism Sandbox";

/// `env_logger` filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default window size
pub const DEFAULT_WINDOW_SIZE: [u32; 2] = [1024, 1024];

/// Redraw cadence when vsync does not pace the loop, about 30 fps
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub const DEFAULT_CLEAR_COLOR: [f64; 4] = [0.2, 0.3, 0.3, 1.0];

/// Window and presentation settings for [`SandboxApp`](crate::app::SandboxApp).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Time between `FrameTick` events
    pub frame_interval: Duration,
    pub clear_color: [f64; 4],
    pub vsync: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: APP_NAME.to_string(),
            width: DEFAULT_WINDOW_SIZE[0],
            height: DEFAULT_WINDOW_SIZE[1],
            frame_interval: DEFAULT_FRAME_INTERVAL,
            clear_color: DEFAULT_CLEAR_COLOR,
            vsync: true,
        }
    }
}

impl WindowOptions {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn with_clear_color(mut self, color: [f64; 4]) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WindowOptions::default();
        assert_eq!((options.width, options.height), (1024, 1024));
        assert_eq!(options.frame_interval, Duration::from_millis(33));
        assert!(options.vsync);
    }

    #[test]
    fn test_builder_overrides() {
        let options = WindowOptions::default()
            .with_title("cubes")
            .with_size(800, 600)
            .with_vsync(false);
        assert_eq!(options.title, "cubes");
        assert_eq!((options.width, options.height), (800, 600));
        assert!(!options.vsync);
        assert_eq!(options.clear_color, DEFAULT_CLEAR_COLOR);
    }
}

use crate::constants::{DEFAULT_FPS, DEFAULT_LEADERBOARD_URL, REQUEST_TIMEOUT_MS};

/// Runtime settings. Built once at startup and handed to whoever needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub fps: u32,
    pub leaderboard_url: String,
    pub request_timeout_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            leaderboard_url: DEFAULT_LEADERBOARD_URL.to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }
}

impl GameConfig {
    /// Applies one `key=value` override. Unknown keys and unusable values
    /// leave the setting alone.
    pub fn apply(&mut self, key: &str, value: &str) {
        match key {
            "fps" => {
                if let Ok(fps) = value.parse::<u32>() {
                    if (1..=240).contains(&fps) {
                        self.fps = fps;
                    }
                }
            }
            "scores" => {
                let url = value.trim().trim_end_matches('/');
                if url.starts_with("http://") || url.starts_with("https://") {
                    self.leaderboard_url = url.to_string();
                }
            }
            "timeout" => {
                if let Ok(ms) = value.parse::<u32>() {
                    if ms > 0 {
                        self.request_timeout_ms = ms;
                    }
                }
            }
            _ => {}
        }
    }

    /// Milliseconds between simulation frames.
    pub fn frame_interval(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Defaults overridden by the page's query string.
    pub fn from_location() -> Self {
        let mut config = Self::default();
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) {
            for key in ["fps", "scores", "timeout"] {
                if let Some(value) = params.get(key) {
                    config.apply(key, &value);
                }
            }
        }
        config
    }
}

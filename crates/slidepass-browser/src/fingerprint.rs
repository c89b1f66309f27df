use rand::Rng;
use slidepass_core::BrowserConfig;

/// Common desktop user agents
const USER_AGENTS: [&str; 3] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
];

/// Browser identity presented to the puzzle page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintConfig {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl FingerprintConfig {
    /// Pick a user agent at random and shave a few pixels off the configured window,
    /// so consecutive sessions do not share an identical viewport.
    pub fn randomized<R: Rng + ?Sized>(config: &BrowserConfig, rng: &mut R) -> Self {
        let ua_idx = rng.gen_range(0..USER_AGENTS.len());

        Self {
            user_agent: USER_AGENTS[ua_idx].to_string(),
            viewport_width: config.window_width.saturating_sub(rng.gen_range(0..=16)),
            viewport_height: config.window_height.saturating_sub(rng.gen_range(0..=16)),
        }
    }
}

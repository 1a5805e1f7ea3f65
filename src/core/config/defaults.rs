use std::time::Duration;

use crate::core::config::data::Config;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_INPUT_CHARS: usize = 500;
pub const DEFAULT_THEME: &str = "dark";

/// Environment variable that overrides the configured backend URL.
pub const BASE_URL_ENV: &str = "ASKBOX_BASE_URL";

impl Config {
    /// Backend URL with precedence: CLI flag, environment, config file, default.
    pub fn resolve_base_url(&self, cli_override: Option<&str>, env_value: Option<String>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| env_value.filter(|value| !value.trim().is_empty()))
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_INPUT_CHARS)
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {DEFAULT_BASE_URL})"),
        }
        match self.timeout_secs {
            Some(secs) => println!("  timeout: {secs}s"),
            None => println!("  timeout: (unset, using {DEFAULT_TIMEOUT_SECS}s)"),
        }
        match self.max_input_chars {
            Some(max) => println!("  max-input: {max}"),
            None => println!("  max-input: (unset, using {DEFAULT_MAX_INPUT_CHARS})"),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset, using {DEFAULT_THEME})"),
        }
    }
}

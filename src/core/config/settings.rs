//! `askbox set` / `askbox unset` key handling.

use std::fmt;

use crate::core::config::data::Config;
use crate::ui::theme::Theme;

pub const SETTING_KEYS: &[&str] = &["base-url", "timeout", "max-input", "theme"];

/// Errors that can occur when modifying configuration settings.
#[derive(Debug, PartialEq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The value does not fit the key.
    InvalidValue {
        key: &'static str,
        input: String,
        hint: &'static str,
    },
    /// Required arguments are missing.
    MissingArgs {
        hint: &'static str,
        example: &'static str,
    },
}

impl SettingError {
    /// Print the error message to stderr with appropriate formatting.
    pub fn print(&self) {
        match self {
            SettingError::UnknownKey(key) => {
                eprintln!("❌ Unknown config key: {key}");
                eprintln!("   Known keys: {}", SETTING_KEYS.join(", "));
            }
            SettingError::InvalidValue { key, input, hint } => {
                eprintln!("❌ Invalid value for {key}: {input}");
                eprintln!("   {hint}");
            }
            SettingError::MissingArgs { hint, example } => {
                eprintln!("⚠️  {hint}");
                eprintln!("Example: {example}");
            }
        }
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidValue { key, input, .. } => {
                write!(f, "Invalid value for {key}: {input}")
            }
            SettingError::MissingArgs { hint, .. } => write!(f, "{hint}"),
        }
    }
}

impl std::error::Error for SettingError {}

fn parse_positive<T>(key: &'static str, input: &str, hint: &'static str) -> Result<T, SettingError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    input
        .parse::<T>()
        .ok()
        .filter(|value| *value > T::default())
        .ok_or_else(|| SettingError::InvalidValue {
            key,
            input: input.to_string(),
            hint,
        })
}

impl Config {
    /// Apply `askbox set <key> <value>`; returns the confirmation line.
    pub fn apply_setting(&mut self, key: &str, value: Option<&str>) -> Result<String, SettingError> {
        let value = value.map(str::trim).filter(|value| !value.is_empty());
        match key {
            "base-url" => {
                let Some(url) = value else {
                    return Err(SettingError::MissingArgs {
                        hint: "Specify the backend URL",
                        example: "askbox set base-url http://127.0.0.1:5000",
                    });
                };
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(SettingError::InvalidValue {
                        key: "base-url",
                        input: url.to_string(),
                        hint: "The URL must start with http:// or https://",
                    });
                }
                self.base_url = Some(url.to_string());
                Ok(format!("✅ Set base-url to: {url}"))
            }
            "timeout" => {
                let Some(raw) = value else {
                    return Err(SettingError::MissingArgs {
                        hint: "Specify the request timeout in seconds",
                        example: "askbox set timeout 30",
                    });
                };
                let secs: u64 =
                    parse_positive("timeout", raw, "Use a whole number of seconds above zero")?;
                self.timeout_secs = Some(secs);
                Ok(format!("✅ Set timeout to: {secs}s"))
            }
            "max-input" => {
                let Some(raw) = value else {
                    return Err(SettingError::MissingArgs {
                        hint: "Specify the maximum question length in characters",
                        example: "askbox set max-input 500",
                    });
                };
                let max: usize =
                    parse_positive("max-input", raw, "Use a whole number of characters above zero")?;
                self.max_input_chars = Some(max);
                Ok(format!("✅ Set max-input to: {max}"))
            }
            "theme" => {
                let Some(name) = value else {
                    return Err(SettingError::MissingArgs {
                        hint: "Specify a theme name",
                        example: "askbox set theme light",
                    });
                };
                if Theme::by_name(name).is_none() {
                    return Err(SettingError::InvalidValue {
                        key: "theme",
                        input: name.to_string(),
                        hint: "Available themes: dark, light, high-contrast",
                    });
                }
                self.theme = Some(name.to_ascii_lowercase());
                Ok(format!("✅ Set theme to: {}", name.to_ascii_lowercase()))
            }
            other => Err(SettingError::UnknownKey(other.to_string())),
        }
    }

    /// Apply `askbox unset <key>`; returns the confirmation line.
    pub fn unset_setting(&mut self, key: &str) -> Result<String, SettingError> {
        match key {
            "base-url" => self.base_url = None,
            "timeout" => self.timeout_secs = None,
            "max-input" => self.max_input_chars = None,
            "theme" => self.theme = None,
            other => return Err(SettingError::UnknownKey(other.to_string())),
        }
        Ok(format!("✅ Unset {key}"))
    }
}

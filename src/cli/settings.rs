//! `set`, `unset` and `config` subcommands

use std::error::Error;

use crate::core::config::data::path_display;
use crate::core::config::{Config, SettingError};

/// Apply a setting and persist it. Returns the confirmation line.
pub fn set_value(
    config: &mut Config,
    key: &str,
    value: Option<Vec<String>>,
) -> Result<String, SettingError> {
    let joined = value.map(|parts| parts.join(" "));
    config.apply_setting(key, joined.as_deref())
}

pub fn run_set(key: String, value: Option<Vec<String>>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match set_value(&mut config, &key, value) {
        Ok(confirmation) => {
            config.save()?;
            println!("{confirmation}");
            Ok(())
        }
        Err(err) => {
            err.print();
            std::process::exit(1);
        }
    }
}

pub fn run_unset(key: String) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match config.unset_setting(&key) {
        Ok(confirmation) => {
            config.save()?;
            println!("{confirmation}");
            Ok(())
        }
        Err(err) => {
            err.print();
            std::process::exit(1);
        }
    }
}

pub fn run_show_config(base_url: &str) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    println!("Config file: {}", path_display(Config::get_config_path()?));
    config.print_all();
    println!("Effective backend URL: {base_url}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_word_values_are_joined() {
        let mut config = Config::default();
        let err = set_value(
            &mut config,
            "theme",
            Some(vec!["high".to_string(), "contrast".to_string()]),
        )
        .expect_err("no theme has a space in its name");
        assert!(matches!(
            err,
            SettingError::InvalidValue { key: "theme", ref input, .. } if input == "high contrast"
        ));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn missing_value_is_reported() {
        let mut config = Config::default();
        assert!(matches!(
            set_value(&mut config, "timeout", None),
            Err(SettingError::MissingArgs { .. })
        ));
        assert_eq!(
            set_value(&mut config, "timeout", Some(vec!["45".to_string()])),
            Ok("✅ Set timeout to: 45s".to_string())
        );
    }
}

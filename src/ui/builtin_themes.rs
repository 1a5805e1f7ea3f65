use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeSpec {
    pub id: String,
    pub display_name: String,
    pub background: Option<String>,
    pub title: Option<String>,
    pub header_meta: Option<String>,
    pub user_label: Option<String>,
    pub user_text: Option<String>,
    pub bot_label: Option<String>,
    pub bot_text: Option<String>,
    pub error_text: Option<String>,
    pub contact: Option<String>,
    pub contact_bar: Option<String>,
    pub link: Option<String>,
    pub badge: Option<String>,
    pub typing: Option<String>,
    pub chip: Option<String>,
    pub chip_selected: Option<String>,
    pub input_border: Option<String>,
    pub input_text: Option<String>,
    pub input_cursor_modifiers: Option<String>,
    pub placeholder: Option<String>,
    pub counter_normal: Option<String>,
    pub counter_warning: Option<String>,
    pub counter_error: Option<String>,
    pub notice_info: Option<String>,
    pub notice_success: Option<String>,
    pub notice_warning: Option<String>,
    pub notice_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuiltinThemesConfig {
    themes: Vec<ThemeSpec>,
}

pub fn load_builtin_themes() -> Vec<ThemeSpec> {
    const CONFIG_CONTENT: &str = include_str!("../builtin_themes.toml");
    let config: BuiltinThemesConfig =
        toml::from_str(CONFIG_CONTENT).expect("Failed to parse builtin_themes.toml");
    config.themes
}

pub fn find_builtin_theme(id: &str) -> Option<ThemeSpec> {
    load_builtin_themes()
        .into_iter()
        .find(|t| t.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_has_expected_builtins() {
        let themes = load_builtin_themes();
        let ids: Vec<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["dark", "light", "high-contrast"]);
        assert!(themes.iter().all(|t| t.background.is_some()));
    }

    #[test]
    fn find_builtin_theme_works_case_insensitive() {
        let t = find_builtin_theme("LiGhT").expect("should find 'light'");
        assert_eq!(t.id, "light");
        assert!(find_builtin_theme("neon").is_none());
    }
}

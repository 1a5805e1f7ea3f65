use crate::core::app::CounterLevel;
use crate::core::notification::Severity;
use crate::ui::builtin_themes::{find_builtin_theme, ThemeSpec};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Header
    pub title_style: Style,
    pub header_meta_style: Style,

    // Transcript
    pub user_label_style: Style,
    pub user_text_style: Style,
    pub bot_label_style: Style,
    pub bot_text_style: Style,
    pub error_text_style: Style,
    pub contact_style: Style,
    pub contact_bar_style: Style,
    pub link_style: Style,
    pub badge_style: Style,
    pub typing_style: Style,

    // Suggestion chips
    pub chip_style: Style,
    pub chip_selected_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub placeholder_style: Style,
    pub counter_normal_style: Style,
    pub counter_warning_style: Style,
    pub counter_error_style: Style,

    // Notifications
    pub notice_info_style: Style,
    pub notice_success_style: Style,
    pub notice_warning_style: Style,
    pub notice_error_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        // Prefer built-in spec for consistent RGB colors
        if let Some(spec) = find_builtin_theme("dark") {
            return Self::from_spec(&spec);
        }
        // Fallback palette-based theme
        Self::palette(Color::Black, Color::White, Color::Cyan, Color::DarkGray)
    }

    /// Look up a built-in theme, ignoring case.
    pub fn by_name(name: &str) -> Option<Self> {
        find_builtin_theme(name.trim()).map(|spec| Self::from_spec(&spec))
    }

    fn palette(background: Color, text: Color, accent: Color, muted: Color) -> Self {
        let fg = |color: Color| Style::default().fg(color);
        Theme {
            background_color: background,
            title_style: fg(accent).add_modifier(Modifier::BOLD),
            header_meta_style: fg(muted),
            user_label_style: fg(accent).add_modifier(Modifier::BOLD),
            user_text_style: fg(text),
            bot_label_style: fg(Color::Green).add_modifier(Modifier::BOLD),
            bot_text_style: fg(text),
            error_text_style: fg(Color::Red),
            contact_style: fg(Color::Yellow),
            contact_bar_style: fg(Color::Yellow).add_modifier(Modifier::BOLD),
            link_style: fg(accent).add_modifier(Modifier::UNDERLINED),
            badge_style: fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            typing_style: fg(muted).add_modifier(Modifier::ITALIC),
            chip_style: fg(text),
            chip_selected_style: fg(background).add_modifier(Modifier::REVERSED),
            input_border_style: fg(muted),
            input_text_style: fg(text),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            placeholder_style: fg(muted).add_modifier(Modifier::ITALIC),
            counter_normal_style: fg(muted),
            counter_warning_style: fg(Color::Yellow),
            counter_error_style: fg(Color::Red).add_modifier(Modifier::BOLD),
            notice_info_style: fg(accent),
            notice_success_style: fg(Color::Green),
            notice_warning_style: fg(Color::Yellow),
            notice_error_style: fg(Color::Red),
        }
    }

    pub fn counter_style(&self, level: CounterLevel) -> Style {
        match level {
            CounterLevel::Normal => self.counter_normal_style,
            CounterLevel::Warning => self.counter_warning_style,
            CounterLevel::Error => self.counter_error_style,
        }
    }

    pub fn notice_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => self.notice_info_style,
            Severity::Success => self.notice_success_style,
            Severity::Warning => self.notice_warning_style,
            Severity::Error => self.notice_error_style,
        }
    }

    pub fn from_spec(spec: &ThemeSpec) -> Self {
        fn parse_style(s: &Option<String>) -> Style {
            let mut style = Style::default();
            if let Some(ref spec) = s {
                for tok in style_tokens(spec) {
                    if let Some(color) = parse_color(tok) {
                        style = style.fg(color);
                    } else {
                        style = apply_modifier(style, tok);
                    }
                }
            }
            style
        }

        let background_color = spec
            .background
            .as_deref()
            .and_then(parse_color)
            .unwrap_or(Color::Black);

        Theme {
            background_color,
            title_style: parse_style(&spec.title),
            header_meta_style: parse_style(&spec.header_meta),
            user_label_style: parse_style(&spec.user_label),
            user_text_style: parse_style(&spec.user_text),
            bot_label_style: parse_style(&spec.bot_label),
            bot_text_style: parse_style(&spec.bot_text),
            error_text_style: parse_style(&spec.error_text),
            contact_style: parse_style(&spec.contact),
            contact_bar_style: parse_style(&spec.contact_bar),
            link_style: parse_style(&spec.link),
            badge_style: parse_style(&spec.badge),
            typing_style: parse_style(&spec.typing),
            chip_style: parse_style(&spec.chip),
            chip_selected_style: parse_style(&spec.chip_selected),
            input_border_style: parse_style(&spec.input_border),
            input_text_style: parse_style(&spec.input_text),
            input_cursor_style: {
                let mut s = Style::default();
                if let Some(ref mods) = spec.input_cursor_modifiers {
                    for tok in mods.split(',').map(|t| t.trim()) {
                        s = apply_modifier(s, tok);
                    }
                }
                s
            },
            placeholder_style: parse_style(&spec.placeholder),
            counter_normal_style: parse_style(&spec.counter_normal),
            counter_warning_style: parse_style(&spec.counter_warning),
            counter_error_style: parse_style(&spec.counter_error),
            notice_info_style: parse_style(&spec.notice_info),
            notice_success_style: parse_style(&spec.notice_success),
            notice_warning_style: parse_style(&spec.notice_warning),
            notice_error_style: parse_style(&spec.notice_error),
        }
    }
}

/// Comma-separated tokens, keeping commas inside `rgb(...)` together.
fn style_tokens(spec: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in spec.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&spec[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&spec[start..]);
    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn apply_modifier(style: Style, token: &str) -> Style {
    match token.to_ascii_lowercase().as_str() {
        "bold" => style.add_modifier(Modifier::BOLD),
        "reversed" => style.add_modifier(Modifier::REVERSED),
        "italic" => style.add_modifier(Modifier::ITALIC),
        "underlined" => style.add_modifier(Modifier::UNDERLINED),
        "dim" => style.add_modifier(Modifier::DIM),
        _ => style,
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    // Hex: #rgb or #rrggbb
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-grey" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "light_red" | "light-red" => Some(Color::LightRed),
        "green" => Some(Color::Green),
        "light_green" | "light-green" => Some(Color::LightGreen),
        "blue" => Some(Color::Blue),
        "light_blue" | "light-blue" => Some(Color::LightBlue),
        "cyan" => Some(Color::Cyan),
        "light_cyan" | "light-cyan" => Some(Color::LightCyan),
        "magenta" => Some(Color::Magenta),
        "light_magenta" | "light-magenta" => Some(Color::LightMagenta),
        "yellow" => Some(Color::Yellow),
        "light_yellow" | "light-yellow" => Some(Color::LightYellow),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

fn parse_rgb_func(s: &str) -> Option<Color> {
    // Format: rgb(r,g,b)
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_ignores_case_and_rejects_unknown() {
        assert!(Theme::by_name("DARK").is_some());
        assert!(Theme::by_name(" light ").is_some());
        assert!(Theme::by_name("High-Contrast").is_some());
        assert!(Theme::by_name("neon").is_none());
    }

    #[test]
    fn spec_styles_parse_colours_and_modifiers() {
        let spec = ThemeSpec {
            background: Some("#123".to_string()),
            link: Some("rgb(300, 10, 20),underlined".to_string()),
            counter_error: Some("light-red,bold".to_string()),
            input_cursor_modifiers: Some("Reversed".to_string()),
            ..ThemeSpec::default()
        };
        let theme = Theme::from_spec(&spec);

        assert_eq!(theme.background_color, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(
            theme.link_style,
            Style::default()
                .fg(Color::Rgb(255, 10, 20))
                .add_modifier(Modifier::UNDERLINED)
        );
        assert_eq!(
            theme.counter_style(CounterLevel::Error),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD)
        );
        assert_eq!(
            theme.input_cursor_style,
            Style::default().add_modifier(Modifier::REVERSED)
        );
    }

    #[test]
    fn style_tokens_keep_rgb_arguments_together() {
        assert_eq!(
            style_tokens("rgb(1, 2, 3), bold,,italic"),
            vec!["rgb(1, 2, 3)", "bold", "italic"]
        );
        assert_eq!(style_tokens("cyan"), vec!["cyan"]);
        assert!(style_tokens(" , ").is_empty());
    }

    #[test]
    fn unknown_background_falls_back_to_black() {
        let spec = ThemeSpec {
            background: Some("#zzzzzz".to_string()),
            ..ThemeSpec::default()
        };
        assert_eq!(Theme::from_spec(&spec).background_color, Color::Black);
    }

    #[test]
    fn counter_levels_map_to_distinct_styles() {
        let theme = Theme::dark_default();
        assert_ne!(
            theme.counter_style(CounterLevel::Normal),
            theme.counter_style(CounterLevel::Warning)
        );
        assert_ne!(
            theme.counter_style(CounterLevel::Warning),
            theme.counter_style(CounterLevel::Error)
        );
    }
}

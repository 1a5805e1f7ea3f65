//! Turns the message list into styled, pre-wrapped terminal lines.
//!
//! Wrapping happens here rather than in ratatui so the renderer knows the
//! exact number of rows the transcript occupies and can clamp scrolling.

use std::time::Instant;

use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::app::{App, TypingIndicator};
use crate::core::format::{Run, RunKind};
use crate::core::message::{match_badge_label, Message, MessageKind, Sender};
use crate::ui::theme::Theme;

pub const TYPING_LABEL: &str = "AI is thinking";
const DOT_FRAME_MS: u128 = 400;
const CONTACT_BAR: &str = "┃ ";

/// Every transcript row for the current state, wrapped to `width`.
pub fn build_transcript_lines(app: &App, width: u16, now: Instant) -> Vec<Line<'static>> {
    let theme = &app.ui.theme;
    let mut lines = Vec::new();
    for message in &app.messages {
        lines.extend(message_lines(message, theme));
        lines.push(Line::default());
    }
    if let Some(typing) = &app.typing {
        lines.push(header_line(Sender::Bot, None, None, theme));
        lines.push(typing_line(typing, now, theme));
    }
    wrap_lines(&lines, width)
}

pub fn message_lines(message: &Message, theme: &Theme) -> Vec<Line<'static>> {
    let base = match (message.sender, message.kind) {
        (_, MessageKind::Error) => theme.error_text_style,
        (_, MessageKind::ContactCard) => theme.contact_style,
        (Sender::User, _) => theme.user_text_style,
        (Sender::Bot, _) => theme.bot_text_style,
    };
    let alignment = if message.sender.is_user() {
        Alignment::Right
    } else {
        Alignment::Left
    };

    let mut lines = vec![header_line(
        message.sender,
        Some(message.time_label()),
        message.match_badge,
        theme,
    )];

    let formatted = message.formatted();
    for (index, runs) in formatted.lines().into_iter().enumerate() {
        let mut spans = Vec::with_capacity(runs.len() + 1);
        match message.kind {
            MessageKind::ContactCard => {
                spans.push(Span::styled(CONTACT_BAR, theme.contact_bar_style));
            }
            MessageKind::Error if index == 0 => {
                spans.push(Span::styled("⚠ ", base.add_modifier(Modifier::BOLD)));
            }
            _ => {}
        }
        spans.extend(runs.into_iter().map(|run| run_span(run, base, theme)));
        lines.push(Line::from(spans).alignment(alignment));
    }
    lines
}

fn header_line(
    sender: Sender,
    time: Option<String>,
    badge: Option<u8>,
    theme: &Theme,
) -> Line<'static> {
    let (label, style, alignment) = match sender {
        Sender::User => ("You", theme.user_label_style, Alignment::Right),
        Sender::Bot => ("Bot", theme.bot_label_style, Alignment::Left),
    };
    let mut spans = vec![Span::styled(label, style)];
    if let Some(time) = time {
        spans.push(Span::styled(format!(" · {time}"), theme.header_meta_style));
    }
    if let Some(percent) = badge {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", match_badge_label(percent)),
            theme.badge_style,
        ));
    }
    Line::from(spans).alignment(alignment)
}

fn run_span(run: &Run, base: Style, theme: &Theme) -> Span<'static> {
    let mut style = match run.kind {
        RunKind::Link => base.patch(theme.link_style),
        _ => base,
    };
    if run.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if run.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    Span::styled(run.text.clone(), style)
}

/// "AI is thinking" followed by one to three dots, cycling over time.
pub fn typing_line(typing: &TypingIndicator, now: Instant, theme: &Theme) -> Line<'static> {
    let elapsed = now.saturating_duration_since(typing.started).as_millis();
    let dots = (elapsed / DOT_FRAME_MS % 3) as usize + 1;
    Line::from(vec![
        Span::styled(TYPING_LABEL, theme.typing_style),
        Span::styled(format!("{:<3}", ".".repeat(dots)), theme.typing_style),
    ])
}

/// Word-wrap styled lines to `width` columns, breaking words longer than a
/// full row. Alignment carries over to every continuation row.
pub fn wrap_lines(lines: &[Line<'static>], width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if width == 0 || line.width() <= width {
            out.push(line.clone());
            continue;
        }
        out.extend(wrap_line(line, width));
    }
    out
}

fn wrap_line(line: &Line<'static>, width: usize) -> Vec<Line<'static>> {
    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    let finish = |current: &mut Vec<Span<'static>>, rows: &mut Vec<Line<'static>>| {
        let mut row = Line::from(std::mem::take(current));
        row.alignment = line.alignment;
        rows.push(row);
    };

    for span in &line.spans {
        for segment in segments(&span.content) {
            let is_space = segment.starts_with(char::is_whitespace);
            let segment_width = segment.width();

            if is_space {
                if current_width == 0 && !rows.is_empty() {
                    continue;
                }
                if current_width + segment_width > width {
                    finish(&mut current, &mut rows);
                    current_width = 0;
                    continue;
                }
                push_text(&mut current, segment, span.style);
                current_width += segment_width;
                continue;
            }

            if current_width + segment_width <= width {
                push_text(&mut current, segment, span.style);
                current_width += segment_width;
                continue;
            }
            if segment_width <= width {
                finish(&mut current, &mut rows);
                push_text(&mut current, segment, span.style);
                current_width = segment_width;
                continue;
            }

            for ch in segment.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && current_width > 0 {
                    finish(&mut current, &mut rows);
                    current_width = 0;
                }
                let mut buf = [0; 4];
                push_text(&mut current, ch.encode_utf8(&mut buf), span.style);
                current_width += ch_width;
            }
        }
    }

    if !current.is_empty() || rows.is_empty() {
        finish(&mut current, &mut rows);
    }
    rows
}

/// Split text into alternating runs of whitespace and non-whitespace.
fn segments(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (index, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        if in_space.is_some_and(|previous| previous != space) {
            out.push(&text[start..index]);
            start = index;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if let Some(last) = spans.last_mut() {
        if last.style == style {
            last.content.to_mut().push_str(text);
            return;
        }
    }
    spans.push(Span::styled(text.to_string(), style));
}

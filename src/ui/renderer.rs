use std::time::Instant;

use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;
use crate::core::message::clock_label;
use crate::core::notification::Notification;
use crate::ui::transcript::build_transcript_lines;

pub const APP_TITLE: &str = "Admissions Assistant";
const NOTIFICATION_WIDTH: u16 = 48;

pub fn ui(f: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.ui.theme.background_color)),
        area,
    );

    let chips_height = if app.suggestions.is_empty() { 0 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(chips_height),
            Constraint::Length(app.ui.input_rows() + 2), // +2 for borders
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    render_transcript(f, app, chunks[1], now);
    if chips_height > 0 {
        render_suggestions(f, app, chunks[2]);
    }
    render_input(f, app, chunks[3]);
    render_notifications(f, app, area, now);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(Paragraph::new(header_line(app, area.width)), area);
}

/// App name on the left; answered count, backend URL and clock on the right.
pub fn header_line(app: &App, width: u16) -> Line<'static> {
    let theme = &app.ui.theme;
    let title = format!(" {APP_TITLE}");
    let meta = format!(
        "Answered: {} · {} · {} ",
        app.message_count,
        app.base_url,
        clock_label(&Local::now())
    );
    let gap = (width as usize).saturating_sub(title.width() + meta.width());
    let mut spans = vec![Span::styled(title, theme.title_style)];
    if gap > 0 {
        spans.push(Span::raw(" ".repeat(gap)));
        spans.push(Span::styled(meta, theme.header_meta_style));
    }
    Line::from(spans)
}

fn render_transcript(f: &mut Frame, app: &mut App, area: Rect, now: Instant) {
    // One column of padding on each side
    let inner = Rect {
        x: area.x.saturating_add(1),
        width: area.width.saturating_sub(2),
        ..area
    };
    let lines = build_transcript_lines(app, inner.width, now);
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total.saturating_sub(inner.height);
    let offset = app.ui.effective_scroll(max_scroll);

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
}

/// Chips as a single row; `selected` is drawn reversed.
pub fn suggestion_line(app: &App) -> Line<'static> {
    let theme = &app.ui.theme;
    let mut spans = vec![Span::styled(" Try: ", theme.header_meta_style)];
    for (index, suggestion) in app.suggestions.iter().enumerate() {
        let style = if app.ui.selected_suggestion == Some(index) {
            theme.chip_selected_style
        } else {
            theme.chip_style
        };
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{suggestion}]"), style));
    }
    Line::from(spans)
}

fn render_suggestions(f: &mut Frame, app: &App, area: Rect) {
    f.render_widget(Paragraph::new(suggestion_line(app)), area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.ui.theme;
    let counter = Line::from(Span::styled(
        format!(" {} ", app.ui.counter_label()),
        theme.counter_style(app.ui.counter_level()),
    ))
    .alignment(Alignment::Right);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(
            " Ask a question (Enter to send, Alt+Enter for new line, Tab for suggestions, Ctrl+C to quit) ",
            theme.header_meta_style,
        ))
        .title(counter);

    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(app.ui.textarea(), inner);
}

fn render_notifications(f: &mut Frame, app: &App, area: Rect, now: Instant) {
    let theme = &app.ui.theme;
    let mut y = area.y.saturating_add(1);
    for notification in app.notifications.iter() {
        let Some(rect) = notification_rect(notification, area, y, now) else {
            continue;
        };
        y = y.saturating_add(rect.height);
        if rect.bottom() > area.bottom() {
            break;
        }
        let style = theme.notice_style(notification.severity);
        let text = format!(
            "{} {}",
            notification.severity.icon(),
            notification.message
        );
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(text, style))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .style(Style::default().bg(theme.background_color)),
            ),
            rect,
        );
    }
}

/// Where a banner sits this frame. It slides in from the right edge, so the
/// visible width follows the animation phase.
pub fn notification_rect(
    notification: &Notification,
    area: Rect,
    y: u16,
    now: Instant,
) -> Option<Rect> {
    let wanted = (notification.message.width() as u16)
        .saturating_add(6)
        .min(NOTIFICATION_WIDTH)
        .min(area.width);
    let fraction = notification.phase(now).visible_fraction();
    let visible = (f32::from(wanted) * fraction).round() as u16;
    if visible == 0 {
        return None;
    }
    Some(Rect {
        x: area.right().saturating_sub(visible),
        y,
        width: visible,
        height: 3,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notification::{Severity, SLIDE_DURATION, VISIBLE_DURATION};
    use crate::utils::test_utils::create_test_app;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn draws_header_transcript_chips_and_counter() {
        let mut app = create_test_app();
        app.replace_suggestions(vec!["Deadlines?".to_string()]);
        app.submit_question("When is the deadline?").expect("command");
        app.ui.set_input_text("abc");

        let mut terminal = Terminal::new(TestBackend::new(120, 20)).expect("terminal");
        terminal.draw(|f| ui(f, &mut app)).expect("draw");
        let text = screen_text(&terminal);

        assert!(text.contains(APP_TITLE));
        assert!(text.contains("Answered: 0"));
        assert!(text.contains("http://qa.test"));
        assert!(text.contains("When is the deadline?"));
        assert!(text.contains("AI is thinking"));
        assert!(text.contains("[Deadlines?]"));
        assert!(text.contains("3/500"));
    }

    #[test]
    fn transcript_follows_bottom_until_user_scrolls() {
        let mut app = create_test_app();
        for n in 0..30 {
            app.submit_question(&format!("question {n}")).expect("command");
        }
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        terminal.draw(|f| ui(f, &mut app)).expect("draw");
        assert!(app.ui.auto_scroll);
        assert!(app.ui.last_max_scroll > 0);
        assert_eq!(app.ui.scroll_offset, app.ui.last_max_scroll);
        assert!(screen_text(&terminal).contains("question 29"));

        app.ui.scroll_up(app.ui.last_max_scroll);
        terminal.draw(|f| ui(f, &mut app)).expect("draw");
        assert_eq!(app.ui.scroll_offset, 0);
        assert!(screen_text(&terminal).contains("question 0"));
    }

    #[test]
    fn selected_chip_uses_selected_style() {
        let mut app = create_test_app();
        app.replace_suggestions(vec!["a".to_string(), "b".to_string()]);
        app.ui.selected_suggestion = Some(1);
        let line = suggestion_line(&app);
        let chip = line
            .spans
            .iter()
            .find(|s| s.content == "[b]")
            .expect("chip");
        assert_eq!(chip.style, app.ui.theme.chip_selected_style);
    }

    #[test]
    fn notifications_slide_in_and_out_from_the_right() {
        let mut app = create_test_app();
        let start = Instant::now();
        app.notifications.push("Please enter a question", Severity::Warning, start);
        let banner = app.notifications.iter().next().expect("banner");
        let area = Rect::new(0, 0, 100, 30);

        let entering = notification_rect(banner, area, 1, start + SLIDE_DURATION / 2)
            .expect("partly visible");
        let shown = notification_rect(banner, area, 1, start + Duration::from_secs(1))
            .expect("fully visible");
        assert!(entering.width < shown.width);
        assert_eq!(shown.right(), area.right());
        assert_eq!(
            notification_rect(banner, area, 1, start + VISIBLE_DURATION + SLIDE_DURATION),
            None
        );
    }
}

//! Lightweight markup for chat messages.
//!
//! Messages may carry raw URLs, newlines, `**bold**` and `*italic*` markers.
//! [`format_message`] runs a fixed, ordered list of [`FormatRule`]s over the
//! text. Each rule sees the whole message as produced by the rules before it:
//! links and line breaks are opaque to later rules, so emphasis may wrap them
//! but a link's own text is never rewritten. The resulting [`FormattedText`]
//! can be drawn as terminal spans, printed as plain text, or exported as HTML
//! markup.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Text,
    Link,
    LineBreak,
}

/// A contiguous piece of formatted output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub kind: RunKind,
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: RunKind::Text,
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Plain text that later rules are still allowed to rewrite.
    fn is_open_text(&self) -> bool {
        self.kind == RunKind::Text
    }

    fn with_text(&self, text: &str) -> Self {
        Self {
            kind: self.kind,
            text: text.to_string(),
            bold: self.bold,
            italic: self.italic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
}

impl Emphasis {
    fn apply_to(self, run: &mut Run) {
        match self {
            Emphasis::Bold => run.bold = true,
            Emphasis::Italic => run.italic = true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RuleAction {
    /// The match becomes a link run.
    Link,
    /// The match becomes a line break.
    LineBreak,
    /// Markers are dropped and everything captured in group 1 is emphasised.
    Emphasis(Emphasis),
}

/// Stand-in for a link or line break while a rule scans the message.
const OPAQUE: char = '\u{FFFC}';

/// The runs laid end to end as one string, with every closed run reduced to
/// a single [`OPAQUE`] character.
struct Flattened<'a> {
    runs: &'a [Run],
    text: String,
    starts: Vec<usize>,
}

impl<'a> Flattened<'a> {
    fn new(runs: &'a [Run]) -> Self {
        let mut text = String::new();
        let mut starts = Vec::with_capacity(runs.len());
        for run in runs {
            starts.push(text.len());
            if run.is_open_text() {
                text.push_str(&run.text);
            } else {
                text.push(OPAQUE);
            }
        }
        Self { runs, text, starts }
    }

    fn spans(&self) -> impl Iterator<Item = (&'a Run, Range<usize>)> + '_ {
        let runs: &'a [Run] = self.runs;
        runs.iter().enumerate().map(move |(index, run)| {
            let start = self.starts[index];
            let end = self
                .starts
                .get(index + 1)
                .copied()
                .unwrap_or(self.text.len());
            (run, start..end)
        })
    }

    /// Emphasis already in effect at byte `pos`.
    fn style_at(&self, pos: usize) -> (bool, bool) {
        self.spans()
            .find(|(_, span)| span.contains(&pos))
            .map(|(run, _)| (run.bold, run.italic))
            .unwrap_or_default()
    }

    /// Push the runs covering `range`, cutting open text at its edges.
    fn copy_into(&self, range: Range<usize>, out: &mut Vec<Run>, emphasis: Option<Emphasis>) {
        for (run, span) in self.spans() {
            let lo = range.start.max(span.start);
            let hi = range.end.min(span.end);
            if lo >= hi {
                continue;
            }
            let mut piece = if run.is_open_text() {
                run.with_text(&run.text[lo - span.start..hi - span.start])
            } else {
                run.clone()
            };
            if let Some(emphasis) = emphasis {
                emphasis.apply_to(&mut piece);
            }
            out.push(piece);
        }
    }
}

/// One rewrite step over the whole message.
pub struct FormatRule {
    pub name: &'static str,
    pattern: Regex,
    action: RuleAction,
}

impl FormatRule {
    fn new(name: &'static str, pattern: &str, action: RuleAction) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("format rule patterns are valid"),
            action,
        }
    }

    pub fn apply(&self, runs: Vec<Run>) -> Vec<Run> {
        let flat = Flattened::new(&runs);
        let mut out = Vec::with_capacity(runs.len());
        let mut cursor = 0;

        for caps in self.pattern.captures_iter(&flat.text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            flat.copy_into(cursor..whole.start(), &mut out, None);
            match self.action {
                RuleAction::Link => {
                    let (bold, italic) = flat.style_at(whole.start());
                    out.push(Run {
                        kind: RunKind::Link,
                        text: whole.as_str().to_string(),
                        bold,
                        italic,
                    });
                }
                RuleAction::LineBreak => out.push(Run {
                    kind: RunKind::LineBreak,
                    text: String::new(),
                    bold: false,
                    italic: false,
                }),
                RuleAction::Emphasis(emphasis) => {
                    if let Some(inner) = caps.get(1) {
                        flat.copy_into(inner.range(), &mut out, Some(emphasis));
                    }
                }
            }
            cursor = whole.end();
        }

        flat.copy_into(cursor..flat.text.len(), &mut out, None);
        out
    }
}

static RULES: LazyLock<Vec<FormatRule>> = LazyLock::new(|| {
    vec![
        FormatRule::new("url", r"https?://[^\s\x{FFFC}]+", RuleAction::Link),
        FormatRule::new("newline", r"\n", RuleAction::LineBreak),
        FormatRule::new("bold", r"\*\*(.*?)\*\*", RuleAction::Emphasis(Emphasis::Bold)),
        FormatRule::new("italic", r"\*(.*?)\*", RuleAction::Emphasis(Emphasis::Italic)),
    ]
});

/// The rules in the order [`format_message`] applies them.
pub fn rules() -> &'static [FormatRule] {
    &RULES
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedText {
    pub runs: Vec<Run>,
}

pub fn format_message(text: &str) -> FormattedText {
    let runs = rules()
        .iter()
        .fold(vec![Run::text(text)], |runs, rule| rule.apply(runs));
    FormattedText {
        runs: merge_text_runs(runs),
    }
}

/// Join neighbouring text runs that ended up with the same emphasis.
fn merge_text_runs(runs: Vec<Run>) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(last) = out.last_mut() {
            if last.kind == RunKind::Text
                && run.kind == RunKind::Text
                && last.bold == run.bold
                && last.italic == run.italic
            {
                last.text.push_str(&run.text);
                continue;
            }
        }
        out.push(run);
    }
    out
}

impl FormattedText {
    /// Split the runs at line breaks.
    pub fn lines(&self) -> Vec<Vec<&Run>> {
        let mut lines = vec![Vec::new()];
        for run in &self.runs {
            if run.kind == RunKind::LineBreak {
                lines.push(Vec::new());
            } else if let Some(current) = lines.last_mut() {
                current.push(run);
            }
        }
        lines
    }

    /// Text with markers removed and line breaks restored.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            match run.kind {
                RunKind::LineBreak => out.push('\n'),
                RunKind::Text | RunKind::Link => out.push_str(&run.text),
            }
        }
        out
    }

    /// HTML rendering: links open in a new browsing context, breaks become
    /// `<br>`, emphasis becomes `<strong>`/`<em>`. Tags open and close only
    /// where the emphasis changes, with `<em>` always nested in `<strong>`.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        let (mut bold, mut italic) = (false, false);
        for run in &self.runs {
            if run.bold != bold {
                if italic {
                    out.push_str("</em>");
                    italic = false;
                }
                out.push_str(if run.bold { "<strong>" } else { "</strong>" });
                bold = run.bold;
            }
            if run.italic != italic {
                out.push_str(if run.italic { "<em>" } else { "</em>" });
                italic = run.italic;
            }
            match run.kind {
                RunKind::LineBreak => out.push_str("<br>"),
                RunKind::Text => out.push_str(&escape_html(&run.text)),
                RunKind::Link => {
                    let url = escape_html(&run.text);
                    out.push_str(&format!(r#"<a href="{url}" target="_blank">{url}</a>"#));
                }
            }
        }
        if italic {
            out.push_str("</em>");
        }
        if bold {
            out.push_str("</strong>");
        }
        out
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

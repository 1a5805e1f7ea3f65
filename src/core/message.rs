use chrono::{DateTime, Local};

use crate::api::ContactInfo;
use crate::core::format::{format_message, FormattedText};

/// Shown in place of any contact field the backend leaves out.
pub const CONTACT_PLACEHOLDER: &str = "Not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }

    pub fn is_bot(self) -> bool {
        self == Sender::Bot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Error,
    ContactCard,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Sender,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Match percentage shown next to low-confidence answers.
    pub match_badge: Option<u8>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, MessageKind::Text, content.into())
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, MessageKind::Text, content.into())
    }

    pub fn bot_error(error: &str) -> Self {
        Self::new(
            Sender::Bot,
            MessageKind::Error,
            format!("Sorry, I encountered an error: {error}"),
        )
    }

    pub fn contact_card(info: &ContactInfo) -> Self {
        Self::new(Sender::Bot, MessageKind::ContactCard, contact_card_text(info))
    }

    fn new(sender: Sender, kind: MessageKind, content: String) -> Self {
        Self {
            sender,
            kind,
            content,
            timestamp: Local::now(),
            match_badge: None,
        }
    }

    pub fn with_match_badge(mut self, badge: Option<u8>) -> Self {
        self.match_badge = badge;
        self
    }

    pub fn formatted(&self) -> FormattedText {
        format_message(&self.content)
    }

    pub fn time_label(&self) -> String {
        clock_label(&self.timestamp)
    }
}

/// `hh:mm AM` style label used for message times and the header clock.
pub fn clock_label(time: &DateTime<Local>) -> String {
    time.format("%I:%M %p").to_string()
}

/// Percentage badge for weak matches: present only for `0 < confidence < 0.5`.
pub fn match_badge(confidence: Option<f64>) -> Option<u8> {
    let confidence = confidence?;
    if confidence > 0.0 && confidence < 0.5 {
        Some((confidence * 100.0).round() as u8)
    } else {
        None
    }
}

pub fn match_badge_label(percent: u8) -> String {
    format!("{percent}% match")
}

fn contact_field(value: Option<&str>) -> &str {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(CONTACT_PLACEHOLDER)
}

pub fn contact_card_text(info: &ContactInfo) -> String {
    format!(
        "**Need Human Assistance?**\n📞 {}\n✉️ {}\n🕒 {}",
        contact_field(info.admission_office.as_deref()),
        contact_field(info.email.as_deref()),
        contact_field(info.office_hours.as_deref()),
    )
}

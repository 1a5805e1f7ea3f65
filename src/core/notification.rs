//! Transient banners stacked in the corner of the screen.
//!
//! Each banner is timed on its own: it slides in, stays put, slides out and
//! is then dropped by [`NotificationCenter::prune`]. Nothing here reads the
//! clock directly; callers pass `now` so the timeline is testable.

use std::time::{Duration, Instant};

pub const SLIDE_DURATION: Duration = Duration::from_millis(300);
pub const VISIBLE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Warning => "⚠",
            Severity::Error => "✖",
            Severity::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationPhase {
    /// Sliding in; progress runs from 0.0 to 1.0.
    Entering(f32),
    Shown,
    /// Sliding out; progress runs from 0.0 to 1.0.
    Leaving(f32),
    Expired,
}

impl NotificationPhase {
    /// Fraction of the banner currently on screen.
    pub fn visible_fraction(self) -> f32 {
        match self {
            NotificationPhase::Entering(progress) => progress,
            NotificationPhase::Shown => 1.0,
            NotificationPhase::Leaving(progress) => 1.0 - progress,
            NotificationPhase::Expired => 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

impl Notification {
    pub fn phase(&self, now: Instant) -> NotificationPhase {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < SLIDE_DURATION {
            NotificationPhase::Entering(progress(elapsed, SLIDE_DURATION))
        } else if elapsed < VISIBLE_DURATION {
            NotificationPhase::Shown
        } else if elapsed < VISIBLE_DURATION + SLIDE_DURATION {
            NotificationPhase::Leaving(progress(elapsed - VISIBLE_DURATION, SLIDE_DURATION))
        } else {
            NotificationPhase::Expired
        }
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            message: message.into(),
            severity,
            shown_at: now,
        });
        id
    }

    /// Drop banners whose exit animation has finished. Returns true when
    /// anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| item.phase(now) != NotificationPhase::Expired);
        before != self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True while some banner is mid-animation and needs steady redraws.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.items.iter().any(|item| {
            matches!(
                item.phase(now),
                NotificationPhase::Entering(_) | NotificationPhase::Leaving(_)
            )
        })
    }
}

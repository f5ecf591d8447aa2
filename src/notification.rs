//! Transient toast notifications.
//!
//! A single slot holds the notification currently on screen. Anything that
//! wants to report an outcome (the contact form, the host) calls
//! [`NotificationCenter::notify`]; the previous notification, if any, is
//! dropped on the spot and the new one takes the slot.
//!
//! ## Lifecycle
//!
//! ```text
//! Created ──► Displayed ──► Dismissing ──► Removed
//!                 │  ▲           ▲
//!                 │  └ notify()  │ (exit transition, 300 ms)
//!                 └──────────────┘
//!          close button or 5000 ms timeout, whichever comes first
//! ```
//!
//! Both timers (auto-dismiss and end-of-exit) carry the id of the
//! notification that scheduled them. A timer that fires after its
//! notification was superseded or already dismissed finds a different id or
//! phase in the slot and does nothing, so there is no double removal and
//! calling `notify` from inside a dismissal never corrupts the slot.

use crate::scheduler::{Millis, Scheduler};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a notification; controls icon and background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Info,
        Severity::Warning,
    ];

    /// Parse a severity name. Anything unrecognized is presented as `info`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }

    /// Font Awesome icon name (without the `fa-` prefix).
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Info => "info-circle",
            Severity::Warning => "exclamation-triangle",
        }
    }

    /// Background color of the toast.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Success => "#10b981",
            Severity::Error => "#ef4444",
            Severity::Info => "#3b82f6",
            Severity::Warning => "#f59e0b",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Created,
    Displayed,
    Dismissing,
    Removed,
}

/// Why a notification left the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// The user pressed the close button.
    Manual,
    /// The auto-dismiss timer fired.
    Timeout,
    /// A newer notification took the slot; no exit transition is played.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: Millis,
    pub phase: Phase,
}

/// What the page has to do in response to a lifecycle step.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationChange {
    Shown(Notification),
    ExitStarted {
        id: NotificationId,
        reason: DismissReason,
    },
    Removed {
        id: NotificationId,
        reason: DismissReason,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    AutoDismiss(NotificationId),
    FinishExit(NotificationId, DismissReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTimings {
    pub auto_dismiss_ms: Millis,
    pub exit_ms: Millis,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 5000,
            exit_ms: 300,
        }
    }
}

/// Owner of the single on-screen notification slot.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    timings: NotificationTimings,
    slot: Option<Notification>,
    next_id: u64,
    timers: Scheduler<Timer>,
}

impl NotificationCenter {
    pub fn new(timings: NotificationTimings, now: Millis) -> Self {
        Self {
            timings,
            slot: None,
            next_id: 1,
            timers: Scheduler::new(now),
        }
    }

    /// The notification occupying the slot, if any (displayed or dismissing).
    pub fn current(&self) -> Option<&Notification> {
        self.slot.as_ref()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    /// Replace whatever is on screen with a new notification.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Millis,
    ) -> Vec<NotificationChange> {
        self.timers.advance_to(now);
        let mut changes = Vec::new();

        if let Some(previous) = self.slot.take() {
            tracing::debug!(id = previous.id.0, "notification superseded");
            changes.push(NotificationChange::Removed {
                id: previous.id,
                reason: DismissReason::Superseded,
            });
        }

        let id = NotificationId(self.next_id);
        self.next_id += 1;
        let mut notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: now,
            phase: Phase::Created,
        };

        notification.phase = Phase::Displayed;
        self.timers
            .schedule_in(self.timings.auto_dismiss_ms, Timer::AutoDismiss(id));
        tracing::debug!(id = id.0, severity = %severity, "notification shown");

        changes.push(NotificationChange::Shown(notification.clone()));
        self.slot = Some(notification);
        changes
    }

    /// Close button pressed on notification `id`.
    pub fn dismiss(&mut self, id: NotificationId, now: Millis) -> Vec<NotificationChange> {
        self.timers.advance_to(now);
        self.begin_exit(id, DismissReason::Manual).into_iter().collect()
    }

    /// Close whatever is currently displayed.
    pub fn dismiss_current(&mut self, now: Millis) -> Vec<NotificationChange> {
        match self.slot.as_ref().map(|n| n.id) {
            Some(id) => self.dismiss(id, now),
            None => Vec::new(),
        }
    }

    /// Fire every timer due at or before `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<NotificationChange> {
        let mut changes = Vec::new();
        while let Some((_, timer)) = self.timers.pop_due(now) {
            match timer {
                Timer::AutoDismiss(id) => {
                    changes.extend(self.begin_exit(id, DismissReason::Timeout));
                }
                Timer::FinishExit(id, reason) => {
                    let matches = self
                        .slot
                        .as_ref()
                        .is_some_and(|n| n.id == id && n.phase == Phase::Dismissing);
                    if matches {
                        self.slot = None;
                        tracing::debug!(id = id.0, ?reason, "notification removed");
                        changes.push(NotificationChange::Removed { id, reason });
                    }
                }
            }
        }
        self.timers.advance_to(now);
        changes
    }

    fn begin_exit(
        &mut self,
        id: NotificationId,
        reason: DismissReason,
    ) -> Option<NotificationChange> {
        let notification = self.slot.as_mut().filter(|n| n.id == id)?;
        if notification.phase != Phase::Displayed {
            return None;
        }
        notification.phase = Phase::Dismissing;
        self.timers
            .schedule_in(self.timings.exit_ms, Timer::FinishExit(id, reason));
        tracing::debug!(id = id.0, ?reason, "notification dismissing");
        Some(NotificationChange::ExitStarted { id, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> NotificationCenter {
        NotificationCenter::new(NotificationTimings::default(), 0)
    }

    fn shown_id(changes: &[NotificationChange]) -> NotificationId {
        changes
            .iter()
            .find_map(|c| match c {
                NotificationChange::Shown(n) => Some(n.id),
                _ => None,
            })
            .expect("no Shown change")
    }

    #[test]
    fn severity_presentation_is_fixed() {
        assert_eq!(
            (Severity::Success.icon(), Severity::Success.color()),
            ("check-circle", "#10b981")
        );
        assert_eq!(
            (Severity::Error.icon(), Severity::Error.color()),
            ("exclamation-circle", "#ef4444")
        );
        assert_eq!(
            (Severity::Info.icon(), Severity::Info.color()),
            ("info-circle", "#3b82f6")
        );
        assert_eq!(
            (Severity::Warning.icon(), Severity::Warning.color()),
            ("exclamation-triangle", "#f59e0b")
        );
    }

    #[test]
    fn severity_names_round_trip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::parse(severity.as_str()), severity);
        }
    }

    #[test]
    fn unknown_severity_falls_back_to_info() {
        assert_eq!(Severity::parse("critical"), Severity::Info);
        assert_eq!(Severity::parse(""), Severity::Info);
        assert_eq!(Severity::parse("critical").color(), Severity::Info.color());
    }

    #[test]
    fn notify_displays_immediately() {
        let mut c = center();
        let changes = c.notify("hello", Severity::Success, 10);
        assert_eq!(changes.len(), 1);
        let current = c.current().unwrap();
        assert_eq!(current.message, "hello");
        assert_eq!(current.phase, Phase::Displayed);
        assert_eq!(current.created_at, 10);
    }

    #[test]
    fn second_notify_supersedes_first() {
        let mut c = center();
        let first = shown_id(&c.notify("first", Severity::Info, 0));
        let changes = c.notify("second", Severity::Warning, 100);

        assert_eq!(
            changes[0],
            NotificationChange::Removed {
                id: first,
                reason: DismissReason::Superseded
            }
        );
        assert_eq!(c.current().unwrap().message, "second");
    }

    #[test]
    fn superseded_timer_does_not_touch_new_notification() {
        let mut c = center();
        c.notify("first", Severity::Info, 0);
        c.notify("second", Severity::Info, 3000);

        // First notification's auto-dismiss fires at 5000 and must be ignored.
        assert!(c.advance(5000).is_empty());
        assert_eq!(c.current().unwrap().phase, Phase::Displayed);
        assert_eq!(c.current().unwrap().message, "second");
    }

    #[test]
    fn removed_within_timeout_plus_exit() {
        let mut c = center();
        let id = shown_id(&c.notify("bye", Severity::Info, 0));

        assert!(c.advance(4999).is_empty());
        let changes = c.advance(5000);
        assert_eq!(
            changes,
            vec![NotificationChange::ExitStarted {
                id,
                reason: DismissReason::Timeout
            }]
        );
        assert_eq!(c.current().unwrap().phase, Phase::Dismissing);

        let changes = c.advance(5300);
        assert_eq!(
            changes,
            vec![NotificationChange::Removed {
                id,
                reason: DismissReason::Timeout
            }]
        );
        assert!(c.current().is_none());
    }

    #[test]
    fn single_advance_covers_whole_lifecycle() {
        let mut c = center();
        c.notify("bye", Severity::Info, 0);
        let changes = c.advance(60_000);
        assert_eq!(changes.len(), 2);
        assert!(c.current().is_none());
        assert_eq!(c.next_due(), None);
    }

    #[test]
    fn manual_dismiss_then_timeout_is_noop() {
        let mut c = center();
        let id = shown_id(&c.notify("x", Severity::Error, 0));

        let changes = c.dismiss(id, 1000);
        assert_eq!(
            changes,
            vec![NotificationChange::ExitStarted {
                id,
                reason: DismissReason::Manual
            }]
        );
        let changes = c.advance(1300);
        assert_eq!(
            changes,
            vec![NotificationChange::Removed {
                id,
                reason: DismissReason::Manual
            }]
        );

        // Auto-dismiss timer still fires at 5000 against a removed notification.
        assert!(c.advance(5000).is_empty());
        assert!(c.advance(10_000).is_empty());
        assert!(c.current().is_none());
    }

    #[test]
    fn dismiss_twice_plays_exit_once() {
        let mut c = center();
        let id = shown_id(&c.notify("x", Severity::Info, 0));
        assert_eq!(c.dismiss(id, 100).len(), 1);
        assert!(c.dismiss(id, 150).is_empty());
        assert_eq!(c.advance(400).len(), 1);
    }

    #[test]
    fn notify_during_exit_replaces_without_waiting() {
        let mut c = center();
        let first = shown_id(&c.notify("first", Severity::Info, 0));
        c.dismiss(first, 100);
        let changes = c.notify("second", Severity::Success, 200);
        assert!(matches!(
            changes[0],
            NotificationChange::Removed {
                reason: DismissReason::Superseded,
                ..
            }
        ));

        // The first exit timer at 400 must not remove the second notification.
        assert!(c.advance(400).is_empty());
        assert_eq!(c.current().unwrap().message, "second");
    }

    #[test]
    fn dismiss_unknown_id_is_ignored() {
        let mut c = center();
        c.notify("x", Severity::Info, 0);
        assert!(c.dismiss(NotificationId(999), 10).is_empty());
        assert!(center().dismiss_current(0).is_empty());
    }
}

//! CLI output formatting.
//!
//! # Time-First Display
//!
//! A simulated run is shown as a timeline: every group of effects is headed
//! by the instant it happened, with the effects indented beneath it. Effects
//! that carry markup are shown by what they mean (the toast's text, the
//! particle count) rather than by their HTML, so the output reads as a
//! session log.
//!
//! # Output Format
//!
//! ## Simulate
//!
//! ```text
//! 0ms
//!     inject_style (1024 bytes)
//!     spawn_particles 50
//!     set_text #typing-text ""
//! 1000ms
//!     set_text #typing-text "F"
//! 5500ms
//!     show_notification notification-2 success
//!         Thank you for your message! I'll get back to you soon.
//!
//! 84 effects over 7800ms, 2 notifications
//! ```
//!
//! ## Validate
//!
//! ```text
//! Please fix the following errors:
//!     Name is required
//!     Please enter a valid email address
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::event::Effect;
use crate::form::VALIDATION_HEADER;
use crate::scenario::Timeline;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Strip HTML tags from a string (simple angle-bracket stripping).
fn strip_html_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    result
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

/// One-line description of an effect, plus optional context lines.
fn effect_lines(effect: &Effect) -> Vec<String> {
    match effect {
        Effect::AddClass { target, class } => vec![format!("add_class {target} {class}")],
        Effect::RemoveClass { target, class } => vec![format!("remove_class {target} {class}")],
        Effect::SetText { target, text } => vec![format!("set_text {target} {text:?}")],
        Effect::SetStyle {
            target,
            property,
            value,
        } => vec![format!("set_style {target} {property}: {value}")],
        Effect::ScrollTo { top } => vec![format!("scroll_to {top}")],
        Effect::SpawnParticles { count, .. } => vec![format!("spawn_particles {count}")],
        Effect::ClearParticles => vec!["clear_particles".to_string()],
        Effect::SetParticlesRunning { running } => {
            let state = if *running { "running" } else { "paused" };
            vec![format!("set_particles_running {state}")]
        }
        Effect::ShowNotification { id, severity, html } => {
            let mut lines = vec![format!("show_notification {id} {severity}")];
            lines.extend(
                strip_html_tags(html)
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(|l| format!("{}{}", indent(1), truncate(l, 72))),
            );
            lines
        }
        Effect::StartNotificationExit { id, reason, .. } => {
            vec![format!("start_notification_exit {id} ({reason:?})")]
        }
        Effect::RemoveNotification { id, reason } => {
            vec![format!("remove_notification {id} ({reason:?})")]
        }
        Effect::AppendToBody { html } => {
            vec![format!("append_to_body {}", truncate(html, 48))]
        }
        Effect::InjectStyle { css } => vec![format!("inject_style ({} bytes)", css.len())],
        Effect::SetImageSource { target, src } => {
            vec![format!("set_image_source {target} {src}")]
        }
        Effect::ResetForm => vec!["reset_form".to_string()],
        Effect::RemoveElement { target } => vec![format!("remove_element {target}")],
    }
}

// ============================================================================
// Simulate output
// ============================================================================

/// Format a timeline grouped by instant, followed by a one-line summary.
pub fn format_timeline(timeline: &Timeline) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = None;

    for entry in &timeline.entries {
        if current != Some(entry.at) {
            current = Some(entry.at);
            lines.push(format!("{}ms", entry.at));
        }
        for line in effect_lines(&entry.effect) {
            lines.push(format!("{}{}", indent(1), line));
        }
    }

    let shown = timeline
        .effects()
        .filter(|e| matches!(e, Effect::ShowNotification { .. }))
        .count();
    lines.push(String::new());
    lines.push(format!(
        "{} effects over {}ms, {} notification{}",
        timeline.entries.len(),
        timeline.finished_at,
        shown,
        if shown == 1 { "" } else { "s" }
    ));
    lines
}

pub fn print_timeline(timeline: &Timeline) {
    for line in format_timeline(timeline) {
        println!("{}", line);
    }
}

// ============================================================================
// Validate output
// ============================================================================

/// Format validation errors the way the page would report them.
pub fn format_validation(errors: &[String]) -> Vec<String> {
    if errors.is_empty() {
        return vec!["Form is valid".to_string()];
    }
    let mut lines = vec![VALIDATION_HEADER.to_string()];
    lines.extend(errors.iter().map(|e| format!("{}{}", indent(1), e)));
    lines
}

pub fn print_validation(errors: &[String]) {
    for line in format_validation(errors) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{DismissReason, NotificationId, Severity};
    use crate::scenario::TimelineEntry;

    #[test]
    fn strip_html_tags_basic() {
        assert_eq!(strip_html_tags("<p>Hello</p>"), "Hello");
        assert_eq!(strip_html_tags("<b>a</b> <i>b</i>"), "a b");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn timeline_groups_by_instant() {
        let timeline = Timeline {
            entries: vec![
                TimelineEntry {
                    at: 0,
                    effect: Effect::set_text("#typing-text", ""),
                },
                TimelineEntry {
                    at: 0,
                    effect: Effect::SpawnParticles {
                        count: 50,
                        html: String::new(),
                    },
                },
                TimelineEntry {
                    at: 1000,
                    effect: Effect::add_class("#navbar", "scrolled"),
                },
            ],
            finished_at: 1000,
        };
        let lines = format_timeline(&timeline);
        assert_eq!(
            lines,
            vec![
                "0ms",
                "    set_text #typing-text \"\"",
                "    spawn_particles 50",
                "1000ms",
                "    add_class #navbar scrolled",
                "",
                "3 effects over 1000ms, 0 notifications",
            ]
        );
    }

    #[test]
    fn notification_shows_its_text() {
        let timeline = Timeline {
            entries: vec![
                TimelineEntry {
                    at: 2200,
                    effect: Effect::ShowNotification {
                        id: NotificationId(4),
                        severity: Severity::Success,
                        html: r#"<div><i class="fas"></i><span>Sent</span><button></button></div>"#
                            .to_string(),
                    },
                },
                TimelineEntry {
                    at: 7200,
                    effect: Effect::RemoveNotification {
                        id: NotificationId(4),
                        reason: DismissReason::Timeout,
                    },
                },
            ],
            finished_at: 7200,
        };
        let lines = format_timeline(&timeline);
        assert_eq!(lines[1], "    show_notification notification-4 success");
        assert_eq!(lines[2], "        Sent");
        assert_eq!(lines[4], "    remove_notification notification-4 (Timeout)");
        assert_eq!(lines.last().unwrap(), "2 effects over 7200ms, 1 notification");
    }

    #[test]
    fn validation_lists_errors_under_header() {
        let lines = format_validation(&["Name is required".to_string()]);
        assert_eq!(
            lines,
            vec!["Please fix the following errors:", "    Name is required"]
        );
        assert_eq!(format_validation(&[]), vec!["Form is valid"]);
    }
}

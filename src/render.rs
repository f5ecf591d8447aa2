//! HTML fragments the behaviors insert into the page.
//!
//! Uses [maud](https://maud.lambda.xyz/) like the rest of the markup, so
//! notification messages are escaped on the way in. Icons are Font Awesome
//! classes; the page is expected to load the icon font itself.
//!
//! Fragments:
//! - the notification toast, styled inline by severity
//! - the back-to-top button, for pages that lack one
//! - particles, styled inline from their random values
//! - the keyframes/toast stylesheet injected once at boot
//! - a standalone preview document used by the `preview` command

use crate::notification::{Notification, Severity};
use crate::particles::Particle;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Stylesheet injected into `<head>` at boot.
pub const ANIMATIONS_CSS: &str = r#"@keyframes slideInRight {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOutRight {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}

.notification-content {
    display: flex;
    align-items: center;
    gap: 0.5rem;
    flex: 1;
}

.notification-close {
    background: none;
    border: none;
    color: white;
    cursor: pointer;
    padding: 0.25rem;
    border-radius: 50%;
    width: 24px;
    height: 24px;
    display: flex;
    align-items: center;
    justify-content: center;
    opacity: 0.8;
    transition: opacity 0.2s ease;
}

.notification-close:hover {
    opacity: 1;
    background: rgba(255, 255, 255, 0.1);
}"#;

const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css";

/// Inline style of a toast: fixed top-right, severity background, slide in.
pub fn notification_style(severity: Severity) -> String {
    format!(
        "position: fixed; top: 100px; right: 20px; max-width: 400px; \
         background: {}; color: white; padding: 1rem; border-radius: 10px; \
         box-shadow: var(--shadow-large); z-index: 10000; \
         animation: slideInRight 0.3s ease; display: flex; align-items: center; \
         justify-content: space-between; gap: 1rem;",
        severity.color()
    )
}

/// Inline `animation` value applied when a toast starts leaving.
pub fn notification_exit_animation(exit_ms: u64) -> String {
    format!("slideOutRight {}s ease", exit_ms as f64 / 1000.0)
}

/// The toast for `notification`.
pub fn render_notification(notification: &Notification) -> Markup {
    let severity = notification.severity;
    html! {
        div
            id=(notification.id.to_string())
            class={ "notification notification-" (severity.as_str()) }
            style=(notification_style(severity))
        {
            div.notification-content {
                i class={ "fas fa-" (severity.icon()) } {}
                span { (notification.message) }
            }
            button.notification-close type="button" {
                i.fas.fa-times {}
            }
        }
    }
}

pub fn render_back_to_top() -> Markup {
    html! {
        button.back-to-top id="back-to-top" type="button" {
            i.fas.fa-arrow-up {}
        }
    }
}

fn particle_style(p: &Particle) -> String {
    format!(
        "width: {size:.2}px; height: {size:.2}px; left: {left:.2}%; top: {top:.2}%; \
         animation-delay: {delay:.2}s; animation-duration: {duration:.2}s;",
        size = p.size,
        left = p.left,
        top = p.top,
        delay = p.delay,
        duration = p.duration,
    )
}

pub fn render_particles(particles: &[Particle]) -> Markup {
    html! {
        @for p in particles {
            div.particle style=(particle_style(p)) {}
        }
    }
}

/// Standalone page showing `notification`, for eyeballing severities.
pub fn render_preview(notification: &Notification) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Notification preview" }
                link rel="stylesheet" href=(FONT_AWESOME);
                style {
                    (PreEscaped(":root { --shadow-large: 0 10px 30px rgba(0, 0, 0, 0.2); }\n"))
                    (PreEscaped(ANIMATIONS_CSS))
                }
            }
            body {
                (render_notification(notification))
            }
        }
    }
}

//! # Portfolio UI
//!
//! The interactive behavior of a single-page developer portfolio: toast
//! notifications, a validated contact form, scroll-triggered reveals,
//! animated statistic counters, a typewriter tagline, navigation state,
//! a particle background, and a loader overlay.
//!
//! # Architecture: Events In, Effects Out
//!
//! Nothing here touches a browser. The page is one [`app::App`] value that
//! the host feeds timestamped events and polls for timers:
//!
//! ```text
//! host                           App
//! ────                           ───
//! boot(layout)         ──────►   Vec<Effect>   (style, particles, loader…)
//! handle(t, event)     ──────►   Vec<Effect>   (classes, scrolls, toasts…)
//! advance_to(t)        ──────►   Vec<Effect>   (timers: dismissals, ticks…)
//! ```
//!
//! Time is an explicit millisecond value, never a wall clock, so:
//!
//! - **Determinism**: a scenario replays to the same effects every time.
//! - **Testability**: five seconds of auto-dismiss is one `advance_to` call.
//! - **Portability**: the CLI and any host binding share one
//!   implementation.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Page context: boots every behavior and routes events and timers |
//! | [`notification`] | Single-slot toast lifecycle with auto and manual dismissal |
//! | [`form`] | Contact form validation, floating labels, delayed submission |
//! | [`reveal`] | One-shot scroll reveal and the geometric intersection model |
//! | [`lazy`] | Lazy image loading on the same intersection model |
//! | [`counter`] | Statistic count-up animations |
//! | [`typewriter`] | Character-by-character tagline reveal |
//! | [`nav`] | Mobile menu, anchor scrolling, active link, back-to-top |
//! | [`particles`] | Seeded particle field and its pause state |
//! | [`loader`] | Loader overlay fade and removal |
//! | [`scheduler`] | Deterministic timers and debounce on an injected clock |
//! | [`event`] | The `PageEvent` and `Effect` vocabulary |
//! | [`render`] | HTML fragments and injected CSS, built with Maud |
//! | [`types`] | Page layout snapshot shared by every behavior |
//! | [`config`] | `config.toml` loading, validation, and stock defaults |
//! | [`scenario`] | Scripted sessions replayed into a timeline |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Notification At A Time
//!
//! A new notification removes the current one immediately, without its exit
//! transition. Every timer a notification owns is keyed by its id, so a late
//! auto-dismiss for a toast that is already gone does nothing.
//!
//! ## Components Own Their Timers
//!
//! Each behavior keeps a private [`scheduler::Scheduler`]. The app fires them
//! in global due-time order and hands each timer its own due time as "now",
//! so a long `advance_to` produces exactly the effects that many short ones
//! would. Timers of different behaviors that share a millisecond fire in a
//! fixed order: form submission, notifications, counters, typewriter,
//! loader, resize.
//!
//! ## Maud For Fragments
//!
//! Toast and particle markup is built with [Maud](https://maud.lambda.xyz/),
//! so notification text is escaped on the way into the page.
//!
//! ## Missing Markup Is Not An Error
//!
//! A page without a loader, a form, or a particle container simply doesn't
//! run those behaviors. [`types::Elements`] says what exists.

pub mod app;
pub mod config;
pub mod counter;
pub mod event;
pub mod form;
pub mod lazy;
pub mod loader;
pub mod nav;
pub mod notification;
pub mod output;
pub mod particles;
pub mod render;
pub mod reveal;
pub mod scenario;
pub mod scheduler;
pub mod types;
pub mod typewriter;

#[cfg(test)]
pub(crate) mod test_helpers;

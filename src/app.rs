//! The page context: every behavior, wired together.
//!
//! [`App`] replaces the loose global state of a hand-written page script with
//! one value owned by whoever boots the page. The host drives it with two
//! calls:
//!
//! ```text
//! host event at t ──► App::handle(t, event) ──► Vec<Effect>
//! animation frame ──► App::advance_to(t)    ──► Vec<Effect>
//! ```
//!
//! `handle` first runs every timer due before `t`, so events and timers are
//! always applied in time order. Timers of different components fire in
//! global due-time order; a timer that fires at `d` sees `d` as "now", so
//! anything it schedules is relative to `d` rather than to the instant the
//! host happened to call in.
//!
//! Components whose markup is missing from the [`PageLayout`] are never
//! started and every event aimed at them is ignored.

use crate::config::UiConfig;
use crate::counter::Counters;
use crate::event::{Effect, PageEvent};
use crate::form::{ClassChange, ContactForm, Field, SimulatedSubmitter, SubmitStart, Submitter};
use crate::lazy::LazyImages;
use crate::loader::{Loader, LoaderStep};
use crate::nav::{NavChange, Navigation};
use crate::notification::{NotificationCenter, NotificationChange, Severity};
use crate::particles::{ParticleField, SeededRng};
use crate::render;
use crate::reveal::{IntersectionEntry, ScrollReveal, observe};
use crate::scheduler::{Debounce, Millis};
use crate::typewriter::Typewriter;
use crate::types::{ElementId, PageLayout, Viewport};

const TYPING_TEXT: &str = "#typing-text";
const CONTACT_FORM: &str = "#contact-form";
const LOADER: &str = "#loader";

pub struct App<S: Submitter = SimulatedSubmitter> {
    config: UiConfig,
    layout: PageLayout,
    now: Millis,
    scroll_y: f64,
    loading: bool,
    rng: SeededRng,
    particles: Option<ParticleField>,
    resize: Debounce,
    nav: Navigation,
    reveal: ScrollReveal,
    lazy: LazyImages,
    typewriter: Option<Typewriter>,
    counters: Counters<ElementId>,
    form: Option<ContactForm>,
    notifications: NotificationCenter,
    loader: Option<Loader>,
    submitter: S,
}

impl App<SimulatedSubmitter> {
    /// Boot at t = 0 with the simulated backend.
    pub fn simulated(layout: PageLayout, config: UiConfig, seed: u64) -> (Self, Vec<Effect>) {
        Self::boot(layout, config, seed, SimulatedSubmitter, 0)
    }
}

impl<S: Submitter> App<S> {
    /// Initialize every behavior in page order and return the effects of
    /// doing so.
    pub fn boot(
        layout: PageLayout,
        config: UiConfig,
        seed: u64,
        submitter: S,
        now: Millis,
    ) -> (Self, Vec<Effect>) {
        let mut effects = vec![Effect::InjectStyle {
            css: render::ANIMATIONS_CSS.to_string(),
        }];
        let mut rng = SeededRng::new(seed);

        // Particles
        let particles = layout.elements.particles_container.then(|| {
            let field = ParticleField::generate(
                layout.viewport.width,
                &config.particle_options(),
                &mut rng,
            );
            effects.push(spawn_effect(&field));
            field
        });

        // Navigation and reveal start idle until the first scroll.
        let nav = Navigation::new(config.nav_options(), &layout);
        let reveal = ScrollReveal::new();
        let lazy = LazyImages::new(&layout.lazy_images);

        // Typewriter
        let typewriter = layout.typing_text.as_deref().map(|text| {
            effects.push(Effect::set_text(TYPING_TEXT, ""));
            Typewriter::start(
                text,
                config.typewriter.start_delay_ms,
                config.typewriter.char_delay_ms,
                now,
            )
        });

        // Counters
        if layout.reveal_targets.iter().any(|t| t.stat_count.is_some()) {
            effects.push(Effect::set_text(".stat-number", "0"));
        }
        let counters = Counters::new(config.counter.duration_ms, config.counter.tick_ms, now);

        // Form
        let form = layout.elements.contact_form.then(|| {
            let form = ContactForm::new(&layout.form_values, config.form.submit_delay_ms, now);
            effects.extend(form.initial_classes().into_iter().map(field_class_effect));
            form
        });

        // Interactions
        let mut layout = layout;
        if !layout.elements.back_to_top {
            effects.push(Effect::AppendToBody {
                html: render::render_back_to_top().into_string(),
            });
            layout.elements.back_to_top = true;
        }

        let loader = layout.elements.loader.then(|| {
            Loader::start(
                config.loader.fade_delay_ms,
                config.loader.remove_delay_ms,
                now,
            )
        });

        let mut app = Self {
            notifications: NotificationCenter::new(config.notification_timings(), now),
            resize: Debounce::new(config.particles.resize_debounce_ms, now),
            loading: loader.is_some(),
            config,
            layout,
            now,
            scroll_y: 0.0,
            rng,
            particles,
            nav,
            reveal,
            lazy,
            typewriter,
            counters,
            form,
            loader,
            submitter,
        };

        // Observers report what is already on screen as soon as they start.
        effects.extend(app.observe_viewport());
        tracing::debug!(effects = effects.len(), "page booted");
        (app, effects)
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// True until the loader overlay has been removed.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn form(&self) -> Option<&ContactForm> {
        self.form.as_ref()
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn reveal(&self) -> &ScrollReveal {
        &self.reveal
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn counters(&self) -> &Counters<ElementId> {
        &self.counters
    }

    /// Earliest pending timer across every behavior.
    pub fn next_due(&self) -> Option<Millis> {
        [
            self.notifications.next_due(),
            self.form.as_ref().and_then(ContactForm::next_due),
            self.counters.next_due(),
            self.typewriter.as_ref().and_then(Typewriter::next_due),
            self.loader.as_ref().and_then(Loader::next_due),
            self.resize.next_due(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Run every timer due at or before `until`, in due-time order.
    pub fn advance_to(&mut self, until: Millis) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some(due) = self.next_due().filter(|&d| d <= until) {
            self.now = self.now.max(due);
            self.fire_timers(due, &mut effects);
        }
        self.now = self.now.max(until);
        effects
    }

    /// Fire every component due at `due`. The order is fixed, so a form
    /// outcome's notification is shown before any notification timer at the
    /// same instant runs.
    fn fire_timers(&mut self, due: Millis, effects: &mut Vec<Effect>) {
        let submitted = match self.form.as_mut() {
            Some(form) => form.advance(due, &mut self.submitter),
            None => None,
        };
        if let Some(outcome) = submitted {
            effects.extend(self.notify_at(outcome.message, outcome.severity, due));
            if outcome.reset {
                effects.push(Effect::ResetForm);
            }
            effects.extend(outcome.classes.into_iter().map(field_class_effect));
            effects.push(Effect::remove_class(CONTACT_FORM, "loading"));
        }

        let changes = self.notifications.advance(due);
        effects.extend(self.notification_effects(changes));

        for (id, text) in self.counters.advance(due) {
            effects.push(Effect::set_text(format!("#{id} .stat-number"), text));
        }

        if let Some(typewriter) = self.typewriter.as_mut() {
            for text in typewriter.advance(due) {
                effects.push(Effect::set_text(TYPING_TEXT, text));
            }
        }

        if let Some(loader) = self.loader.as_mut() {
            for step in loader.advance(due) {
                match step {
                    LoaderStep::FadeOut => effects.push(Effect::set_style(LOADER, "opacity", "0")),
                    LoaderStep::Removed => {
                        effects.push(Effect::RemoveElement {
                            target: LOADER.to_string(),
                        });
                        self.loading = false;
                    }
                }
            }
        }

        if self.resize.fire(due) {
            effects.extend(self.regenerate_particles());
        }
    }

    /// Apply a host event that happened at `at`.
    pub fn handle(&mut self, at: Millis, event: PageEvent) -> Vec<Effect> {
        let mut effects = self.advance_to(at);
        let now = self.now;

        match event {
            PageEvent::Scroll { y } => {
                self.scroll_y = y;
                let changes = self.nav.on_scroll(y, &self.layout);
                effects.extend(changes.into_iter().flat_map(nav_effects));
                effects.extend(self.observe_viewport());
            }
            PageEvent::Resize { width, height } => {
                self.layout.viewport = Viewport { width, height };
                if self.particles.is_some() {
                    self.resize.trigger(now);
                }
                effects.extend(self.observe_viewport());
            }
            PageEvent::VisibilityChange { hidden } => {
                let changed = self
                    .particles
                    .as_mut()
                    .is_some_and(|field| field.set_paused(hidden));
                if changed {
                    effects.push(Effect::SetParticlesRunning { running: !hidden });
                }
            }
            PageEvent::ToggleMenu => {
                effects.extend(self.nav.toggle_menu().into_iter().flat_map(nav_effects));
            }
            PageEvent::NavLinkClick { href } => {
                let changes = self.nav.click_link(&href, &self.layout);
                effects.extend(changes.into_iter().flat_map(nav_effects));
            }
            PageEvent::ButtonClick { id } => effects.extend(self.click_button(&id)),
            PageEvent::Input { field, value } => {
                if let (Some(form), Some(field)) = (self.form.as_mut(), Field::from_name(&field)) {
                    effects.extend(form.input(field, value).into_iter().map(field_class_effect));
                }
            }
            PageEvent::Focus { field } => {
                if let (Some(form), Some(field)) = (self.form.as_mut(), Field::from_name(&field)) {
                    effects.extend(form.focus(field).into_iter().map(field_class_effect));
                }
            }
            PageEvent::Blur { field } => {
                if let (Some(form), Some(field)) = (self.form.as_mut(), Field::from_name(&field)) {
                    effects.extend(form.blur(field).into_iter().map(field_class_effect));
                }
            }
            PageEvent::Submit => effects.extend(self.submit_form(now)),
            PageEvent::DismissNotification => {
                let changes = self.notifications.dismiss_current(now);
                effects.extend(self.notification_effects(changes));
            }
            PageEvent::Intersections { entries } => {
                effects.extend(self.reveal_entries(&entries));
            }
            PageEvent::ImageIntersections { entries } => {
                effects.extend(self.load_images(&entries));
            }
            PageEvent::Notify { message, severity } => {
                let severity = severity.as_deref().map(Severity::parse).unwrap_or_default();
                effects.extend(self.notify_at(message, severity, now));
            }
        }
        effects
    }

    /// Show a notification now.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> Vec<Effect> {
        self.notify_at(message, severity, self.now)
    }

    fn notify_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        at: Millis,
    ) -> Vec<Effect> {
        let changes = self.notifications.notify(message, severity, at);
        self.notification_effects(changes)
    }

    fn notification_effects(&self, changes: Vec<NotificationChange>) -> Vec<Effect> {
        changes
            .into_iter()
            .map(|change| match change {
                NotificationChange::Shown(n) => Effect::ShowNotification {
                    id: n.id,
                    severity: n.severity,
                    html: render::render_notification(&n).into_string(),
                },
                NotificationChange::ExitStarted { id, reason } => Effect::StartNotificationExit {
                    id,
                    reason,
                    animation: render::notification_exit_animation(
                        self.config.notifications.exit_ms,
                    ),
                },
                NotificationChange::Removed { id, reason } => {
                    Effect::RemoveNotification { id, reason }
                }
            })
            .collect()
    }

    fn submit_form(&mut self, now: Millis) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        match form.submit(now) {
            SubmitStart::Rejected { message, .. } => self.notify_at(message, Severity::Error, now),
            SubmitStart::Started { .. } => vec![Effect::add_class(CONTACT_FORM, "loading")],
            SubmitStart::Busy => Vec::new(),
        }
    }

    fn click_button(&mut self, id: &str) -> Vec<Effect> {
        let section = match id {
            "view-work-btn" if self.layout.elements.view_work_button => "projects",
            "contact-btn" if self.layout.elements.contact_button => "contact",
            "back-to-top" => return vec![Effect::ScrollTo { top: 0.0 }],
            _ => return Vec::new(),
        };
        self.nav
            .scroll_to_section(section, &self.layout)
            .into_iter()
            .flat_map(nav_effects)
            .collect()
    }

    /// Run both observers against the current scroll offset.
    fn observe_viewport(&mut self) -> Vec<Effect> {
        let viewport = self.layout.viewport;
        let entries = observe(
            self.layout.reveal_targets.iter().map(|t| (&t.id, t.span)),
            self.scroll_y,
            viewport,
            self.config.reveal_options(),
        );
        let mut effects = self.reveal_entries(&entries);

        let entries = observe(
            self.lazy.observed(),
            self.scroll_y,
            viewport,
            self.config.lazy_image_options(),
        );
        effects.extend(self.load_images(&entries));
        effects
    }

    fn load_images(&mut self, entries: &[IntersectionEntry]) -> Vec<Effect> {
        self.lazy
            .on_intersections(entries)
            .into_iter()
            .map(|load| Effect::SetImageSource {
                target: format!("#{}", load.id),
                src: load.src,
            })
            .collect()
    }

    fn reveal_entries(&mut self, entries: &[IntersectionEntry]) -> Vec<Effect> {
        let layout = &self.layout;
        let revealed = self
            .reveal
            .on_intersections(entries, |id| layout.reveal_target(id).and_then(|t| t.stat_count));

        let mut effects = Vec::new();
        for item in revealed {
            effects.push(Effect::add_class(format!("#{}", item.id), "animated"));
            if let Some(target) = item.counter {
                self.counters.start(item.id, target, self.now);
            }
        }
        effects
    }

    fn regenerate_particles(&mut self) -> Vec<Effect> {
        let Some(field) = self.particles.as_mut() else {
            return Vec::new();
        };
        *field = ParticleField::generate(
            self.layout.viewport.width,
            &self.config.particle_options(),
            &mut self.rng,
        );
        vec![Effect::ClearParticles, spawn_effect(field)]
    }
}

fn spawn_effect(field: &ParticleField) -> Effect {
    Effect::SpawnParticles {
        count: field.particles().len(),
        html: render::render_particles(field.particles()).into_string(),
    }
}

fn field_class_effect(change: ClassChange) -> Effect {
    let target = format!(r#"{CONTACT_FORM} [name="{}"]"#, change.field.name());
    Effect::toggle_class(target, change.class, change.add)
}

fn nav_effects(change: NavChange) -> Vec<Effect> {
    match change {
        NavChange::MenuOpen(open) => vec![
            Effect::toggle_class("#hamburger", "active", open),
            Effect::toggle_class("#nav-menu", "active", open),
        ],
        NavChange::NavbarScrolled(on) => vec![Effect::toggle_class("#navbar", "scrolled", on)],
        NavChange::ActiveLink(href) => {
            let mut effects = vec![Effect::remove_class(".nav-link", "active")];
            if let Some(href) = href {
                effects.push(Effect::add_class(
                    format!(r#".nav-link[href="{href}"]"#),
                    "active",
                ));
            }
            effects
        }
        NavChange::BackToTopVisible(on) => {
            vec![Effect::toggle_class("#back-to-top", "visible", on)]
        }
        NavChange::ScrollTo(top) => vec![Effect::ScrollTo { top }],
    }
}

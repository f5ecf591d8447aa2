//! Scripted page sessions.
//!
//! A scenario is a JSON file holding a page layout and a list of
//! timestamped events. [`run`] boots an [`App`] on the layout, replays the
//! events, lets every pending timer fire, and records each effect with the
//! time it happened. Same file, same seed, same timeline.
//!
//! ```json
//! {
//!   "seed": 7,
//!   "until": 10000,
//!   "layout": { "typing_text": "Hi", "sections": [...] },
//!   "steps": [
//!     { "at": 100, "event": "scroll", "y": 1200 },
//!     { "at": 300, "event": "input", "field": "name", "value": "Ada" },
//!     { "at": 900, "event": "submit" }
//!   ]
//! }
//! ```
//!
//! Without `until` the run continues until no timer is pending.

use crate::app::App;
use crate::config::UiConfig;
use crate::event::{Effect, PageEvent};
use crate::form::FormData;
use crate::scheduler::Millis;
use crate::types::PageLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    /// Seed for the particle field.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub until: Option<Millis>,
    #[serde(default)]
    pub layout: PageLayout,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub at: Millis,
    #[serde(flatten)]
    pub event: PageEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub at: Millis,
    #[serde(flatten)]
    pub effect: Effect,
}

/// Every effect of a run, in the order the page would apply them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    /// Clock at the end of the run.
    pub finished_at: Millis,
}

impl Timeline {
    fn record(&mut self, at: Millis, effects: Vec<Effect>) {
        self.entries
            .extend(effects.into_iter().map(|effect| TimelineEntry { at, effect }));
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.entries.iter().map(|e| &e.effect)
    }
}

pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read a `{"field": "value"}` JSON object.
pub fn load_form(path: &Path) -> Result<FormData, ScenarioError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replay `scenario` against a freshly booted page.
pub fn run(scenario: &Scenario, config: UiConfig) -> Timeline {
    let (mut app, boot) = App::simulated(scenario.layout.clone(), config, scenario.seed);
    let mut timeline = Timeline::default();
    timeline.record(app.now(), boot);

    let mut steps = scenario.steps.clone();
    steps.sort_by_key(|s| s.at);

    for step in steps {
        fire_until(&mut app, step.at, &mut timeline);
        tracing::debug!(at = step.at, event = ?step.event, "scenario step");
        let effects = app.handle(step.at, step.event);
        timeline.record(step.at, effects);
    }

    match scenario.until {
        Some(until) => {
            fire_until(&mut app, until, &mut timeline);
            app.advance_to(until);
        }
        None => fire_until(&mut app, Millis::MAX, &mut timeline),
    }
    timeline.finished_at = app.now();
    timeline
}

/// Fire timers one due time at a time so each effect keeps its own stamp.
fn fire_until(app: &mut App, until: Millis, timeline: &mut Timeline) {
    while let Some(due) = app.next_due().filter(|&d| d <= until) {
        let effects = app.advance_to(due);
        timeline.record(due, effects);
    }
}

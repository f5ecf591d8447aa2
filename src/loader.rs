//! Page loader overlay: fade out shortly after boot, then remove.

use crate::scheduler::{Millis, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderStep {
    /// Opacity goes to 0.
    FadeOut,
    /// Element removed; the page is no longer loading.
    Removed,
}

#[derive(Debug, Clone)]
pub struct Loader {
    remove_delay: Millis,
    timers: Scheduler<LoaderStep>,
    removed: bool,
}

impl Loader {
    pub fn start(fade_delay: Millis, remove_delay: Millis, now: Millis) -> Self {
        let mut timers = Scheduler::new(now);
        timers.schedule_in(fade_delay, LoaderStep::FadeOut);
        Self {
            remove_delay,
            timers,
            removed: false,
        }
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub fn advance(&mut self, now: Millis) -> Vec<LoaderStep> {
        let mut steps = Vec::new();
        while let Some((_, step)) = self.timers.pop_due(now) {
            match step {
                LoaderStep::FadeOut => {
                    self.timers.schedule_in(self.remove_delay, LoaderStep::Removed);
                }
                LoaderStep::Removed => {
                    self.removed = true;
                    tracing::debug!("loader removed");
                }
            }
            steps.push(step);
        }
        self.timers.advance_to(now);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fades_then_removes() {
        let mut loader = Loader::start(1500, 500, 0);
        assert!(loader.advance(1499).is_empty());
        assert_eq!(loader.advance(1500), vec![LoaderStep::FadeOut]);
        assert!(!loader.is_removed());
        assert_eq!(loader.next_due(), Some(2000));
        assert_eq!(loader.advance(2000), vec![LoaderStep::Removed]);
        assert!(loader.is_removed());
    }

    #[test]
    fn one_big_step_runs_both() {
        let mut loader = Loader::start(1500, 500, 0);
        assert_eq!(
            loader.advance(10_000),
            vec![LoaderStep::FadeOut, LoaderStep::Removed]
        );
    }
}

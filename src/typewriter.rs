//! One-shot typewriter reveal of the hero tagline.

use crate::scheduler::{Millis, Scheduler};

#[derive(Debug, Clone)]
pub struct Typewriter {
    chars: Vec<char>,
    shown: usize,
    char_delay: Millis,
    timer: Scheduler<()>,
}

impl Typewriter {
    /// Take over `text`: the element is blanked now and the first character
    /// appears after `start_delay`.
    pub fn start(text: &str, start_delay: Millis, char_delay: Millis, now: Millis) -> Self {
        let mut timer = Scheduler::new(now);
        timer.schedule_in(start_delay, ());
        Self {
            chars: text.chars().collect(),
            shown: 0,
            char_delay,
            timer,
        }
    }

    /// Text currently visible.
    pub fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        self.shown >= self.chars.len() && self.timer.is_empty()
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.timer.next_due()
    }

    /// Reveal every character due by `now`; returns the visible text after
    /// each step.
    pub fn advance(&mut self, now: Millis) -> Vec<String> {
        let mut steps = Vec::new();
        while self.timer.pop_due(now).is_some() {
            if self.shown < self.chars.len() {
                self.shown += 1;
                steps.push(self.visible());
                self.timer.schedule_in(self.char_delay, ());
            }
        }
        self.timer.advance_to(now);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_start_delay() {
        let mut t = Typewriter::start("Hi!", 1000, 80, 0);
        assert_eq!(t.visible(), "");
        assert!(t.advance(999).is_empty());
        assert_eq!(t.advance(1000), vec!["H"]);
    }

    #[test]
    fn types_one_char_per_interval() {
        let mut t = Typewriter::start("Hi!", 1000, 80, 0);
        assert_eq!(t.advance(1160), vec!["H", "Hi", "Hi!"]);
        assert_eq!(t.visible(), "Hi!");
    }

    #[test]
    fn stops_after_last_char() {
        let mut t = Typewriter::start("ab", 0, 10, 0);
        t.advance(1000);
        assert!(t.is_done());
        assert_eq!(t.next_due(), None);
        assert!(t.advance(5000).is_empty());
    }

    #[test]
    fn handles_multibyte_text() {
        let mut t = Typewriter::start("héllo", 0, 1, 0);
        let steps = t.advance(100);
        assert_eq!(steps[1], "hé");
        assert_eq!(steps.last().unwrap(), "héllo");
    }

    #[test]
    fn empty_text_finishes_quietly() {
        let mut t = Typewriter::start("", 1000, 80, 0);
        assert!(t.advance(2000).is_empty());
        assert!(t.is_done());
    }
}

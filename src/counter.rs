//! Animated statistic counters.
//!
//! A counter climbs linearly from 0 to its target over a fixed duration,
//! updating every tick. Intermediate values are floored; the final frame
//! shows the exact target. A target of exactly 100 is a percentage and gets
//! a `%` suffix, everything else gets `+` ("50+ projects").

use crate::scheduler::{Millis, Scheduler};
use std::collections::BTreeMap;

/// Suffix shown after the number.
pub fn suffix(target: i64) -> char {
    if target == 100 { '%' } else { '+' }
}

pub fn format_count(value: i64, target: i64) -> String {
    format!("{}{}", value, suffix(target))
}

/// One counter's progress.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    /// Ticks left before the final frame is forced.
    remaining: u64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: Millis, tick_ms: Millis) -> Self {
        let tick_ms = tick_ms.max(1);
        let steps = duration_ms as f64 / tick_ms as f64;
        Self {
            target,
            increment: target as f64 / steps,
            current: 0.0,
            remaining: duration_ms.div_ceil(tick_ms).max(1),
            finished: false,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick and return the text to display, or `None` once the
    /// final frame has been shown.
    pub fn tick(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        self.remaining = self.remaining.saturating_sub(1);
        if self.current >= self.target as f64 || self.remaining == 0 {
            self.finished = true;
            Some(format_count(self.target, self.target))
        } else {
            Some(format_count(self.current.floor() as i64, self.target))
        }
    }

    /// All remaining frames.
    pub fn frames(mut self) -> impl Iterator<Item = String> {
        std::iter::from_fn(move || self.tick())
    }
}

/// Every running counter on the page, ticking on a shared period.
#[derive(Debug, Clone)]
pub struct Counters<K> {
    duration_ms: Millis,
    tick_ms: Millis,
    running: BTreeMap<K, CounterAnimation>,
    ticks: Scheduler<K>,
}

impl<K: Ord + Clone> Counters<K> {
    pub fn new(duration_ms: Millis, tick_ms: Millis, now: Millis) -> Self {
        Self {
            duration_ms,
            tick_ms: tick_ms.max(1),
            running: BTreeMap::new(),
            ticks: Scheduler::new(now),
        }
    }

    /// Start animating `key` towards `target`. The first frame lands one
    /// tick after `now`.
    pub fn start(&mut self, key: K, target: i64, now: Millis) {
        self.ticks.advance_to(now);
        self.running.insert(
            key.clone(),
            CounterAnimation::new(target, self.duration_ms, self.tick_ms),
        );
        self.ticks.schedule_in(self.tick_ms, key);
    }

    pub fn is_running(&self, key: &K) -> bool {
        self.running.contains_key(key)
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.ticks.next_due()
    }

    /// Fire every tick due by `now`, returning `(key, text)` per frame.
    pub fn advance(&mut self, now: Millis) -> Vec<(K, String)> {
        let mut frames = Vec::new();
        while let Some((_, key)) = self.ticks.pop_due(now) {
            let Some(counter) = self.running.get_mut(&key) else {
                continue;
            };
            if let Some(text) = counter.tick() {
                frames.push((key.clone(), text));
            }
            if counter.is_finished() {
                self.running.remove(&key);
            } else {
                self.ticks.schedule_in(self.tick_ms, key);
            }
        }
        self.ticks.advance_to(now);
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_target_uses_percent_suffix() {
        let frames: Vec<String> = CounterAnimation::new(100, 2000, 16).frames().collect();
        assert!(frames.iter().all(|f| f.ends_with('%')));
        assert_eq!(frames.last().unwrap(), "100%");
    }

    #[test]
    fn other_targets_use_plus_and_end_exactly() {
        let frames: Vec<String> = CounterAnimation::new(42, 2000, 16).frames().collect();
        assert!(frames.len() > 2);
        assert!(frames.iter().all(|f| f.ends_with('+')));
        assert_eq!(frames.last().unwrap(), "42+");
        // Intermediate values are floored and never exceed the target.
        assert_eq!(frames[0], "0+");
        for frame in &frames {
            let n: i64 = frame.trim_end_matches('+').parse().unwrap();
            assert!((0..=42).contains(&n));
        }
    }

    #[test]
    fn frame_count_matches_duration() {
        // 2000 / 16 = 125 ticks, even when accumulated increments land just
        // under the target.
        let count = CounterAnimation::new(50, 2000, 16).frames().count();
        assert_eq!(count, 125);
    }

    #[test]
    fn final_frame_lands_on_the_last_tick() {
        // 100 / 16 rounds up to 7 ticks.
        let frames: Vec<String> = CounterAnimation::new(7, 100, 16).frames().collect();
        assert_eq!(frames.len(), 7);
        assert_eq!(frames.last().unwrap(), "7+");
    }

    #[test]
    fn zero_target_finishes_on_first_tick() {
        let frames: Vec<String> = CounterAnimation::new(0, 2000, 16).frames().collect();
        assert_eq!(frames, vec!["0+"]);
    }

    #[test]
    fn counters_tick_on_schedule() {
        let mut counters = Counters::new(2000, 16, 0);
        counters.start("projects", 42, 0);

        assert!(counters.advance(15).is_empty());
        assert_eq!(counters.advance(16), vec![("projects", "0+".to_string())]);

        let rest = counters.advance(5000);
        assert_eq!(rest.last().unwrap(), &("projects", "42+".to_string()));
        assert!(!counters.is_running(&"projects"));
        assert_eq!(counters.next_due(), None);
    }

    #[test]
    fn independent_counters_interleave() {
        let mut counters = Counters::new(160, 16, 0);
        counters.start("a", 100, 0);
        counters.start("b", 10, 8);
        let frames = counters.advance(24);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].0, "a");
        assert_eq!(frames[1].0, "b");
    }
}

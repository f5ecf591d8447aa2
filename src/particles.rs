//! Decorative particle background.
//!
//! Particles are plain absolutely-positioned dots whose motion is a CSS
//! animation; this module only decides how many there are and their random
//! size, position, and timing. Randomness comes from a seeded generator so a
//! scenario replays to the same field every time.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleOptions {
    /// Viewport widths above this get the desktop count.
    pub breakpoint: f64,
    pub desktop_count: usize,
    pub mobile_count: usize,
}

impl Default for ParticleOptions {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            desktop_count: 50,
            mobile_count: 25,
        }
    }
}

impl ParticleOptions {
    pub fn count_for(&self, viewport_width: f64) -> usize {
        if viewport_width > self.breakpoint {
            self.desktop_count
        } else {
            self.mobile_count
        }
    }
}

/// xorshift64 generator; small, fast, and reproducible from a seed.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        Self {
            state: seed.wrapping_add(0x9E37_79B9_7F4A_7C15).max(1),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[low, low + span)`.
    pub fn range(&mut self, low: f64, span: f64) -> f64 {
        low + self.next_f64() * span
    }
}

/// One particle's inline style values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Width and height in px, 2–6.
    pub size: f64,
    /// Horizontal position in %, 0–100.
    pub left: f64,
    /// Vertical position in %, 0–100.
    pub top: f64,
    /// Animation delay in seconds, 0–6.
    pub delay: f64,
    /// Animation duration in seconds, 4–8.
    pub duration: f64,
}

impl Particle {
    pub fn random(rng: &mut SeededRng) -> Self {
        Self {
            size: rng.range(2.0, 4.0),
            left: rng.range(0.0, 100.0),
            top: rng.range(0.0, 100.0),
            delay: rng.range(0.0, 6.0),
            duration: rng.range(4.0, 4.0),
        }
    }
}

/// The live particle set plus its pause state.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
    paused: bool,
}

impl ParticleField {
    pub fn generate(viewport_width: f64, options: &ParticleOptions, rng: &mut SeededRng) -> Self {
        let count = options.count_for(viewport_width);
        tracing::debug!(count, viewport_width, "generating particles");
        Self {
            particles: (0..count).map(|_| Particle::random(rng)).collect(),
            paused: false,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true if the play state changed.
    pub fn set_paused(&mut self, paused: bool) -> bool {
        let changed = self.paused != paused;
        self.paused = paused;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_depends_on_breakpoint() {
        let options = ParticleOptions::default();
        assert_eq!(options.count_for(1024.0), 50);
        assert_eq!(options.count_for(768.0), 25);
        assert_eq!(options.count_for(375.0), 25);
    }

    #[test]
    fn particle_values_stay_in_range() {
        let mut rng = SeededRng::new(7);
        let field = ParticleField::generate(1280.0, &ParticleOptions::default(), &mut rng);
        assert_eq!(field.particles().len(), 50);
        for p in field.particles() {
            assert!((2.0..6.0).contains(&p.size));
            assert!((0.0..100.0).contains(&p.left));
            assert!((0.0..100.0).contains(&p.top));
            assert!((0.0..6.0).contains(&p.delay));
            assert!((4.0..8.0).contains(&p.duration));
        }
    }

    #[test]
    fn same_seed_same_field() {
        let options = ParticleOptions::default();
        let a = ParticleField::generate(400.0, &options, &mut SeededRng::new(42));
        let b = ParticleField::generate(400.0, &options, &mut SeededRng::new(42));
        assert_eq!(a.particles(), b.particles());
        let c = ParticleField::generate(400.0, &options, &mut SeededRng::new(43));
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = SeededRng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn pause_reports_changes_only() {
        let mut field = ParticleField::default();
        assert!(field.set_paused(true));
        assert!(!field.set_paused(true));
        assert!(field.set_paused(false));
    }
}

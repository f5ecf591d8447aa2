//! Behavior configuration.
//!
//! Every timing and threshold the page behaviors use lives here, with the
//! stock values as defaults. A `config.toml` in the config directory only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [notifications]
//! auto_dismiss_ms = 5000    # Toast lifetime before it starts leaving
//! exit_ms = 300             # Length of the slide-out transition
//!
//! [form]
//! submit_delay_ms = 2000    # Simulated network round trip
//!
//! [counter]
//! duration_ms = 2000        # Time for a counter to reach its target
//! tick_ms = 16              # Interval between counter frames
//!
//! [typewriter]
//! start_delay_ms = 1000     # Pause before the first character
//! char_delay_ms = 80        # Interval between characters
//!
//! [navigation]
//! header_offset = 80.0          # Anchor scrolls stop this far above a section
//! scrolled_threshold = 100.0    # Navbar gets `scrolled` past this offset
//! active_offset = 150.0         # Sections activate this early
//! back_to_top_threshold = 300.0 # Back-to-top shows past this offset
//!
//! [reveal]
//! threshold = 0.1           # Fraction visible before an element animates
//! bottom_margin = -50.0     # Root margin at the viewport bottom (px)
//!
//! [lazy_images]
//! threshold = 0.1
//! margin = 50.0             # Root margin on every side (px)
//!
//! [particles]
//! breakpoint = 768.0        # Wider viewports get the desktop count
//! desktop_count = 50
//! mobile_count = 25
//! resize_debounce_ms = 250
//!
//! [loader]
//! fade_delay_ms = 1500
//! remove_delay_ms = 500
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::nav::NavOptions;
use crate::notification::NotificationTimings;
use crate::particles::ParticleOptions;
use crate::reveal::ObserverOptions;
use crate::scheduler::Millis;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Upper bound on frames per counter animation.
pub const MAX_COUNTER_FRAMES: u64 = 10_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Behavior configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub notifications: NotificationsConfig,
    pub form: FormConfig,
    pub counter: CounterConfig,
    pub typewriter: TypewriterConfig,
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub lazy_images: LazyImagesConfig,
    pub particles: ParticlesConfig,
    pub loader: LoaderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
    pub auto_dismiss_ms: Millis,
    pub exit_ms: Millis,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: 5000,
            exit_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub submit_delay_ms: Millis,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    pub duration_ms: Millis,
    pub tick_ms: Millis,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            tick_ms: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterConfig {
    pub start_delay_ms: Millis,
    pub char_delay_ms: Millis,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000,
            char_delay_ms: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub header_offset: f64,
    pub scrolled_threshold: f64,
    pub active_offset: f64,
    pub back_to_top_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let stock = NavOptions::default();
        Self {
            header_offset: stock.header_offset,
            scrolled_threshold: stock.scrolled_threshold,
            active_offset: stock.active_offset,
            back_to_top_threshold: stock.back_to_top_threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub threshold: f64,
    pub bottom_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: ObserverOptions::REVEAL.threshold,
            bottom_margin: ObserverOptions::REVEAL.bottom_margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LazyImagesConfig {
    pub threshold: f64,
    pub margin: f64,
}

impl Default for LazyImagesConfig {
    fn default() -> Self {
        Self {
            threshold: ObserverOptions::LAZY_IMAGES.threshold,
            margin: ObserverOptions::LAZY_IMAGES.bottom_margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticlesConfig {
    pub breakpoint: f64,
    pub desktop_count: usize,
    pub mobile_count: usize,
    pub resize_debounce_ms: Millis,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        let stock = ParticleOptions::default();
        Self {
            breakpoint: stock.breakpoint,
            desktop_count: stock.desktop_count,
            mobile_count: stock.mobile_count,
            resize_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    pub fade_delay_ms: Millis,
    pub remove_delay_ms: Millis,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            fade_delay_ms: 1500,
            remove_delay_ms: 500,
        }
    }
}

impl UiConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counter.tick_ms == 0 {
            return Err(ConfigError::Validation(
                "counter.tick_ms must be greater than 0".into(),
            ));
        }
        if self.counter.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "counter.duration_ms must be greater than 0".into(),
            ));
        }
        if self.counter.duration_ms / self.counter.tick_ms > MAX_COUNTER_FRAMES {
            return Err(ConfigError::Validation(format!(
                "counter.duration_ms / counter.tick_ms must not exceed {MAX_COUNTER_FRAMES}"
            )));
        }
        for (key, threshold) in [
            ("reveal.threshold", self.reveal.threshold),
            ("lazy_images.threshold", self.lazy_images.threshold),
        ] {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(ConfigError::Validation(format!("{key} must be in (0, 1]")));
            }
        }
        if self.particles.breakpoint < 0.0 {
            return Err(ConfigError::Validation(
                "particles.breakpoint must not be negative".into(),
            ));
        }
        Ok(())
    }

    pub fn notification_timings(&self) -> NotificationTimings {
        NotificationTimings {
            auto_dismiss_ms: self.notifications.auto_dismiss_ms,
            exit_ms: self.notifications.exit_ms,
        }
    }

    pub fn nav_options(&self) -> NavOptions {
        NavOptions {
            header_offset: self.navigation.header_offset,
            scrolled_threshold: self.navigation.scrolled_threshold,
            active_offset: self.navigation.active_offset,
            back_to_top_threshold: self.navigation.back_to_top_threshold,
        }
    }

    pub fn reveal_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.reveal.threshold,
            top_margin: 0.0,
            bottom_margin: self.reveal.bottom_margin,
        }
    }

    pub fn lazy_image_options(&self) -> ObserverOptions {
        ObserverOptions {
            threshold: self.lazy_images.threshold,
            top_margin: self.lazy_images.margin,
            bottom_margin: self.lazy_images.margin,
        }
    }

    pub fn particle_options(&self) -> ParticleOptions {
        ParticleOptions {
            breakpoint: self.particles.breakpoint,
            desktop_count: self.particles.desktop_count,
            mobile_count: self.particles.mobile_count,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(UiConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<UiConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: UiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, falling back to
/// stock defaults for everything it does not set.
pub fn load_config(dir: &Path) -> Result<UiConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    resolve_config(stock_defaults_value(), overlay)
}

/// A fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# portfolio-ui configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Notifications
# ---------------------------------------------------------------------------
[notifications]
# How long a toast stays up before it starts leaving on its own.
auto_dismiss_ms = 5000
# Length of the slide-out transition before the toast is removed.
exit_ms = 300

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[form]
# Simulated round trip of the submission. No request is actually sent.
submit_delay_ms = 2000

# ---------------------------------------------------------------------------
# Statistic counters
# ---------------------------------------------------------------------------
[counter]
duration_ms = 2000
tick_ms = 16

# ---------------------------------------------------------------------------
# Hero typewriter
# ---------------------------------------------------------------------------
[typewriter]
start_delay_ms = 1000
char_delay_ms = 80

# ---------------------------------------------------------------------------
# Navigation (pixels)
# ---------------------------------------------------------------------------
[navigation]
# Height of the fixed header; anchor scrolls stop this far above a section.
header_offset = 80.0
# The navbar gets the `scrolled` class past this offset.
scrolled_threshold = 100.0
# A section becomes active this far before its top reaches the viewport top.
active_offset = 150.0
# The back-to-top button becomes visible past this offset.
back_to_top_threshold = 300.0

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Fraction of an element that must be visible before it animates.
threshold = 0.1
# Root margin at the bottom of the viewport. Negative values trigger later.
bottom_margin = -50.0

# ---------------------------------------------------------------------------
# Lazy images
# ---------------------------------------------------------------------------
[lazy_images]
threshold = 0.1
# Root margin on every side. Positive values start loading early.
margin = 50.0

# ---------------------------------------------------------------------------
# Particle background
# ---------------------------------------------------------------------------
[particles]
# Viewports wider than this get `desktop_count` particles.
breakpoint = 768.0
desktop_count = 50
mobile_count = 25
# Particles are regenerated this long after the last resize event.
resize_debounce_ms = 250

# ---------------------------------------------------------------------------
# Loader overlay
# ---------------------------------------------------------------------------
[loader]
fade_delay_ms = 1500
remove_delay_ms = 500
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_stock_timings() {
        let config = UiConfig::default();
        assert_eq!(config.notifications.auto_dismiss_ms, 5000);
        assert_eq!(config.notifications.exit_ms, 300);
        assert_eq!(config.form.submit_delay_ms, 2000);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.counter.tick_ms, 16);
        assert_eq!(config.typewriter.char_delay_ms, 80);
        assert_eq!(config.particles.desktop_count, 50);
        assert_eq!(config.particles.mobile_count, 25);
    }

    #[test]
    fn derived_options_match_module_defaults() {
        let config = UiConfig::default();
        assert_eq!(config.nav_options(), NavOptions::default());
        assert_eq!(config.reveal_options(), ObserverOptions::REVEAL);
        assert_eq!(config.lazy_image_options(), ObserverOptions::LAZY_IMAGES);
        assert_eq!(config.particle_options(), ParticleOptions::default());
        assert_eq!(config.notification_timings(), NotificationTimings::default());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[notifications]
auto_dismiss_ms = 8000
"#;
        let config: UiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.notifications.auto_dismiss_ms, 8000);
        // Defaults preserved
        assert_eq!(config.notifications.exit_ms, 300);
        assert_eq!(config.form.submit_delay_ms, 2000);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<UiConfig, _> = toml::from_str("[notifications]\ntimeout = 1\n");
        assert!(result.is_err());
        let result: Result<UiConfig, _> = toml::from_str("[colors]\nbg = \"#fff\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: UiConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn merge_overlays_nested_tables() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[particles]\nmobile_count = 10\n").unwrap();
        let merged: UiConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(merged.particles.mobile_count, 10);
        assert_eq!(merged.particles.desktop_count, 50);
    }

    #[test]
    fn validation_rejects_zero_tick() {
        let mut config = UiConfig::default();
        config.counter.tick_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn validation_rejects_unbounded_counter() {
        let mut config = UiConfig::default();
        config.counter.duration_ms = 1_000_000_000_000_000_000;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        config.counter.duration_ms = MAX_COUNTER_FRAMES * config.counter.tick_ms;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_threshold() {
        let mut config = UiConfig::default();
        config.reveal.threshold = 1.5;
        assert!(config.validate().is_err());
        config.reveal.threshold = 0.0;
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[form]\nsubmit_delay_ms = 500\n\n[typewriter]\nchar_delay_ms = 40\n",
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.form.submit_delay_ms, 500);
        assert_eq!(config.typewriter.char_delay_ms, 40);
        assert_eq!(config.typewriter.start_delay_ms, 1000);
    }

    #[test]
    fn load_config_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[form\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[counter]\ntick_ms = 0\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}

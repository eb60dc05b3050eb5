//! Chart configuration with named defaults.
//!
//! Hosts start from [`ChartConfig::default`] and either call the `with_*`
//! setters or merge a partial [`ChartConfigOverrides`], typically
//! deserialized from the host's own settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::guides::GuideConfig;
use crate::morph::Resampling;

/// Spring parameters for pointer-driven animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient.
    pub damping: f64,
    /// Mass of the animated value.
    pub mass: f64,
    /// Spring stiffness.
    pub stiffness: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 15.0,
            mass: 1.0,
            stiffness: 600.0,
        }
    }
}

/// Timing used to drive progress and pointer feedback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Marker spring.
    pub spring: SpringConfig,
    /// Duration of marker fade in and out.
    #[serde(with = "millis")]
    pub feedback_duration: Duration,
    /// Duration of a dataset transition.
    #[serde(with = "millis")]
    pub transition_duration: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            feedback_duration: Duration::from_millis(80),
            transition_duration: Duration::from_millis(300),
        }
    }
}

/// Top-level chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// Edge distance, in device units, within which pointer positions are
    /// compressed towards the edge.
    pub hit_slop: f64,
    /// Keep bezier smoothing on while a transition runs.
    pub smoothing_while_transitioning: bool,
    /// Animation timing.
    pub animation: AnimationConfig,
    /// Vertical guide placement.
    pub guides: GuideConfig,
    /// Resampling used while morphing.
    pub resampling: Resampling,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            hit_slop: 0.0,
            smoothing_while_transitioning: true,
            animation: AnimationConfig::default(),
            guides: GuideConfig::default(),
            resampling: Resampling::default(),
        }
    }
}

impl ChartConfig {
    /// Set the edge hit slop.
    pub fn with_hit_slop(mut self, hit_slop: f64) -> Self {
        self.hit_slop = hit_slop;
        self
    }

    /// Enable or disable bezier smoothing during transitions.
    pub fn with_smoothing_while_transitioning(mut self, enabled: bool) -> Self {
        self.smoothing_while_transitioning = enabled;
        self
    }

    /// Replace the animation timing.
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Replace the guide placement.
    pub fn with_guides(mut self, guides: GuideConfig) -> Self {
        self.guides = guides;
        self
    }

    /// Set the morph resampling.
    pub fn with_resampling(mut self, resampling: Resampling) -> Self {
        self.resampling = resampling;
        self
    }

    /// Apply every field set in `overrides`.
    pub fn merged(mut self, overrides: &ChartConfigOverrides) -> Self {
        if let Some(hit_slop) = overrides.hit_slop {
            self.hit_slop = hit_slop;
        }
        if let Some(enabled) = overrides.smoothing_while_transitioning {
            self.smoothing_while_transitioning = enabled;
        }
        if let Some(spring) = &overrides.spring {
            self.animation.spring = spring.apply(self.animation.spring);
        }
        if let Some(ms) = overrides.feedback_duration_ms {
            self.animation.feedback_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = overrides.transition_duration_ms {
            self.animation.transition_duration = Duration::from_millis(ms);
        }
        if let Some(guides) = &overrides.guides {
            self.guides = guides.clone();
        }
        if let Some(resampling) = overrides.resampling {
            self.resampling = resampling;
        }
        self
    }
}

/// Partial spring parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringOverrides {
    /// Damping coefficient.
    pub damping: Option<f64>,
    /// Mass of the animated value.
    pub mass: Option<f64>,
    /// Spring stiffness.
    pub stiffness: Option<f64>,
}

impl SpringOverrides {
    fn apply(&self, base: SpringConfig) -> SpringConfig {
        SpringConfig {
            damping: self.damping.unwrap_or(base.damping),
            mass: self.mass.unwrap_or(base.mass),
            stiffness: self.stiffness.unwrap_or(base.stiffness),
        }
    }
}

/// Caller overrides for [`ChartConfig`]; unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfigOverrides {
    /// Edge hit slop.
    pub hit_slop: Option<f64>,
    /// Bezier smoothing during transitions.
    pub smoothing_while_transitioning: Option<bool>,
    /// Marker spring parameters.
    pub spring: Option<SpringOverrides>,
    /// Marker fade duration in milliseconds.
    pub feedback_duration_ms: Option<u64>,
    /// Transition duration in milliseconds.
    pub transition_duration_ms: Option<u64>,
    /// Guide placement.
    pub guides: Option<GuideConfig>,
    /// Morph resampling.
    pub resampling: Option<Resampling>,
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

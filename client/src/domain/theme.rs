//! Declarative UI colour palette and signature-progress traffic lights.
//!
//! The palette is pure data handed to whichever rendering layer draws the
//! dashboard. Serialising [`PALETTE`] yields the nested shape a utility-CSS
//! theme expects (`primary.DEFAULT`, `traffic.green`, ...).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A `#RRGGBB` colour literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(&'static str);

impl HexColor {
    /// Wrap a colour literal.
    pub const fn new(hex: &'static str) -> Self {
        Self(hex)
    }

    /// The colour literal including the leading `#`.
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Brand tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrimaryTones {
    /// Default teal.
    #[serde(rename = "DEFAULT")]
    pub default: HexColor,
    /// Light teal.
    pub light: HexColor,
    /// Dark teal.
    pub dark: HexColor,
}

/// Traffic-light tones used for progress indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrafficTones {
    /// On track.
    pub green: HexColor,
    /// Needs watching.
    pub yellow: HexColor,
    /// Needs attention.
    pub red: HexColor,
}

/// The full dashboard palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Brand tones.
    pub primary: PrimaryTones,
    /// Positive outcome.
    pub success: HexColor,
    /// Cautionary outcome.
    pub warning: HexColor,
    /// Destructive or failed outcome.
    pub danger: HexColor,
    /// Progress indicator tones.
    pub traffic: TrafficTones,
}

/// The palette shipped with the dashboard.
pub const PALETTE: Palette = Palette {
    primary: PrimaryTones {
        default: HexColor::new("#218090"),
        light: HexColor::new("#32B8C6"),
        dark: HexColor::new("#1a6370"),
    },
    success: HexColor::new("#22C55E"),
    warning: HexColor::new("#F59E0B"),
    danger: HexColor::new("#EF4444"),
    traffic: TrafficTones {
        green: HexColor::new("#10B981"),
        yellow: HexColor::new("#F59E0B"),
        red: HexColor::new("#EF4444"),
    },
};

/// Errors raised when classifying signature progress.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrafficLightError {
    /// A percentage was NaN or infinite.
    #[error("{name} must be a finite percentage, got {value}")]
    NonFinite {
        /// Which input was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Signature-progress classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficLight {
    /// At or above the required majority.
    Green,
    /// Between the critical threshold and the required majority.
    Yellow,
    /// Below the critical threshold.
    Red,
}

impl TrafficLight {
    /// Classify `signature_percentage` against campaign thresholds.
    ///
    /// `>= required_majority` is green, `>= critical_threshold` is yellow, and
    /// anything lower is red. The majority check runs first, so a critical
    /// threshold above the majority leaves no yellow band.
    ///
    /// # Examples
    /// ```
    /// use tama_client::domain::TrafficLight;
    ///
    /// let light = TrafficLight::classify(70.0, 66.0, 50.0).expect("valid thresholds");
    /// assert_eq!(light, TrafficLight::Green);
    /// assert_eq!(light.color(&tama_client::domain::PALETTE).as_str(), "#10B981");
    /// ```
    pub fn classify(
        signature_percentage: f64,
        required_majority: f64,
        critical_threshold: f64,
    ) -> Result<Self, TrafficLightError> {
        for (name, value) in [
            ("signature percentage", signature_percentage),
            ("required majority", required_majority),
            ("critical threshold", critical_threshold),
        ] {
            if !value.is_finite() {
                return Err(TrafficLightError::NonFinite { name, value });
            }
        }
        if signature_percentage >= required_majority {
            Ok(Self::Green)
        } else if signature_percentage >= critical_threshold {
            Ok(Self::Yellow)
        } else {
            Ok(Self::Red)
        }
    }

    /// Palette colour for this classification.
    pub const fn color(self, palette: &Palette) -> HexColor {
        match self {
            Self::Green => palette.traffic.green,
            Self::Yellow => palette.traffic.yellow,
            Self::Red => palette.traffic.red,
        }
    }
}

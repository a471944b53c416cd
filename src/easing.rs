//! Easing curves for lift tweens.
//!
//! Curves are named with the dotted identifiers animation tools commonly use
//! (`"expo.out"`, `"power3.out"`, `"sine.inOut"`), so configuration files can
//! refer to them by name:
//!
//! ```
//! use vista::Easing;
//!
//! let ease: Easing = "power3.out".parse().unwrap();
//! assert_eq!(ease, Easing::PowerOut(3));
//! assert_eq!(ease.to_string(), "power3.out");
//! ```

use std::fmt;
use std::str::FromStr;

/// Highest supported `powerN` family.
pub const MAX_POWER: u8 = 4;

/// Easing functions mapping linear progress to eased progress.
///
/// `PowerIn(n)` and friends use a polynomial of degree `n + 1`, so `power1`
/// is quadratic and `power3` is quartic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    /// Constant speed throughout.
    #[default]
    Linear,
    /// Start slow, accelerate.
    PowerIn(u8),
    /// Start fast, decelerate.
    PowerOut(u8),
    /// Start slow, speed up, then slow down.
    PowerInOut(u8),
    ExpoIn,
    /// Very fast start with a long exponential tail.
    ExpoOut,
    ExpoInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::PowerIn(n) => t.powi(exponent(n)),
            Easing::PowerOut(n) => 1.0 - (1.0 - t).powi(exponent(n)),
            Easing::PowerInOut(n) => {
                if t < 0.5 {
                    0.5 * (2.0 * t).powi(exponent(n))
                } else {
                    1.0 - 0.5 * (2.0 * (1.0 - t)).powi(exponent(n))
                }
            }
            Easing::ExpoIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::SineIn => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

fn exponent(power: u8) -> i32 {
    i32::from(power.min(MAX_POWER)) + 1
}

/// An easing identifier that names no known curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseEasingError(pub String);

impl fmt::Display for ParseEasingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown easing: '{}'", self.0)
    }
}

impl std::error::Error for ParseEasingError {}

#[derive(Clone, Copy)]
enum Mode {
    In,
    Out,
    InOut,
}

impl FromStr for Easing {
    type Err = ParseEasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let (family, mode) = match lowered.split_once('.') {
            Some((family, mode)) => (family, Some(mode)),
            None => (lowered.as_str(), None),
        };

        let err = || ParseEasingError(s.to_string());

        if family == "linear" || family == "none" {
            return match mode {
                None | Some("none") | Some("in") | Some("out") | Some("inout") => {
                    Ok(Easing::Linear)
                }
                Some(_) => Err(err()),
            };
        }

        // A bare family name eases out, like most animation tools default to.
        let mode = match mode {
            None | Some("out") => Mode::Out,
            Some("in") => Mode::In,
            Some("inout") => Mode::InOut,
            Some(_) => return Err(err()),
        };

        let power = match family {
            "quad" => Some(1),
            "cubic" => Some(2),
            "quart" => Some(3),
            "quint" | "strong" => Some(4),
            _ => family
                .strip_prefix("power")
                .and_then(|n| n.parse::<u8>().ok()),
        };

        if let Some(n) = power {
            if n > MAX_POWER {
                return Err(err());
            }
            return Ok(match mode {
                Mode::In => Easing::PowerIn(n),
                Mode::Out => Easing::PowerOut(n),
                Mode::InOut => Easing::PowerInOut(n),
            });
        }

        match (family, mode) {
            ("expo", Mode::In) => Ok(Easing::ExpoIn),
            ("expo", Mode::Out) => Ok(Easing::ExpoOut),
            ("expo", Mode::InOut) => Ok(Easing::ExpoInOut),
            ("sine", Mode::In) => Ok(Easing::SineIn),
            ("sine", Mode::Out) => Ok(Easing::SineOut),
            ("sine", Mode::InOut) => Ok(Easing::SineInOut),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::PowerIn(n) => write!(f, "power{n}.in"),
            Easing::PowerOut(n) => write!(f, "power{n}.out"),
            Easing::PowerInOut(n) => write!(f, "power{n}.inOut"),
            Easing::ExpoIn => write!(f, "expo.in"),
            Easing::ExpoOut => write!(f, "expo.out"),
            Easing::ExpoInOut => write!(f, "expo.inOut"),
            Easing::SineIn => write!(f, "sine.in"),
            Easing::SineOut => write!(f, "sine.out"),
            Easing::SineInOut => write!(f, "sine.inOut"),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = ParseEasingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.to_string()
    }
}

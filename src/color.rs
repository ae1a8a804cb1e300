//! Cell color genetics.
//!
//! Colors live in RGB space on the grid and in HSL space while mutating. A newborn
//! cell takes the color of its parents; when every parent agrees on one color the
//! offspring drifts by a random amount on each HSL axis, bounded by the mutation
//! speeds. Offspring that drift too close to black are never born.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};

/// Upper bound for both mutation speeds.
pub const MAX_MUTATION_SPEED: f64 = 50.0;

/// Offspring whose mutated lightness falls below this value die at birth.
pub const DEATH_LIGHTNESS: f64 = 5.0;

/// An 8-bit RGB color, written as `#rrggbb` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb` (either case).
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(SandboxError::InvalidColor(text.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| SandboxError::InvalidColor(text.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = SandboxError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self)
    }
}

pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new((h * 60.0).rem_euclid(360.0), s * 100.0, l * 100.0)
}

/// Out-of-range input is normalized: hue wraps, saturation and lightness clamp.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = hsl.h.rem_euclid(360.0);
    let s = (hsl.s / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l / 100.0).clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let quantize = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(quantize(r), quantize(g), quantize(b))
}

/// Maximum random drift per HSL axis applied to a newborn cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MutationSpeeds {
    hue_sat: f64,
    lightness: f64,
}

impl MutationSpeeds {
    pub const NONE: Self = Self {
        hue_sat: 0.0,
        lightness: 0.0,
    };

    /// Both speeds are clamped into `[0, MAX_MUTATION_SPEED]`.
    pub fn new(hue_sat: f64, lightness: f64) -> Self {
        Self {
            hue_sat: clamp_speed(hue_sat),
            lightness: clamp_speed(lightness),
        }
    }

    pub fn hue_sat(&self) -> f64 {
        self.hue_sat
    }

    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    pub fn is_zero(&self) -> bool {
        self.hue_sat == 0.0 && self.lightness == 0.0
    }
}

pub(crate) fn clamp_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.clamp(0.0, MAX_MUTATION_SPEED)
    } else {
        0.0
    }
}

fn drift<R: Rng + ?Sized>(rng: &mut R, speed: f64) -> f64 {
    if speed > 0.0 {
        rng.random_range(-speed..=speed)
    } else {
        0.0
    }
}

/// Applies one random drift per axis. Returns `None` when the offspring ends up
/// darker than [`DEATH_LIGHTNESS`].
pub fn mutate<R: Rng + ?Sized>(color: Rgb, speeds: MutationSpeeds, rng: &mut R) -> Option<Rgb> {
    let hsl = color.to_hsl();
    let h = (hsl.h + drift(rng, speeds.hue_sat)).rem_euclid(360.0);
    let s = (hsl.s + drift(rng, speeds.hue_sat)).clamp(0.0, 100.0);
    let l = (hsl.l + drift(rng, speeds.lightness)).clamp(0.0, 100.0);

    if l < DEATH_LIGHTNESS {
        return None;
    }
    Some(Hsl::new(h, s, l).to_rgb())
}

/// Picks the color of a newborn cell from its parents, given in neighbor scan order.
///
/// Parents that disagree pass on the first color verbatim. Parents that all agree
/// pass on a mutated copy, unless both speeds are zero. `None` means the cell is
/// not born.
pub fn inherit<R: Rng + ?Sized>(
    parents: &[Rgb],
    speeds: MutationSpeeds,
    rng: &mut R,
) -> Option<Rgb> {
    let (&first, rest) = parents.split_first()?;
    let unanimous = rest.iter().all(|&c| c == first);

    if unanimous && !speeds.is_zero() {
        mutate(first, speeds, rng)
    } else {
        Some(first)
    }
}

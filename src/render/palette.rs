//! Fill colors and the palette a run draws from

use crate::io::error::{PatternError, Result, invalid_color};
use crate::math::random::random_index;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A color as supplied by the content source, with its parsed RGBA value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color {
    raw: String,
    rgba: [u8; 4],
}

impl Color {
    /// Build a color directly from RGBA components
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self {
            raw: format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
            rgba,
        }
    }

    /// The string this color was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Straight (non-premultiplied) RGBA components
    pub const fn rgba(&self) -> [u8; 4] {
        self.rgba
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Color {
    type Err = PatternError;

    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` with `a` in `[0, 1]`, and a few named colors
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let lowered = trimmed.to_ascii_lowercase();

        let rgba = if let Some(hex) = lowered.strip_prefix('#') {
            parse_hex(value, hex)?
        } else if let Some(args) = lowered
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_functional(value, args, true)?
        } else if let Some(args) = lowered
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            parse_functional(value, args, false)?
        } else {
            named(&lowered).ok_or_else(|| invalid_color(value, &"unrecognized color format"))?
        };

        Ok(Self {
            raw: trimmed.to_string(),
            rgba,
        })
    }
}

fn parse_hex(value: &str, hex: &str) -> Result<[u8; 4]> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_color(value, &"non-hexadecimal digit"));
    }

    let digit = |index: usize| -> Result<u8> {
        hex.get(index..=index)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
            .ok_or_else(|| invalid_color(value, &"truncated hex color"))
    };
    let pair = |index: usize| -> Result<u8> {
        hex.get(index..index + 2)
            .and_then(|d| u8::from_str_radix(d, 16).ok())
            .ok_or_else(|| invalid_color(value, &"truncated hex color"))
    };

    match hex.len() {
        3 => Ok([digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255]),
        4 => Ok([
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            digit(3)? * 17,
        ]),
        6 => Ok([pair(0)?, pair(2)?, pair(4)?, 255]),
        8 => Ok([pair(0)?, pair(2)?, pair(4)?, pair(6)?]),
        len => Err(invalid_color(
            value,
            &format!("hex color has {len} digits, expected 3, 4, 6 or 8"),
        )),
    }
}

fn parse_functional(value: &str, args: &str, with_alpha: bool) -> Result<[u8; 4]> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let expected = if with_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return Err(invalid_color(
            value,
            &format!("expected {expected} components, found {}", parts.len()),
        ));
    }

    let mut rgba = [0, 0, 0, 255];
    for (slot, part) in rgba.iter_mut().zip(parts.iter().take(3)) {
        *slot = part
            .parse::<u8>()
            .map_err(|e| invalid_color(value, &format!("channel '{part}': {e}")))?;
    }

    if with_alpha {
        let alpha = parts
            .get(3)
            .and_then(|a| a.parse::<f64>().ok())
            .filter(|a| (0.0..=1.0).contains(a))
            .ok_or_else(|| invalid_color(value, &"alpha must be a number in [0, 1]"))?;
        rgba[3] = (alpha * 255.0).round() as u8;
    }

    Ok(rgba)
}

fn named(name: &str) -> Option<[u8; 4]> {
    let rgba = match name {
        "white" => [255, 255, 255, 255],
        "black" => [0, 0, 0, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 128, 0, 255],
        "blue" => [0, 0, 255, 255],
        "transparent" => [0, 0, 0, 0],
        _ => return None,
    };
    Some(rgba)
}

/// Ordered, non-empty set of fill colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette from parsed colors
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::EmptyPalette`] when `colors` is empty
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PatternError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parse every string and build a palette from the results
    ///
    /// # Errors
    ///
    /// Returns an error if any color fails to parse or the list is empty
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let colors = values
            .iter()
            .map(|value| value.as_ref().parse())
            .collect::<Result<Vec<Color>>>()?;
        Self::new(colors)
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Index of a uniformly chosen color, `floor(random() * len)`
    pub fn choose_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        random_index(rng, self.colors.len()).unwrap_or(0)
    }

    /// A uniformly chosen color and its index, with replacement
    ///
    /// # Panics
    ///
    /// Only on an empty palette, which [`Palette::new`] refuses to build
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, &Color) {
        let index = self.choose_index(rng);
        let color = self
            .colors
            .get(index)
            .or_else(|| self.colors.first())
            .unwrap_or_else(|| unreachable!("palette is never empty"));
        (index, color)
    }
}

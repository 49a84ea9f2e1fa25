// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

/// A normalized RGB color.
///
/// Two colors are equal iff all three channels match exactly.
/// An unparseable string produces no color at all, so it can never
/// compare equal to a valid one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// Constructs a new color.
    #[inline]
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Parses a color from a string.
    ///
    /// Recognizes the `rgb(r, g, b)` form with integer channel values,
    /// each independently possibly percentage-scaled, as well as named
    /// and hex colors.
    ///
    /// `currentColor` is not a color and will not parse.
    pub fn parse(text: &str) -> Option<Color> {
        let s = text.trim();
        if s.starts_with("rgb(") {
            // An `rgb(` prefix that does not scan is not a color,
            // it must not fall through to the generic grammar.
            return parse_rgb(s);
        }

        let c = svgtypes::Color::from_str(s).ok()?;
        Some(Color::new(c.red, c.green, c.blue))
    }
}

impl std::fmt::Display for Color {
    /// Formats the color in its canonical form: lowercase `#rrggbb`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Scans `rgb(r[%], g[%], b[%])` with integer channels.
///
/// A percentage channel is scaled as `v * 255 / 100` with integer
/// truncation. Out-of-range channels invalidate the whole color.
fn parse_rgb(s: &str) -> Option<Color> {
    let s = s.strip_prefix("rgb(")?;
    let s = s.strip_suffix(')')?;

    let mut channels = [0u8; 3];
    let mut parts = s.split(',');
    for channel in &mut channels {
        let part = parts.next()?.trim();
        let (digits, percent) = match part.strip_suffix('%') {
            Some(digits) => (digits, true),
            None => (part, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut value: u32 = digits.parse().ok()?;
        if percent {
            value = value.checked_mul(255)? / 100;
        }
        if value > 255 {
            return None;
        }

        *channel = value as u8;
    }

    if parts.next().is_some() {
        return None;
    }

    Some(Color::new(channels[0], channels[1], channels[2]))
}

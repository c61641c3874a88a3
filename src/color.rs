use image::Rgba;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default channel tolerance used when nothing else is configured
pub const DEFAULT_TOLERANCE: u8 = 20;

/// An 8-bit RGB color. Alpha is never part of a comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_pixel(pixel: &Rgba<u8>) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    pub fn to_pixel(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, String> {
        let trimmed = hex.trim().trim_start_matches('#');
        if trimmed.len() != 6 || !trimmed.is_ascii() {
            return Err(format!("Invalid hex color '{}': expected #RRGGBB", hex));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&trimmed[range], 16)
                .map_err(|e| format!("Invalid hex color '{}': {}", hex, e))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Uniformly distributed over the full 24-bit RGB space.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let packed: u32 = rng.random_range(0..1 << 24);
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Per-channel similarity: every channel must differ by at most `tolerance`.
pub fn matches(c1: Color, c2: Color, tolerance: u8) -> bool {
    c1.r.abs_diff(c2.r) <= tolerance
        && c1.g.abs_diff(c2.g) <= tolerance
        && c1.b.abs_diff(c2.b) <= tolerance
}

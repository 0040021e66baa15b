use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA8 color as written in props files.
///
/// Deserializes from `"#RRGGBB"`, `"#RRGGBBAA"`, `{ "r", "g", "b", "a"? }` (0..=255) or a
/// `[r, g, b]` / `[r, g, b, a]` array. Serializes back to a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (straight, not premultiplied).
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(format!("invalid hex color \"{s}\""));
        }

        fn byte(s: &str, at: usize) -> Result<u8, String> {
            let pair = &s[at..at + 2];
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        match s.len() {
            6 => Ok(Self::rgb(byte(s, 0)?, byte(s, 2)?, byte(s, 4)?)),
            8 => Ok(Self::rgba(byte(s, 0)?, byte(s, 2)?, byte(s, 4)?, byte(s, 6)?)),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA".to_owned()),
        }
    }

    /// Lowercase `#rrggbb` (opaque) or `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Premultiply for compositing.
    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                &[r, g, b] => Ok(Self::rgb(r, g, b)),
                &[r, g, b, a] => Ok(Self::rgba(r, g, b, a)),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;

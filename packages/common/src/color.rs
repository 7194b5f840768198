use crate::error::CommonError;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color with channels in `0.0..=1.0`, the way the design tool stores paints.
///
/// Documents may spell a color as a hex string (`#f60`, `#ff6600`, `#ff6600cc`) or as
/// an `{ r, g, b, a? }` object. It is always written back out in object form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorLiteral")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorLiteral {
    Hex(String),
    Channels {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default)]
        a: Option<f64>,
    },
}

impl TryFrom<ColorLiteral> for Color {
    type Error = CommonError;

    fn try_from(literal: ColorLiteral) -> Result<Self, Self::Error> {
        match literal {
            ColorLiteral::Hex(hex) => Color::from_hex(&hex),
            ColorLiteral::Channels { r, g, b, a } => Color::new(r, g, b, a.unwrap_or(1.0)),
        }
    }
}

impl Color {
    /// Build a color, rejecting channels outside `0.0..=1.0`
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> CommonResult<Self> {
        for (channel, value) in [("r", r), ("g", g), ("b", b), ("a", a)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CommonError::invalid_color(
                    format!("{{ r: {}, g: {}, b: {}, a: {} }}", r, g, b, a),
                    format!("channel '{}' must be between 0 and 1", channel),
                ));
            }
        }
        Ok(Self { r, g, b, a })
    }

    /// Opaque color from channels already known to be in range
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_hex(value: &str) -> CommonResult<Self> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| CommonError::invalid_color(value, "expected a leading '#'"))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CommonError::invalid_color(value, "not valid hex"));
        }

        let expanded: String = match digits.len() {
            3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => digits.to_string(),
            _ => {
                return Err(CommonError::invalid_color(
                    value,
                    "expected 3, 4, 6 or 8 hex digits",
                ))
            }
        };

        let mut channels = [1.0f64; 4];
        for (i, chunk) in expanded.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk)
                .map_err(|_| CommonError::invalid_color(value, "not valid hex"))?;
            let byte = u8::from_str_radix(pair, 16)
                .map_err(|_| CommonError::invalid_color(value, "not valid hex"))?;
            channels[i] = f64::from(byte) / 255.0;
        }

        Ok(Self {
            r: channels[0],
            g: channels[1],
            b: channels[2],
            a: channels[3],
        })
    }

    /// Hex form, with an alpha pair only when the color is translucent
    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c * 255.0).round() as u8;
        if self.a < 1.0 {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(self.r),
                byte(self.g),
                byte(self.b),
                byte(self.a)
            )
        } else {
            format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

//! The color oracle: parses a TIM color spec into an SGR parameter string.
//!
//! The distilled spec treats this as an external collaborator supplied by a
//! host application. This crate has no host, so it carries a concrete,
//! minimal oracle grounded in the same tri-modal representation
//! (basic/indexed/truecolor) `thag_styling::ColorValue` uses, adapted to
//! TIM's bracket-tag spelling.

use crate::error::{TimError, TimResult};

/// A resolved color: the raw SGR parameter string it contributes, plus
/// whether it targets the background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Color {
    /// SGR parameter string, e.g. `"31"` or `"38;5;141"` — not a full escape.
    pub sequence: String,
    /// Whether this color sets the background rather than the foreground.
    pub is_background: bool,
}

static NAMED_COLORS: phf::Map<&'static str, u8> = phf::phf_map! {
    "black" => 30,
    "red" => 31,
    "green" => 32,
    "yellow" => 33,
    "blue" => 34,
    "magenta" => 35,
    "cyan" => 36,
    "white" => 37,
    "bright-black" => 90,
    "bright-red" => 91,
    "bright-green" => 92,
    "bright-yellow" => 93,
    "bright-blue" => 94,
    "bright-magenta" => 95,
    "bright-cyan" => 96,
    "bright-white" => 97,
};

/// Parses a TIM color spec (named, 8-bit index, truecolor, `@`-prefixed
/// background) into a [`Color`].
///
/// # Errors
///
/// Returns [`TimError::ColorSyntaxError`] if `spec` matches none of the
/// supported forms.
pub fn parse_color(spec: &str) -> TimResult<Color> {
    let (is_background, rest) = match spec.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };

    if rest.is_empty() {
        return Err(TimError::ColorSyntaxError(spec.to_string()));
    }

    if let Some(&base) = NAMED_COLORS.get(rest) {
        let code = if is_background { base + 10 } else { base };
        return Ok(Color {
            sequence: code.to_string(),
            is_background,
        });
    }

    let parts: Vec<&str> = rest.split(';').collect();

    if parts.len() == 3 {
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(parts.iter()) {
            *slot = part
                .parse()
                .map_err(|_| TimError::ColorSyntaxError(spec.to_string()))?;
        }
        let prefix = if is_background { "48" } else { "38" };
        return Ok(Color {
            sequence: format!("{prefix};2;{};{};{}", rgb[0], rgb[1], rgb[2]),
            is_background,
        });
    }

    if parts.len() == 1 {
        if let Ok(index) = rest.parse::<u16>() {
            if index <= 255 {
                let prefix = if is_background { "48" } else { "38" };
                return Ok(Color {
                    sequence: format!("{prefix};5;{index}"),
                    is_background,
                });
            }
        }
    }

    Err(TimError::ColorSyntaxError(spec.to_string()))
}

//! Lexes an already-rendered ANSI string — SGR CSI sequences, cursor-position
//! CSI sequences, and OSC 8 hyperlinks — back into the same token model.
//! Grounded on `pytermgui/markup/parsing.py::tokenize_ansi`.

use crate::color::{parse_color, Color};
use crate::error::{TimError, TimResult};
use crate::style_maps::{REVERSE_CLEARERS, REVERSE_STYLES};
use crate::token::Token;
use crate::util::re;

fn ansi_re() -> &'static regex::Regex {
    re!(concat!(
        r"(\x1b\[([0-9;]*)([A-Za-z]))",
        r"|(\x1b\]8;;([^\x1b]*)\x1b\\([^\x1b]*?)\x1b\]8;;\x1b\\)"
    ))
}

/// Recognizes a raw SGR basic-color parameter (`30`-`37`, `40`-`47`,
/// `90`-`97`, `100`-`107`) as emitted directly by a terminal, distinct from
/// the TIM markup spec syntax that [`parse_color`] accepts.
fn standard_sgr_color(code: &str) -> Option<Color> {
    let n: u16 = code.parse().ok()?;
    let is_background = matches!(n, 40..=47 | 100..=107);
    match n {
        30..=37 | 90..=97 | 40..=47 | 100..=107 => Some(Color {
            sequence: code.to_string(),
            is_background,
        }),
        _ => None,
    }
}

fn strip_color_code_prefix(code: &str) -> String {
    let is_background = code.starts_with('4');
    let body_start = 5usize;
    let body_end = code.len().saturating_sub(1);
    let stripped = if body_end > body_start {
        &code[body_start..body_end]
    } else {
        ""
    };
    if is_background {
        format!("@{stripped}")
    } else {
        stripped.to_string()
    }
}

/// Tokenizes an ANSI-bearing string.
///
/// # Errors
///
/// Returns [`TimError::AnsiParseError`] for unparseable SGR parts, malformed
/// cursor-position sequences, or unsupported CSI final bytes.
pub fn tokenize_ansi(text: &str) -> TimResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;

    for caps in ansi_re().captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always present");
        let (start, end) = (whole.start(), whole.end());

        if cursor < start {
            tokens.push(Token::Plain(text[cursor..start].to_string()));
        }
        cursor = end;

        if let Some(uri) = caps.get(5) {
            let label = caps.get(6).expect("label group present when uri matches");
            tokens.push(Token::Hyperlink(uri.as_str().to_string()));
            tokens.push(Token::Plain(label.as_str().to_string()));
            continue;
        }

        let content = caps.get(2).expect("content group present for CSI").as_str();
        let final_byte = caps.get(3).expect("final byte present for CSI").as_str();

        if final_byte == "H" {
            let parts: Vec<&str> = content.split(';').collect();
            if parts.len() != 2 {
                return Err(TimError::AnsiParseError(format!(
                    "cursor sequence must have exactly one `;`, got {content:?}"
                )));
            }
            let y = if parts[0].is_empty() {
                None
            } else {
                Some(parts[0].parse::<i32>().map_err(|_| {
                    TimError::AnsiParseError(format!("bad cursor y {:?}", parts[0]))
                })?)
            };
            let x = if parts[1].is_empty() {
                None
            } else {
                Some(parts[1].parse::<i32>().map_err(|_| {
                    TimError::AnsiParseError(format!("bad cursor x {:?}", parts[1]))
                })?)
            };
            if y.is_none() && x.is_none() {
                return Err(TimError::AnsiParseError(
                    "cannot parse cursor when no position is supplied".to_string(),
                ));
            }
            tokens.push(Token::Cursor(y, x));
            continue;
        }

        if final_byte != "m" {
            return Err(TimError::AnsiParseError(format!(
                "unsupported CSI final byte {final_byte:?}"
            )));
        }

        if content.is_empty() {
            tokens.push(Token::Clear("/".to_string()));
            continue;
        }

        let parts: Vec<&str> = content.split(';').collect();
        let mut in_color = false;
        let mut color_code = String::new();
        let mut i = 0usize;

        while i < parts.len() {
            let part = parts[i];

            if !in_color {
                if let Some(&name) = REVERSE_STYLES.get(part) {
                    tokens.push(Token::Style(
                        name.parse().expect("REVERSE_STYLES values are valid StyleNames"),
                    ));
                    i += 1;
                    continue;
                }
                if let Some(&tag) = REVERSE_CLEARERS.get(part) {
                    tokens.push(Token::Clear(tag.to_string()));
                    i += 1;
                    continue;
                }
                if part == "38" || part == "48" {
                    in_color = true;
                    color_code.push_str(part);
                    color_code.push(';');
                    i += 1;
                    continue;
                }
                if let Some(color) = standard_sgr_color(part) {
                    tokens.push(Token::Color(part.to_string(), color));
                    i += 1;
                    continue;
                }
                return Err(TimError::AnsiParseError(format!(
                    "unrecognised SGR part {part:?}"
                )));
            }

            color_code.push_str(part);
            color_code.push(';');
            i += 1;

            let is_truecolor_prefix =
                color_code.starts_with("38;2;") || color_code.starts_with("48;2;");
            if is_truecolor_prefix && color_code.split(';').count() != 6 {
                continue;
            }

            let is_indexed_prefix =
                color_code.starts_with("38;5;") || color_code.starts_with("48;5;");
            let code = if is_truecolor_prefix || is_indexed_prefix {
                strip_color_code_prefix(&color_code)
            } else {
                color_code.clone()
            };

            match parse_color(&code) {
                Ok(color) => {
                    tokens.push(Token::Color(code, color));
                    in_color = false;
                    color_code.clear();
                }
                Err(_) => {}
            }
        }
    }

    if cursor < text.len() {
        tokens.push(Token::Plain(text[cursor..].to_string()));
    }

    Ok(tokens)
}

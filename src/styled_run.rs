//! Groups an ANSI- or markup-tokenized string into maximal runs of plain
//! text paired with their active style set and hyperlink. Grounded on
//! `pytermgui/markup/language.py::MarkupLanguage.group_styles`.

use crate::color::Color;
use crate::error::TimResult;
use crate::style_maps::STYLES;
use crate::token::Token;

/// A maximal contiguous slice of rendered output sharing one set of active
/// style tokens and (optionally) one hyperlink.
///
/// The length of a run is the length of `plain`; slicing it should carry
/// `sequences` along with any sliced `plain`, so that any prefix of the run
/// keeps the full active style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyledRun {
    /// The rendered SGR sequence(s) active for this run's `plain` text.
    pub sequences: String,
    /// The printable text this run covers.
    pub plain: String,
    /// The tokens (styling plus the trailing `Plain`) that produced this run.
    pub tokens: Vec<Token>,
    /// The hyperlink URI active over this run, if any.
    pub link: Option<String>,
}

fn render_set_token(token: &Token) -> String {
    match token {
        Token::Style(name) => STYLES
            .get(name.to_string().as_str())
            .map_or_else(String::new, |code| format!("\x1b[{code}m")),
        Token::Color(_, Color { sequence, .. }) => format!("\x1b[{sequence}m"),
        Token::Cursor(y, x) => {
            let y = y.map_or_else(String::new, |v| v.to_string());
            let x = x.map_or_else(String::new, |v| v.to_string());
            format!("\x1b[{y};{x}H")
        }
        _ => String::new(),
    }
}

fn render_accum(accum: &[Token]) -> String {
    accum.iter().map(render_set_token).collect()
}

/// Splits `text` into [`StyledRun`]s using `tokenizer` (typically
/// [`crate::markup_tokenizer::tokenize_markup`] or
/// [`crate::ansi_tokenizer::tokenize_ansi`]) to produce the underlying tokens.
///
/// # Errors
///
/// Propagates any error `tokenizer` returns.
pub fn group_styles(
    text: &str,
    tokenizer: impl Fn(&str) -> TimResult<Vec<Token>>,
) -> TimResult<Vec<StyledRun>> {
    let tokens = tokenizer(text)?;
    let mut runs = Vec::new();
    let mut accum: Vec<Token> = Vec::new();
    let mut link: Option<String> = None;

    for token in tokens {
        match &token {
            Token::Plain(v) => {
                let mut run_tokens = accum.clone();
                run_tokens.push(token.clone());
                runs.push(StyledRun {
                    sequences: render_accum(&accum),
                    plain: v.clone(),
                    tokens: run_tokens,
                    link: link.clone(),
                });
                accum.retain(|t| !t.is_cursor());
            }

            Token::Clear(tag) => {
                accum.retain(|t| !token.targets(t));
                if accum.last().is_some_and(|last| last == &token) {
                    accum.pop();
                }
                if tag == "/" || tag == "/~" {
                    link = None;
                }
            }

            Token::Hyperlink(uri) => link = Some(uri.clone()),

            _ => {
                if accum.iter().all(Token::is_clear) {
                    accum.clear();
                }
                accum.push(token);
            }
        }
    }

    Ok(runs)
}

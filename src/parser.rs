//! Substitutes aliases, applies macros, and renders a token stream to a
//! terminal-ready string. Grounded on
//! `pytermgui/markup/parsing.py::{parse, parse_tokens, _sub_aliases, parse_*}`.

use crate::context::{eval_alias, Context};
use crate::error::{TimError, TimResult};
use crate::markup_tokenizer::tokenize_markup;
use crate::optimizer::optimize_tokens;
use crate::style_maps::{CLEARERS, STYLES};
use crate::token::Token;

/// The key a token would be looked up by in [`Context`]'s alias table, if
/// it is a substitution candidate at all.
fn substitution_key(token: &Token) -> Option<&str> {
    match token {
        Token::Alias(name) => Some(name.as_str()),
        Token::Clear(tag) => Some(tag.as_str()),
        Token::Macro(name, _) => Some(name.as_str()),
        _ => None,
    }
}

/// Expands every alias-bound `Alias`/`Clear`/`Macro` token into the tokens
/// its (freshly re-evaluated) expansion produces, and rewrites the deprecated
/// `!link` macro shim into a `Hyperlink` token.
fn sub_aliases(tokens: Vec<Token>, ctx: &Context) -> TimResult<Vec<Token>> {
    let mut output = Vec::new();

    for token in tokens {
        if let Some(key) = substitution_key(&token) {
            if let Some(body) = ctx.alias_body(key) {
                let expanded = eval_alias(body, ctx);
                let retokenized = tokenize_markup(&format!("[{expanded}]"))?;
                output.extend(retokenized);
                continue;
            }
        }

        if let Token::Macro(name, args) = &token {
            if name == "!link" {
                log::warn!(
                    "the `!link` macro is deprecated; use `~{{uri}}` hyperlink syntax instead"
                );
                output.push(Token::Hyperlink(args.join(":")));
                continue;
            }
        }

        output.push(token);
    }

    Ok(output)
}

/// Renders a tokenized, alias-substituted stream to a terminal-ready string.
///
/// # Errors
///
/// Propagates alias re-tokenization failures, [`TimError::UndefinedMacro`]
/// for a macro with no binding, and [`TimError::DanglingMacroClearer`] for a
/// `/!name` clearer with no matching active macro.
pub fn parse_tokens(
    tokens: Vec<Token>,
    optimize: bool,
    ctx: &Context,
    append_reset: bool,
) -> TimResult<String> {
    let mut tokens = sub_aliases(tokens, ctx)?;

    if optimize {
        tokens = optimize_tokens(tokens);
    }

    if append_reset {
        tokens.push(Token::Clear("/".to_string()));
    }

    let mut output = String::new();
    let mut segment = String::new();
    let mut active_macros: Vec<Token> = Vec::new();
    let mut link: Option<String> = None;

    for token in tokens {
        match &token {
            Token::Plain(value) => {
                let mut text = value.clone();

                for macro_token in &active_macros {
                    let Token::Macro(name, args) = macro_token else {
                        unreachable!("active_macros only ever holds Token::Macro");
                    };
                    let f = ctx
                        .macro_fn(name)
                        .ok_or_else(|| TimError::UndefinedMacro(name.clone()))?;
                    let mut call_args = args.clone();
                    call_args.push(text);
                    text = f(&call_args);
                }

                output.push_str(&segment);
                segment.clear();

                if let Some(uri) = &link {
                    output.push_str(&format!("\x1b]8;;{uri}\x1b\\{text}\x1b]8;;\x1b\\"));
                } else {
                    output.push_str(&text);
                }
            }

            Token::Hyperlink(uri) => link = Some(uri.clone()),

            Token::Macro(..) => active_macros.push(token.clone()),

            Token::Clear(tag) => {
                if tag == "/" || tag == "/~" {
                    link = None;
                }

                let matched_macro = active_macros
                    .iter()
                    .position(|m| token.targets(m));

                if let Some(i) = matched_macro {
                    active_macros.remove(i);
                    if tag != "/" {
                        continue;
                    }
                }

                if tag.starts_with("/!") && matched_macro.is_none() {
                    return Err(TimError::DanglingMacroClearer(tag.clone()));
                }

                if let Some(&code) = CLEARERS.get(tag.as_str()) {
                    segment.push_str(&format!("\x1b[{code}m"));
                } else {
                    log::debug!(
                        "clearer {tag:?} matched neither an active macro nor a static code; dropped"
                    );
                }
            }

            Token::Style(name) => {
                let code = STYLES
                    .get(name.to_string().as_str())
                    .expect("every StyleName has a STYLES entry");
                segment.push_str(&format!("\x1b[{code}m"));
            }

            Token::Color(_, color) => {
                segment.push_str(&format!("\x1b[{}m", color.sequence));
            }

            Token::Cursor(y, x) => {
                let y = y.map_or_else(String::new, |v| v.to_string());
                let x = x.map_or_else(String::new, |v| v.to_string());
                segment.push_str(&format!("\x1b[{y};{x}H"));
            }

            Token::Alias(name) => {
                // Unresolved (never aliased) — nothing to render.
                let _ = name;
            }
        }
    }

    output.push_str(&segment);
    Ok(output)
}

/// Tokenizes `text` as markup and renders it, using `ctx` for alias/macro
/// resolution.
///
/// # Errors
///
/// See [`parse_tokens`] and [`tokenize_markup`].
pub fn parse(text: &str, optimize: bool, ctx: &Context, append_reset: bool) -> TimResult<String> {
    let tokens = tokenize_markup(text)?;
    parse_tokens(tokens, optimize, ctx, append_reset)
}

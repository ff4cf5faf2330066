//! Lexes TIM markup source — plain text interleaved with `[tag tag …]`
//! groups — into a token stream. Grounded on
//! `pytermgui/markup/parsing.py::tokenize_markup`.

use crate::color::parse_color;
use crate::error::{TimError, TimResult};
use crate::token::{StyleName, Token};
use crate::util::re;

fn tag_group_re() -> &'static regex::Regex {
    re!(r"(\\*)\[([^\[\]]*)\]")
}

fn macro_re() -> &'static regex::Regex {
    re!(r"^!([A-Za-z_][A-Za-z0-9_-]*)(?::(.*))?$")
}

fn parse_optional_coord(part: &str, whole: &str) -> TimResult<Option<i32>> {
    if part.is_empty() {
        return Ok(None);
    }
    part.parse::<i32>()
        .map(Some)
        .map_err(|_| TimError::InvalidCursorTag(whole.to_string()))
}

/// Classifies a single tag (already split out of its bracket group) into a
/// [`Token`], in classification precedence order.
fn consume_tag(tag: &str) -> TimResult<Token> {
    if let Ok(style) = tag.parse::<StyleName>() {
        return Ok(Token::Style(style));
    }

    if let Some(stripped) = tag.strip_prefix('/') {
        let _ = stripped;
        return Ok(Token::Clear(tag.to_string()));
    }

    if tag.starts_with('!') {
        if let Some(caps) = macro_re().captures(tag) {
            let name = format!("!{}", &caps[1]);
            let args = caps
                .get(2)
                .map(|m| m.as_str().split(':').map(String::from).collect())
                .unwrap_or_default();
            return Ok(Token::Macro(name, args));
        }
        // Malformed macro tag: per spec, only cursor-tag failures are fatal.
        return Ok(Token::Alias(tag.to_string()));
    }

    if let Some(uri) = tag.strip_prefix('~') {
        return Ok(Token::Hyperlink(uri.to_string()));
    }

    if tag.starts_with('(') && tag.ends_with(')') && tag.len() >= 2 {
        let inner = &tag[1..tag.len() - 1];
        let parts: Vec<&str> = inner.split(';').collect();
        if parts.len() != 2 {
            return Err(TimError::InvalidCursorTag(tag.to_string()));
        }
        let y = parse_optional_coord(parts[0], tag)?;
        let x = parse_optional_coord(parts[1], tag)?;
        return Ok(Token::Cursor(y, x));
    }

    match parse_color(tag) {
        Ok(color) => Ok(Token::Color(tag.to_string(), color)),
        Err(_) => Ok(Token::Alias(tag.to_string())),
    }
}

/// Tokenizes TIM markup source.
///
/// # Errors
///
/// Returns [`TimError::InvalidCursorTag`] for a malformed `(y;x)` tag.
pub fn tokenize_markup(text: &str) -> TimResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut cursor = 0usize;
    let mut has_inverse = false;

    for caps in tag_group_re().captures_iter(text) {
        let full = caps.get(0).expect("group 0 always present");
        let escapes = caps.get(1).expect("escapes group present").as_str();
        let content = caps.get(2).expect("content group present").as_str();
        let (start, end) = (full.start(), full.end());

        if cursor < start {
            tokens.push(Token::Plain(text[cursor..start].to_string()));
        }
        cursor = end;

        let backslash_pairs = escapes.len() / 2;
        let odd_tail = escapes.len() % 2 == 1;
        let literal_backslashes = "\\".repeat(backslash_pairs);

        if odd_tail {
            tokens.push(Token::Plain(format!("{literal_backslashes}[{content}]")));
            continue;
        }

        if backslash_pairs > 0 {
            tokens.push(Token::Plain(literal_backslashes));
        }

        for tag in content.split_whitespace() {
            if tag == "inverse" {
                has_inverse = true;
            }
            if tag == "/inverse" {
                has_inverse = false;
            }

            let mut consumed = consume_tag(tag)?;

            if has_inverse {
                match consumed.markup().as_str() {
                    "/fg" => consumed = Token::Clear("/fg".to_string()),
                    "/bg" => consumed = Token::Clear("/bg".to_string()),
                    _ => {}
                }
            }

            tokens.push(consumed);
        }
    }

    if cursor < text.len() {
        tokens.push(Token::Plain(text[cursor..].to_string()));
    }

    Ok(tokens)
}

/// Serializes a token stream back into TIM markup source — the inverse of
/// [`tokenize_markup`]. Consecutive non-`Plain` tokens are grouped into a
/// single `[tag tag …]` group; `Plain` text is emitted verbatim. Grounded on
/// `pytermgui/markup/parsing.py::tokens_to_markup`.
#[must_use]
pub fn tokens_to_markup(tokens: &[Token]) -> String {
    let mut markup = String::new();
    let mut tags: Vec<&Token> = Vec::new();

    for token in tokens {
        if let Token::Plain(text) = token {
            flush_tag_group(&mut markup, &mut tags);
            markup.push_str(text);
        } else {
            tags.push(token);
        }
    }

    flush_tag_group(&mut markup, &mut tags);
    markup
}

fn flush_tag_group(markup: &mut String, tags: &mut Vec<&Token>) {
    if tags.is_empty() {
        return;
    }
    markup.push('[');
    let joined: Vec<String> = tags.iter().map(|t| t.markup()).collect();
    markup.push_str(&joined.join(" "));
    markup.push(']');
    tags.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let tokens = tokenize_markup("hello").unwrap();
        assert_eq!(tokens, vec![Token::Plain("hello".to_string())]);
    }

    #[test]
    fn style_and_color_tag_group() {
        let tokens = tokenize_markup("[bold red]hi").unwrap();
        assert!(tokens[0].is_style());
        assert!(tokens[1].is_color());
        assert_eq!(tokens[2], Token::Plain("hi".to_string()));
    }

    #[test]
    fn clear_tag() {
        let tokens = tokenize_markup("[/]x").unwrap();
        assert_eq!(tokens[0], Token::Clear("/".to_string()));
    }

    #[test]
    fn macro_tag_with_args() {
        let tokens = tokenize_markup("[!upper:a:b]x").unwrap();
        assert_eq!(
            tokens[0],
            Token::Macro("!upper".to_string(), vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn macro_tag_without_args() {
        let tokens = tokenize_markup("[!upper]x").unwrap();
        assert_eq!(tokens[0], Token::Macro("!upper".to_string(), vec![]));
    }

    #[test]
    fn hyperlink_tag() {
        let tokens = tokenize_markup("[~https://example.com]site[/~]").unwrap();
        assert_eq!(
            tokens[0],
            Token::Hyperlink("https://example.com".to_string())
        );
        assert_eq!(tokens[1], Token::Plain("site".to_string()));
        assert_eq!(tokens[2], Token::Clear("/~".to_string()));
    }

    #[test]
    fn cursor_tag() {
        let tokens = tokenize_markup("[(3;4)]x").unwrap();
        assert_eq!(tokens[0], Token::Cursor(Some(3), Some(4)));
    }

    #[test]
    fn cursor_tag_missing_coordinate() {
        let tokens = tokenize_markup("[(;4)]x").unwrap();
        assert_eq!(tokens[0], Token::Cursor(None, Some(4)));
    }

    #[test]
    fn invalid_cursor_tag_is_fatal() {
        assert!(tokenize_markup("[(1;2;3)]x").is_err());
    }

    #[test]
    fn unknown_tag_falls_back_to_alias() {
        let tokens = tokenize_markup("[my-tag]x").unwrap();
        assert_eq!(tokens[0], Token::Alias("my-tag".to_string()));
    }

    #[test]
    fn single_backslash_escapes_bracket() {
        let tokens = tokenize_markup(r"\[bold] text").unwrap();
        assert_eq!(tokens, vec![Token::Plain("[bold] text".to_string())]);
    }

    #[test]
    fn double_backslash_keeps_tag_and_emits_one_backslash() {
        let tokens = tokenize_markup(r"\\[bold]x").unwrap();
        assert_eq!(tokens[0], Token::Plain("\\".to_string()));
        assert!(tokens[1].is_style());
        assert_eq!(tokens[2], Token::Plain("x".to_string()));
    }

    #[test]
    fn inverse_mode_swaps_fg_bg_clears_identically() {
        let tokens = tokenize_markup("[inverse /fg /bg /inverse]").unwrap();
        assert_eq!(tokens[1], Token::Clear("/fg".to_string()));
        assert_eq!(tokens[2], Token::Clear("/bg".to_string()));
    }

    #[test]
    fn tokens_to_markup_groups_consecutive_tags() {
        let tokens = tokenize_markup("[bold red]hello[/]").unwrap();
        assert_eq!(tokens_to_markup(&tokens), "[bold red]hello[/]");
    }

    #[test]
    fn tokens_to_markup_leaves_trailing_tags_ungrouped_with_plain() {
        let tokens = vec![Token::Plain("x".to_string()), Token::Clear("/".to_string())];
        assert_eq!(tokens_to_markup(&tokens), "x[/]");
    }

    /// Invariant: `tokenize_markup ∘ tokens_to_markup ∘ tokenize_markup ==
    /// tokenize_markup` for markup without inverse toggling.
    #[test]
    fn round_trip_through_tokens_to_markup() {
        for markup in [
            "[bold red]hello[/]",
            "[my-tag]x[/my-tag]",
            "[!upper:a:b]x[/!upper]",
            "[~https://example.com]site[/~]",
            "[(3;4)]x",
            "plain text, no tags at all",
            "[bold]a[/bold]b[red]c[/]",
        ] {
            let once = tokenize_markup(markup).unwrap();
            let reserialized = tokens_to_markup(&once);
            let twice = tokenize_markup(&reserialized).unwrap();
            assert_eq!(once, twice, "round-trip mismatch for {markup:?} (via {reserialized:?})");
        }
    }
}

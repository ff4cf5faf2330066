//! Eliminates redundant set/clear tokens across plain-token boundaries.
//! Grounded on `pytermgui/markup/parsing.py::optimize_tokens`.

use crate::token::Token;

/// Tags active at the last `Plain` boundary (`previous`), diffed against the
/// tags accumulated since (`current_tag_group`): emits each surviving tag,
/// skipping ones already active and ones that are clears with nothing to
/// clear.
fn diff_previous(previous: &[Token], current_tag_group: &[Token]) -> Vec<Token> {
    let mut applied: Vec<Token> = previous.to_vec();
    let mut diffed = Vec::new();

    for tkn in current_tag_group {
        let targets_something = tkn.is_clear() && applied.iter().any(|tag| tkn.targets(tag));

        if previous.contains(tkn) && !tkn.is_clear() {
            continue;
        }

        if tkn.is_clear() && !targets_something {
            continue;
        }

        applied.push(tkn.clone());
        diffed.push(tkn.clone());
    }

    diffed
}

/// An incoming [`Token::Color`] supersedes: any clear already targeting it,
/// and any existing color of the same `is_background` polarity.
fn remove_redundant_color(current_tag_group: &mut Vec<Token>, incoming: &Token) {
    let Token::Color(_, new_color) = incoming else {
        return;
    };

    current_tag_group.retain(|applied| {
        if applied.is_clear() && applied.targets(incoming) {
            return false;
        }
        if let Token::Color(_, old_color) = applied {
            if old_color.is_background == new_color.is_background {
                return false;
            }
        }
        true
    });
}

/// Collapses redundant styling in a token stream without changing the
/// terminal state it produces.
#[must_use]
pub fn optimize_tokens(tokens: Vec<Token>) -> Vec<Token> {
    let mut previous: Vec<Token> = Vec::new();
    let mut current_tag_group: Vec<Token> = Vec::new();
    let mut output = Vec::new();

    for token in tokens {
        if token.is_plain() {
            output.extend(diff_previous(&previous, &current_tag_group));
            output.push(token);
            previous = current_tag_group.clone();
            continue;
        }

        if token.is_color() {
            remove_redundant_color(&mut current_tag_group, &token);
            let markup = token.markup();
            if !current_tag_group.iter().any(|applied| applied.markup() == markup) {
                current_tag_group.push(token);
            }
            continue;
        }

        if token.is_style() {
            if !current_tag_group.iter().any(|tag| *tag == token) {
                current_tag_group.push(token);
            }
            continue;
        }

        if token.is_clear() {
            let mut applied_any = false;
            current_tag_group.retain(|tag| {
                let hit = token.targets(tag) || *tag == token;
                if hit {
                    applied_any = true;
                }
                !hit
            });
            if !applied_any {
                continue;
            }
            current_tag_group.push(token);
            continue;
        }

        current_tag_group.push(token);
    }

    output.extend(diff_previous(&previous, &current_tag_group));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup_tokenizer::tokenize_markup;

    fn optimize_markup(markup: &str) -> Vec<Token> {
        optimize_tokens(tokenize_markup(markup).unwrap())
    }

    #[test]
    fn duplicate_color_across_tag_groups_is_deduped() {
        let tokens = optimize_markup("[red][red]x[/]");
        let color_count = tokens.iter().filter(|t| t.is_color()).count();
        assert_eq!(color_count, 1);
    }

    #[test]
    fn no_op_clear_is_dropped() {
        let tokens = optimize_markup("[/bold]x");
        assert!(tokens.iter().all(|t| !t.is_clear()));
    }

    #[test]
    fn clear_after_set_survives() {
        let tokens = optimize_markup("[bold]x[/bold]y");
        assert!(tokens.iter().any(|t| matches!(t, Token::Clear(tag) if tag == "/bold")));
    }

    #[test]
    fn idempotent() {
        let once = optimize_markup("[bold][bold]x[/][red]y");
        let twice = optimize_tokens(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn repeated_style_in_same_group_is_not_duplicated() {
        let tokens = optimize_markup("[bold bold]x");
        let bold_count = tokens.iter().filter(|t| t.is_style()).count();
        assert_eq!(bold_count, 1);
    }
}

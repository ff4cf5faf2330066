//! The token model: every markup atom the engine moves around, plus the
//! uniform capabilities (`is_plain`, `is_clear`, `targets`, `markup`) every
//! component dispatches on.

use std::fmt;

use crate::color::Color;

/// A named SGR style attribute.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum StyleName {
    /// Bold / increased intensity.
    Bold,
    /// Faint / decreased intensity.
    Dim,
    /// Italic.
    Italic,
    /// Underline.
    Underline,
    /// Strikethrough.
    Strikethrough,
    /// Swap foreground/background (SGR 7).
    Inverse,
    /// Blink.
    Blink,
}

/// A single markup/ANSI atom.
///
/// Every variant is either a "set" (something that stays active until
/// cleared: `Style`, `Color`, `Hyperlink`) or a one-shot/structural token
/// (`Plain`, `Clear`, `Alias`, `Macro`, `Cursor`).
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// Printable characters with no attached styling.
    Plain(String),
    /// A named style, e.g. `bold`.
    Style(StyleName),
    /// A foreground/background color. The `String` is the color's canonical
    /// spec spelling (as authored, or as reconstructed from ANSI); the
    /// [`Color`] is the resolved SGR payload.
    Color(String, Color),
    /// A clearer. `tag` is one of `/`, `/fg`, `/bg`, `/styleName`, `/~`, or
    /// `/aliasOrMacroName`.
    Clear(String),
    /// An unresolved named reference, pending context lookup.
    Alias(String),
    /// A macro invocation. `name` includes the leading `!`.
    Macro(String, Vec<String>),
    /// Absolute cursor positioning; either coordinate may be absent.
    Cursor(Option<i32>, Option<i32>),
    /// Opens an OSC 8 hyperlink scope.
    Hyperlink(String),
}

impl Token {
    /// True for [`Token::Plain`].
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        matches!(self, Self::Plain(_))
    }

    /// True for [`Token::Style`].
    #[must_use]
    pub const fn is_style(&self) -> bool {
        matches!(self, Self::Style(_))
    }

    /// True for [`Token::Color`].
    #[must_use]
    pub const fn is_color(&self) -> bool {
        matches!(self, Self::Color(..))
    }

    /// True for [`Token::Clear`].
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        matches!(self, Self::Clear(_))
    }

    /// True for [`Token::Alias`].
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }

    /// True for [`Token::Macro`].
    #[must_use]
    pub const fn is_macro(&self) -> bool {
        matches!(self, Self::Macro(..))
    }

    /// True for [`Token::Cursor`].
    #[must_use]
    pub const fn is_cursor(&self) -> bool {
        matches!(self, Self::Cursor(..))
    }

    /// True for [`Token::Hyperlink`].
    #[must_use]
    pub const fn is_hyperlink(&self) -> bool {
        matches!(self, Self::Hyperlink(_))
    }

    /// The name this token is keyed by in a [`crate::context::Context`], if
    /// any: the alias name, or the macro name (bang included).
    #[must_use]
    pub fn context_name(&self) -> Option<&str> {
        match self {
            Self::Alias(name) => Some(name),
            Self::Macro(name, _) => Some(name),
            _ => None,
        }
    }

    /// Whether `self` (which must be a [`Token::Clear`]) cancels `other`.
    ///
    /// Non-clear `self` always returns `false`.
    #[must_use]
    pub fn targets(&self, other: &Token) -> bool {
        let Self::Clear(tag) = self else {
            return false;
        };

        if tag == "/" {
            return true;
        }

        match other {
            Self::Style(name) => *tag == format!("/{name}"),
            Self::Color(_, color) => {
                if color.is_background {
                    tag == "/bg"
                } else {
                    tag == "/fg"
                }
            }
            Self::Hyperlink(_) => tag == "/~",
            Self::Alias(name) => tag.strip_prefix('/') == Some(name.as_str()),
            Self::Macro(name, _) => tag.strip_prefix('/') == Some(name.as_str()),
            _ => false,
        }
    }

    /// The canonical bracket-tag spelling of this token, used for display,
    /// cache equality, and optimizer matching.
    #[must_use]
    pub fn markup(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Style(name) => name.to_string(),
            Self::Color(spec, _) => spec.clone(),
            Self::Clear(tag) => tag.clone(),
            Self::Alias(name) => name.clone(),
            Self::Macro(name, args) => {
                if args.is_empty() {
                    name.clone()
                } else {
                    format!("{name}:{}", args.join(":"))
                }
            }
            Self::Cursor(y, x) => {
                let y = y.map_or_else(String::new, |v| v.to_string());
                let x = x.map_or_else(String::new, |v| v.to_string());
                format!("({y};{x})")
            }
            Self::Hyperlink(uri) => format!("~{uri}"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.markup())
    }
}

//! Terminal Inline Markup (TIM): a bracket-delimited markup dialect that
//! compiles to ANSI control sequences, and the reverse ANSI tokenizer, alias
//! and macro context, optimizer, and styled-run grouper that support it.
//!
//! - [`markup_tokenizer::tokenize_markup`] / [`ansi_tokenizer::tokenize_ansi`]
//!   lex markup source and rendered ANSI, respectively, into the same
//!   [`token::Token`] stream.
//! - [`context::Context`] holds alias and macro definitions.
//! - [`parser::parse`] substitutes aliases, applies macros, and renders
//!   tokens to a terminal-ready string.
//! - [`optimizer::optimize_tokens`] collapses redundant styling.
//! - [`language::MarkupLanguage`] ties a context to the pipeline with a
//!   macro-aware render cache.
//! - [`styled_run::group_styles`] splits rendered text into style-tagged
//!   runs.

#![warn(clippy::pedantic, missing_docs)]

/// Color spec parsing (named, 8-bit indexed, truecolor).
pub mod color;
/// Mutable alias/macro store and alias expansion.
pub mod context;
/// Error types.
pub mod error;
/// ANSI tokenizer (CSI SGR/cursor, OSC 8).
pub mod ansi_tokenizer;
/// Markup tokenizer.
pub mod markup_tokenizer;
/// The facade binding context, parser, and cache.
pub mod language;
/// Token stream optimizer.
pub mod optimizer;
/// Alias substitution, macro application, and rendering.
pub mod parser;
/// Style-code lookup tables.
pub mod style_maps;
/// ANSI-run grouping.
pub mod styled_run;
/// The token model.
pub mod token;

mod util;

pub use color::{parse_color, Color};
pub use context::{Context, MacroFn};
pub use error::{TimError, TimResult};
pub use language::MarkupLanguage;
pub use markup_tokenizer::tokens_to_markup;
pub use parser::{parse, parse_tokens};
pub use styled_run::{group_styles, StyledRun};
pub use token::{StyleName, Token};

//! The facade: binds a [`Context`] to the tokenizer/parser pipeline and
//! caches rendered output. Grounded on
//! `pytermgui/markup/language.py::MarkupLanguage`.

use std::collections::HashMap;
use std::io::Write;

use crate::context::{Context, MacroFn};
use crate::error::TimResult;
use crate::markup_tokenizer::tokenize_markup;
use crate::parser::parse_tokens;
use crate::styled_run::{group_styles as group_styles_impl, StyledRun};
use crate::token::Token;

type CacheKey = (String, bool, bool);
type CacheEntry = (Vec<Token>, String, bool);

/// Owns a [`Context`] and a memoization cache keyed by `(text, optimize,
/// append_reset)`. Every mutating call (`define`, `alias`, `alias_multiple`)
/// invalidates the whole cache.
#[derive(Default)]
pub struct MarkupLanguage {
    context: Context,
    cache: HashMap<CacheKey, CacheEntry>,
}

impl MarkupLanguage {
    /// Creates a facade over a fresh, empty [`Context`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and renders `text`, memoizing non-macro results and
    /// re-rendering macro-containing entries from their cached token list on
    /// every hit.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer and parser errors.
    pub fn parse(&mut self, text: &str, optimize: bool, append_reset: bool) -> TimResult<String> {
        let key = (text.to_string(), optimize, append_reset);

        if let Some((tokens, rendered, contains_macro)) = self.cache.get(&key) {
            if !contains_macro {
                return Ok(rendered.clone());
            }
            let refreshed = parse_tokens(tokens.clone(), optimize, &self.context, append_reset)?;
            let entry = self.cache.get_mut(&key).expect("key just looked up");
            entry.1 = refreshed.clone();
            return Ok(refreshed);
        }

        let tokens = tokenize_markup(text)?;
        let contains_macro = tokens.iter().any(Token::is_macro);
        let rendered = parse_tokens(tokens.clone(), optimize, &self.context, append_reset)?;
        self.cache.insert(key, (tokens, rendered.clone(), contains_macro));
        Ok(rendered)
    }

    /// Registers a macro callable under `name`; invalidates the cache.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TimError::InvalidMacroName`] if `name` does
    /// not start with `!`.
    pub fn define(&mut self, name: &str, f: MacroFn) -> TimResult<()> {
        self.context.define(name, f)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Defines an alias and invalidates the cache.
    pub fn alias(&mut self, name: &str, value: &str, generate_unsetter: bool) {
        self.context.alias(name, value, generate_unsetter);
        self.invalidate_cache();
    }

    /// Defines several aliases at once and invalidates the cache once.
    pub fn alias_multiple<'a, I>(&mut self, items: I, generate_unsetter: bool)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.context.alias_multiple(items, generate_unsetter);
        self.invalidate_cache();
    }

    /// Splits `text` into [`StyledRun`]s via `tokenizer`.
    ///
    /// # Errors
    ///
    /// Propagates `tokenizer`'s error.
    pub fn group_styles(
        &self,
        text: &str,
        tokenizer: impl Fn(&str) -> TimResult<Vec<Token>>,
    ) -> TimResult<Vec<StyledRun>> {
        group_styles_impl(text, tokenizer)
    }

    /// Syntax-highlights markup source: groups it into [`StyledRun`]s (see
    /// [`MarkupLanguage::group_styles`]) and, for each run, displays the
    /// tags it carries as literal bracketed text wrapped in that run's own
    /// active styling, followed by the run's plain text under the same
    /// styling. Grounded on
    /// `pytermgui/markup/language.py::MarkupLanguage.prettify_markup`.
    ///
    /// # Errors
    ///
    /// Propagates tokenizer errors.
    pub fn prettify_markup(&self, src: &str) -> TimResult<String> {
        let runs = group_styles_impl(src, tokenize_markup)?;
        let mut out = String::new();

        for run in &runs {
            let set_tokens = &run.tokens[..run.tokens.len().saturating_sub(1)];

            if !set_tokens.is_empty() {
                let tags: String = set_tokens
                    .iter()
                    .map(|t| format!("[{}]", t.markup()))
                    .collect();
                out.push_str(&run.sequences);
                out.push_str(&tags);
                out.push_str("\x1b[0m");
            }

            out.push_str(&run.sequences);
            out.push_str(&run.plain);
            out.push_str("\x1b[0m");
        }

        Ok(out)
    }

    /// Parses each of `args` and writes the rendered bytes to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates parse errors and [`crate::error::TimError::Io`] write
    /// failures.
    pub fn print<W: Write>(&mut self, sink: &mut W, args: &[&str]) -> TimResult<()> {
        for arg in args {
            let rendered = self.parse(arg, true, true)?;
            sink.write_all(rendered.as_bytes())?;
        }
        Ok(())
    }

    /// A defensive copy of all defined aliases.
    #[must_use]
    pub fn aliases(&self) -> HashMap<String, String> {
        self.context.aliases()
    }

    /// The names of all defined macros.
    #[must_use]
    pub fn macros(&self) -> Vec<String> {
        self.context.macro_names()
    }

    fn invalidate_cache(&mut self) {
        if self.cache.is_empty() {
            return;
        }
        log::debug!("context mutated; dropping {} cached render(s)", self.cache.len());
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn caches_non_macro_renders() {
        let mut lang = MarkupLanguage::new();
        let first = lang.parse("[bold]x[/]", false, false).unwrap();
        let second = lang.parse("[bold]x[/]", false, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(lang.cache.len(), 1);
    }

    #[test]
    fn alias_mutation_invalidates_cache() {
        let mut lang = MarkupLanguage::new();
        lang.parse("[bold]x[/]", false, false).unwrap();
        assert_eq!(lang.cache.len(), 1);
        lang.alias("my-tag", "bold", false);
        assert!(lang.cache.is_empty());
    }

    #[test]
    fn macro_entries_re_render_on_every_hit() {
        let mut lang = MarkupLanguage::new();
        let counter = Rc::new(std::cell::Cell::new(0));
        let counter_clone = Rc::clone(&counter);
        lang.define(
            "!count",
            Rc::new(move |_args: &[String]| {
                let n = counter_clone.get();
                counter_clone.set(n + 1);
                n.to_string()
            }),
        )
        .unwrap();

        let first = lang.parse("[!count]x[/!count]", false, false).unwrap();
        let second = lang.parse("[!count]x[/!count]", false, false).unwrap();
        assert_ne!(first, second);
        assert_eq!(lang.cache.len(), 1);
    }

    #[test]
    fn define_rejects_bad_name_without_touching_cache() {
        let mut lang = MarkupLanguage::new();
        lang.parse("[bold]x[/]", false, false).unwrap();
        assert!(lang.define("upper", Rc::new(|_| String::new())).is_err());
        assert_eq!(lang.cache.len(), 1);
    }

    #[test]
    fn print_writes_rendered_bytes() {
        let mut lang = MarkupLanguage::new();
        let mut buf = Vec::new();
        lang.print(&mut buf, &["[bold]hi[/]"]).unwrap();
        assert_eq!(buf, b"\x1b[1mhi\x1b[0m".to_vec());
    }

    #[test]
    fn aliases_and_macros_accessors() {
        let mut lang = MarkupLanguage::new();
        lang.alias("my-tag", "bold", false);
        lang.define("!upper", Rc::new(|_| String::new())).unwrap();
        assert!(lang.aliases().contains_key("my-tag"));
        assert_eq!(lang.macros(), vec!["!upper".to_string()]);
    }

    #[test]
    fn prettify_markup_shows_tag_display_styled_then_text_styled() {
        let lang = MarkupLanguage::new();
        let out = lang.prettify_markup("[bold]hi").unwrap();
        assert_eq!(out, "\x1b[1m[bold]\x1b[0m\x1b[1mhi\x1b[0m");
    }

    #[test]
    fn prettify_markup_leaves_unstyled_plain_text_unwrapped() {
        let lang = MarkupLanguage::new();
        let out = lang.prettify_markup("plain").unwrap();
        assert_eq!(out, "plain\x1b[0m");
    }
}

//! The mutable stylistic context: alias definitions and macro bindings,
//! threaded through tokenization and parsing. Grounded on
//! `pytermgui/markup/language.py::ContextDict`/`MarkupLanguage` (the alias
//! and macro halves of it; caching lives in [`crate::language`]).

use std::collections::HashMap;
use std::rc::Rc;

use crate::color::parse_color;
use crate::error::{TimError, TimResult};

/// A macro: a named callable taking the macro's bound arguments followed by
/// the plain text it transforms, as its final element.
pub type MacroFn = Rc<dyn Fn(&[String]) -> String>;

/// Alias definitions and macro bindings, with identical lifetime.
///
/// Single-writer discipline is assumed of callers:
/// every mutating method takes `&mut self`.
#[derive(Clone, Default)]
pub struct Context {
    aliases: HashMap<String, String>,
    macros: HashMap<String, MacroFn>,
}

impl Context {
    /// Creates an empty context with no aliases or macros.
    ///
    /// Default alias/macro population is a caller concern — this crate
    /// never seeds one itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The expansion body of `name`, if it names a defined alias.
    #[must_use]
    pub fn alias_body(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Whether `name` is a defined alias.
    #[must_use]
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Whether `name` (bang included) is a defined macro.
    #[must_use]
    pub fn has_macro(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// The callable bound to macro `name` (bang included), if any.
    #[must_use]
    pub fn macro_fn(&self, name: &str) -> Option<MacroFn> {
        self.macros.get(name).cloned()
    }

    /// A defensive copy of all alias definitions.
    #[must_use]
    pub fn aliases(&self) -> HashMap<String, String> {
        self.aliases.clone()
    }

    /// The names of all defined macros.
    #[must_use]
    pub fn macro_names(&self) -> Vec<String> {
        self.macros.keys().cloned().collect()
    }

    /// Registers a macro callable under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TimError::InvalidMacroName`] if `name` does not start with
    /// `!`.
    pub fn define(&mut self, name: &str, f: MacroFn) -> TimResult<()> {
        if !name.starts_with('!') {
            return Err(TimError::InvalidMacroName(name.to_string()));
        }
        self.macros.insert(name.to_string(), f);
        Ok(())
    }

    /// Defines an alias from `name` to the (alias-expanded) markup `value`.
    ///
    /// When `generate_unsetter` is set, also synthesizes a sibling `/name`
    /// alias whose body clears everything `value` would have set
    /// (see the crate-level data model notes).
    pub fn alias(&mut self, name: &str, value: &str, generate_unsetter: bool) {
        let expanded = eval_alias(value, self);

        if generate_unsetter {
            let unsetter = generate_unsetter_body(&expanded, self);
            self.aliases.insert(format!("/{name}"), unsetter);
        }

        self.aliases.insert(name.to_string(), expanded);
    }

    /// Runs [`Context::alias`] for each `(name, value)` pair, using the same
    /// `generate_unsetter` for all of them.
    pub fn alias_multiple<'a, I>(&mut self, items: I, generate_unsetter: bool)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in items {
            self.alias(name, value, generate_unsetter);
        }
    }
}

/// Recursively expands `text` (a whitespace-separated run of tags) against
/// `ctx`'s alias table. Tags with no alias binding pass through unchanged.
///
/// Termination relies on the absence of cycles in the definition order
/// by convention, not by cycle detection.
#[must_use]
pub fn eval_alias(text: &str, ctx: &Context) -> String {
    let mut evaluated = String::new();

    for tag in text.split_whitespace() {
        match ctx.alias_body(tag) {
            Some(body) => {
                let body = body.to_string();
                evaluated.push_str(&eval_alias(&body, ctx));
            }
            None => evaluated.push_str(tag),
        }
        evaluated.push(' ');
    }

    evaluated.trim_end().to_string()
}

/// Builds the clearer body for an alias's synthesized `/name` unsetter: each
/// tag in `expansion` becomes the clearer that cancels it.
fn generate_unsetter_body(expansion: &str, ctx: &Context) -> String {
    let mut unsetter = String::new();

    for tag in expansion.split_whitespace() {
        let tag = tag.find('(').map_or(tag, |i| &tag[..i]);

        if ctx.has_alias(tag) || ctx.has_macro(tag) {
            unsetter.push_str(&format!("/{tag} "));
            continue;
        }

        match parse_color(tag) {
            Ok(color) => {
                let target = if color.is_background { "/bg" } else { "/fg" };
                unsetter.push_str(&format!("{target} "));
            }
            Err(_) => unsetter.push_str(&format!("/{tag} ")),
        }
    }

    unsetter.trim_end().to_string()
}

//! Small shared helpers.

/// Lazily compiles and caches a regular expression literal.
///
/// Mirrors `thag_common::re!` (`examples/durbanlegend-thag_rs/thag_common/src/lib.rs`):
/// a `static OnceLock<Regex>` per call site, initialized on first use.
macro_rules! re {
    ($re:literal $(,)?) => {{
        use std::sync::OnceLock;
        static RE: OnceLock<regex::Regex> = OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).expect("static regex is valid"))
    }};
}

pub(crate) use re;

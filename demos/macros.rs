//! Registers a macro that transforms the plain text it wraps.
//!
//! Run with:
//! ```bash
//! cargo run --example macros
//! ```

use std::rc::Rc;

use thag_markup::MarkupLanguage;

fn main() {
    let mut lang = MarkupLanguage::new();
    lang.define(
        "!shout",
        Rc::new(|args: &[String]| {
            args.last()
                .map_or_else(String::new, |s| format!("{}!!!", s.to_uppercase()))
        }),
    )
    .unwrap();

    let rendered = lang.parse("[!shout]hello[/!shout]", false, false).unwrap();
    println!("{rendered}");
}

//! Defines a reusable alias with a generated unsetter and renders it.
//!
//! Run with:
//! ```bash
//! cargo run --example aliasing
//! ```

use thag_markup::MarkupLanguage;

fn main() {
    let mut lang = MarkupLanguage::new();
    lang.alias("warning", "bold @yellow", true);

    let rendered = lang
        .parse("[warning]careful now[/warning]", false, true)
        .unwrap();
    println!("{rendered}");
}

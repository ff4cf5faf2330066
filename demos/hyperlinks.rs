//! Renders an OSC 8 hyperlink and groups the result into styled runs.
//!
//! Run with:
//! ```bash
//! cargo run --example hyperlinks
//! ```

use thag_markup::{ansi_tokenizer::tokenize_ansi, MarkupLanguage};

fn main() {
    let mut lang = MarkupLanguage::new();
    let rendered = lang
        .parse("[~https://example.com]project page[/~]", false, false)
        .unwrap();
    println!("{rendered}");

    for run in lang.group_styles(&rendered, tokenize_ansi).unwrap() {
        println!("{:?} link={:?}", run.plain, run.link);
    }
}

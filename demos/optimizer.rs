//! Shows the optimizer collapsing a repeated color set across tag groups.
//!
//! Run with:
//! ```bash
//! cargo run --example optimizer
//! ```

use thag_markup::{parse, Context};

fn main() {
    let ctx = Context::new();
    let markup = "[red]a[red]b[/]c";

    let unoptimized = parse(markup, false, &ctx, false).unwrap();
    let optimized = parse(markup, true, &ctx, false).unwrap();

    println!("unoptimized: {unoptimized:?}");
    println!("optimized:   {optimized:?}");
}

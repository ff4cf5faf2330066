//! End-to-end scenarios against the public facade.

use std::rc::Rc;

use thag_markup::{markup_tokenizer::tokenize_markup, parse, tokens_to_markup, Context, MarkupLanguage};

/// Mirrors `thag/tests/shared.rs`'s `let _ = env_logger::try_init();`: lets
/// `RUST_LOG` surface this crate's `log` calls (deprecation warnings, cache
/// invalidation) when these tests run, without failing if a logger is
/// already installed.
fn init_logging() {
    let _ = env_logger::try_init();
}

#[test]
fn scenario_bold_red_hello() {
    let ctx = Context::new();
    let out = parse("[bold red]hello[/]", false, &ctx, false).unwrap();
    assert_eq!(out, "\x1b[1m\x1b[31mhello\x1b[0m");
}

#[test]
fn scenario_alias_with_unsetter() {
    let mut lang = MarkupLanguage::new();
    lang.alias("my-tag", "bold 141", true);
    let out = lang.parse("[my-tag]x[/my-tag]", false, true).unwrap();

    let mut baseline = MarkupLanguage::new();
    let expected = baseline.parse("[bold 141]x[/bold /fg]", false, true).unwrap();

    assert_eq!(out, expected);
}

#[test]
fn scenario_escaped_bracket_stays_plain() {
    let mut lang = MarkupLanguage::new();
    let out = lang.parse(r"\[bold] text", false, false).unwrap();
    assert_eq!(out, "[bold] text");
}

#[test]
fn scenario_macro_uppercases_wrapped_text() {
    let mut lang = MarkupLanguage::new();
    lang.define(
        "!upper",
        Rc::new(|args: &[String]| args.last().map_or_else(String::new, |s| s.to_uppercase())),
    )
    .unwrap();
    let out = lang.parse("[!upper]hi[/!upper]", false, false).unwrap();
    assert_eq!(out, "HI");
}

#[test]
fn scenario_hyperlink_osc8() {
    let mut lang = MarkupLanguage::new();
    let out = lang
        .parse("[~https://example.com]site[/~]", false, false)
        .unwrap();
    assert_eq!(
        out,
        "\x1b]8;;https://example.com\x1b\\site\x1b]8;;\x1b\\"
    );
}

#[test]
fn scenario_optimizer_dedups_repeated_color_across_groups() {
    let mut lang = MarkupLanguage::new();
    let out = lang.parse("[red][red]x[/]", true, false).unwrap();
    assert_eq!(out.matches("\x1b[31m").count(), 1);
}

#[test]
fn invariant_append_reset_always_suffixes_reset() {
    let mut lang = MarkupLanguage::new();
    for text in ["[bold]a", "plain", "[red]x[/]"] {
        let out = lang.parse(text, false, true).unwrap();
        assert!(out.ends_with("\x1b[0m"), "{text:?} -> {out:?}");
    }
}

#[test]
fn invariant_optimizer_is_idempotent_on_rendered_output() {
    let mut lang = MarkupLanguage::new();
    let once = lang.parse("[bold][bold]x[/][red]y", true, false).unwrap();
    let twice = lang.parse("[bold][bold]x[/][red]y", true, false).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn invariant_cache_is_fresh_for_macros_but_reuses_tokens() {
    let mut lang = MarkupLanguage::new();
    let counter = Rc::new(std::cell::Cell::new(0));
    let counter_clone = Rc::clone(&counter);
    lang.define(
        "!tick",
        Rc::new(move |_args: &[String]| {
            let n = counter_clone.get();
            counter_clone.set(n + 1);
            n.to_string()
        }),
    )
    .unwrap();

    let first = lang.parse("[!tick]x[/!tick]", false, false).unwrap();
    let second = lang.parse("[!tick]x[/!tick]", false, false).unwrap();
    assert_ne!(first, second);
}

#[test]
fn invariant_round_trip_through_tokens_to_markup() {
    for markup in [
        "[bold red]hello[/]",
        "[my-tag]x[/my-tag]",
        "[~https://example.com]site[/~]",
    ] {
        let once = tokenize_markup(markup).unwrap();
        let twice = tokenize_markup(&tokens_to_markup(&once)).unwrap();
        assert_eq!(once, twice, "round-trip mismatch for {markup:?}");
    }
}

#[test]
fn scenario_deprecated_link_macro_still_emits_hyperlink() {
    init_logging();
    let ctx = Context::new();
    let out = parse("[!link:https://example.com]site[/~]", false, &ctx, false).unwrap();
    assert!(out.contains("\x1b]8;;https://example.com\x1b\\site"));
}

#[test]
fn cache_invalidation_on_alias_mutation() {
    init_logging();
    let mut lang = MarkupLanguage::new();
    lang.parse("[bold]x[/]", false, false).unwrap();
    lang.alias("my-tag", "bold", false);
    let out = lang.parse("[my-tag]x[/my-tag]", false, true).unwrap();
    assert!(out.contains("\x1b[1m"));
}

#[test]
fn dangling_macro_clearer_is_an_error() {
    let ctx = Context::new();
    assert!(parse("[/!upper]x", false, &ctx, false).is_err());
}

#[test]
fn undefined_macro_invocation_is_an_error() {
    let ctx = Context::new();
    assert!(parse("[!upper]hi", false, &ctx, false).is_err());
}

#[test]
fn prettify_markup_highlights_tag_groups() {
    let lang = MarkupLanguage::new();
    let out = lang.prettify_markup("[bold]hi").unwrap();
    assert!(out.contains("[bold]"));
    assert!(out.contains("hi"));
}

#[test]
fn group_styles_splits_into_runs_with_sequences() {
    let lang = MarkupLanguage::new();
    let runs = lang
        .group_styles("[bold]a[/bold]b", thag_markup::markup_tokenizer::tokenize_markup)
        .unwrap();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].plain, "a");
    assert_eq!(runs[1].plain, "b");
}

#[test]
fn print_writes_rendered_output_to_sink() {
    let mut lang = MarkupLanguage::new();
    let mut buf = Vec::new();
    lang.print(&mut buf, &["[bold]hi[/]", "plain"]).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.starts_with("\x1b[1mhi\x1b[0m"));
    assert!(out.ends_with("plain\x1b[0m"));
}

//! Static lookup tables mapping style/clearer tags to SGR codes and back.
//!
//! Mirrors the role `phf` static maps play in `thag_styling` (built-in theme
//! and role tables), just over the SGR code space instead of theme roles.

/// Style tag → SGR code.
pub static STYLES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "bold" => "1",
    "dim" => "2",
    "italic" => "3",
    "underline" => "4",
    "blink" => "5",
    "inverse" => "7",
    "strikethrough" => "9",
};

/// Clearer tag → SGR code.
pub static CLEARERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "/" => "0",
    "/bold" => "22",
    "/dim" => "22",
    "/italic" => "23",
    "/underline" => "24",
    "/blink" => "25",
    "/inverse" => "27",
    "/strikethrough" => "29",
    "/fg" => "39",
    "/bg" => "49",
};

/// SGR code → style tag, for ANSI tokenization.
pub static REVERSE_STYLES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "1" => "bold",
    "2" => "dim",
    "3" => "italic",
    "4" => "underline",
    "5" => "blink",
    "7" => "inverse",
    "9" => "strikethrough",
};

/// SGR code → clearer tag, for ANSI tokenization.
///
/// `22` clears both bold and dim in real terminals; we canonicalize it to
/// `/bold` the way a reverse map must pick one spelling.
pub static REVERSE_CLEARERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "0" => "/",
    "22" => "/bold",
    "23" => "/italic",
    "24" => "/underline",
    "25" => "/blink",
    "27" => "/inverse",
    "29" => "/strikethrough",
    "39" => "/fg",
    "49" => "/bg",
};

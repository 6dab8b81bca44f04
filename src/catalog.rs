//! Fixed catalog of drillable bopomofo symbols
//!
//! The catalog is immutable constant data; its order is only significant
//! as the default iteration order for settings and learn mode.

/// The 37 toneless bopomofo symbols, in standard order.
pub const BOPOMOFO: [&str; 37] = [
    "ㄅ", "ㄆ", "ㄇ", "ㄈ", "ㄉ", "ㄊ", "ㄋ", "ㄌ", "ㄍ", "ㄎ", "ㄏ", "ㄐ", "ㄑ", "ㄒ", "ㄓ",
    "ㄔ", "ㄕ", "ㄖ", "ㄗ", "ㄘ", "ㄙ", "ㄧ", "ㄨ", "ㄩ", "ㄚ", "ㄛ", "ㄜ", "ㄝ", "ㄞ", "ㄟ",
    "ㄠ", "ㄡ", "ㄢ", "ㄣ", "ㄤ", "ㄥ", "ㄦ",
];

/// Whether `symbol` is a member of the catalog.
pub fn contains(symbol: &str) -> bool {
    BOPOMOFO.contains(&symbol)
}

/// The full catalog as owned strings, in catalog order.
pub fn all_symbols() -> Vec<String> {
    BOPOMOFO.iter().map(|s| s.to_string()).collect()
}

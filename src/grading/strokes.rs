//! Stroke skeletons for the bopomofo glyphs
//!
//! Each symbol maps to a fixed set of polylines in unit coordinates
//! (x right, y down, 0..1 covering the glyph box). The mask renderer
//! stamps these with a wide round stroke, so the skeletons only need to
//! capture the stroke layout, not calligraphic detail. The table is the
//! sole source of glyph geometry, which keeps mask rendering repeatable
//! across platforms with no font dependency.

pub type Polyline = &'static [(f32, f32)];

/// Stroke skeleton for `symbol`, or `None` for anything outside the catalog.
pub fn skeleton(symbol: &str) -> Option<&'static [Polyline]> {
    let strokes: &'static [Polyline] = match symbol {
        "ㄅ" => &[&[(0.25, 0.15), (0.8, 0.15), (0.8, 0.5), (0.25, 0.5), (0.25, 0.9)]],
        "ㄆ" => &[&[(0.2, 0.2), (0.8, 0.2)], &[(0.5, 0.2), (0.5, 0.9)], &[(0.2, 0.45), (0.35, 0.75)]],
        "ㄇ" => &[&[(0.2, 0.9), (0.2, 0.15), (0.8, 0.15), (0.8, 0.9)]],
        "ㄈ" => &[&[(0.8, 0.15), (0.2, 0.15), (0.2, 0.85), (0.8, 0.85)]],
        "ㄉ" => &[&[(0.25, 0.15), (0.8, 0.15), (0.8, 0.85)], &[(0.45, 0.4), (0.45, 0.85)]],
        "ㄊ" => &[&[(0.2, 0.3), (0.8, 0.3)], &[(0.35, 0.1), (0.3, 0.88)], &[(0.65, 0.1), (0.7, 0.88)]],
        "ㄋ" => &[&[(0.2, 0.2), (0.75, 0.2), (0.6, 0.5), (0.8, 0.6)], &[(0.35, 0.45), (0.3, 0.9)]],
        "ㄌ" => &[&[(0.5, 0.1), (0.5, 0.45)], &[(0.2, 0.3), (0.2, 0.85)], &[(0.8, 0.3), (0.8, 0.7), (0.55, 0.9)]],
        "ㄍ" => &[&[(0.35, 0.15), (0.25, 0.85)], &[(0.65, 0.15), (0.75, 0.85)]],
        "ㄎ" => &[&[(0.2, 0.25), (0.8, 0.25)], &[(0.55, 0.1), (0.4, 0.88)], &[(0.6, 0.45), (0.8, 0.6), (0.75, 0.88)]],
        "ㄏ" => &[&[(0.2, 0.2), (0.8, 0.2)], &[(0.4, 0.2), (0.25, 0.88)]],
        "ㄐ" => &[&[(0.3, 0.15), (0.3, 0.7), (0.7, 0.7)], &[(0.7, 0.1), (0.7, 0.9)]],
        "ㄑ" => &[&[(0.3, 0.15), (0.7, 0.15), (0.35, 0.55)], &[(0.55, 0.4), (0.65, 0.9)]],
        "ㄒ" => &[&[(0.2, 0.2), (0.75, 0.2), (0.75, 0.85)], &[(0.45, 0.45), (0.45, 0.85)]],
        "ㄓ" => &[&[(0.5, 0.1), (0.5, 0.9)], &[(0.2, 0.35), (0.8, 0.35)], &[(0.2, 0.75), (0.45, 0.6)]],
        "ㄔ" => &[&[(0.6, 0.1), (0.3, 0.35), (0.75, 0.35)], &[(0.45, 0.35), (0.45, 0.9)], &[(0.25, 0.6), (0.4, 0.6)]],
        "ㄕ" => &[&[(0.3, 0.1), (0.75, 0.1), (0.75, 0.45), (0.35, 0.45)], &[(0.3, 0.3), (0.3, 0.9)]],
        "ㄖ" => &[&[(0.3, 0.15), (0.7, 0.15), (0.7, 0.85), (0.3, 0.85), (0.3, 0.15)], &[(0.3, 0.5), (0.7, 0.5)]],
        "ㄗ" => &[&[(0.2, 0.15), (0.8, 0.15), (0.3, 0.55), (0.8, 0.55)], &[(0.55, 0.55), (0.55, 0.9)]],
        "ㄘ" => &[&[(0.2, 0.25), (0.8, 0.2)], &[(0.4, 0.1), (0.55, 0.4)], &[(0.65, 0.5), (0.3, 0.9)], &[(0.45, 0.65), (0.75, 0.9)]],
        "ㄙ" => &[&[(0.45, 0.15), (0.25, 0.55), (0.6, 0.55)], &[(0.55, 0.45), (0.8, 0.85)], &[(0.6, 0.75), (0.2, 0.9)]],
        "ㄧ" => &[&[(0.15, 0.5), (0.85, 0.5)]],
        "ㄨ" => &[&[(0.25, 0.2), (0.75, 0.85)], &[(0.75, 0.2), (0.25, 0.85)]],
        "ㄩ" => &[&[(0.2, 0.15), (0.2, 0.7), (0.8, 0.7), (0.8, 0.15)]],
        "ㄚ" => &[&[(0.25, 0.15), (0.5, 0.45)], &[(0.75, 0.15), (0.5, 0.45), (0.5, 0.9)]],
        "ㄛ" => &[&[(0.6, 0.1), (0.45, 0.3)], &[(0.55, 0.25), (0.55, 0.6), (0.25, 0.75), (0.55, 0.88), (0.8, 0.75)]],
        "ㄜ" => &[&[(0.25, 0.3), (0.75, 0.3)], &[(0.7, 0.1), (0.3, 0.55), (0.75, 0.55), (0.75, 0.8), (0.45, 0.9)]],
        "ㄝ" => &[&[(0.2, 0.25), (0.8, 0.25)], &[(0.35, 0.1), (0.35, 0.6)], &[(0.65, 0.1), (0.65, 0.6)], &[(0.25, 0.85), (0.75, 0.85)]],
        "ㄞ" => &[&[(0.5, 0.1), (0.5, 0.35)], &[(0.25, 0.35), (0.75, 0.35)], &[(0.35, 0.55), (0.3, 0.9)], &[(0.55, 0.5), (0.75, 0.9)], &[(0.45, 0.7), (0.7, 0.7)]],
        "ㄟ" => &[&[(0.3, 0.15), (0.6, 0.4), (0.35, 0.65), (0.8, 0.85)]],
        "ㄠ" => &[&[(0.45, 0.1), (0.3, 0.3), (0.7, 0.3), (0.4, 0.55)], &[(0.6, 0.45), (0.75, 0.65)], &[(0.55, 0.6), (0.25, 0.9)]],
        "ㄡ" => &[&[(0.35, 0.1), (0.3, 0.35), (0.7, 0.35), (0.65, 0.1)], &[(0.45, 0.5), (0.25, 0.88)], &[(0.5, 0.55), (0.75, 0.88)]],
        "ㄢ" => &[&[(0.2, 0.35), (0.45, 0.15)], &[(0.2, 0.65), (0.5, 0.45), (0.5, 0.85)], &[(0.5, 0.6), (0.8, 0.6), (0.8, 0.85)]],
        "ㄣ" => &[&[(0.35, 0.1), (0.25, 0.5), (0.5, 0.6), (0.55, 0.4)], &[(0.55, 0.55), (0.55, 0.8), (0.8, 0.85)]],
        "ㄤ" => &[&[(0.3, 0.1), (0.2, 0.45), (0.45, 0.55), (0.5, 0.35)], &[(0.6, 0.1), (0.55, 0.7), (0.8, 0.88)]],
        "ㄥ" => &[&[(0.65, 0.15), (0.3, 0.55), (0.75, 0.85)]],
        "ㄦ" => &[&[(0.45, 0.1), (0.35, 0.45), (0.2, 0.85)], &[(0.55, 0.45), (0.7, 0.85), (0.82, 0.72)]],
        _ => return None,
    };
    Some(strokes)
}

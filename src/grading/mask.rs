//! Reference mask rendering
//!
//! Reproduces the original canvas pipeline: white background, glyph
//! painted black, then the same glyph stroke-outlined with a wide
//! tolerance band. With skeleton glyphs the fill and outline collapse
//! into one pass: each skeleton stroke is stamped at glyph width plus
//! the band width, giving the identical two-class target/background
//! raster the grader consumes.

use crate::grading::strokes::skeleton;
use crate::grading::surface::Surface;

/// Width of the glyph strokes themselves, in pixels.
const GLYPH_STROKE: f32 = 22.0;

/// Extra stroke width counted as "close enough" around each glyph stroke.
const TOLERANCE_BAND: f32 = 34.0;

/// Side of the box the unit-space skeleton is scaled into (the original's
/// 220px font size).
const GLYPH_BOX: f32 = 220.0;

/// Glyph center on the canvas; the original draws at center with a +10 y
/// nudge for the font baseline.
const CENTER: (f32, f32) = (160.0, 170.0);

/// Render the reference mask for `symbol` at the canonical surface size.
///
/// Returns `None` when the symbol has no glyph geometry, which the
/// grader treats as a degenerate (score 0) rasterization.
pub fn render_mask(symbol: &str) -> Option<Surface> {
    let strokes = skeleton(symbol)?;

    let mut mask = Surface::blank();
    mask.fill([255, 255, 255, 255]);

    let half_width = (GLYPH_STROKE + TOLERANCE_BAND) / 2.0;
    for line in strokes {
        for pair in line.windows(2) {
            stamp_segment(&mut mask, to_canvas(pair[0]), to_canvas(pair[1]), half_width);
        }
        // Single-point strokes are dots
        if line.len() == 1 {
            let p = to_canvas(line[0]);
            stamp_segment(&mut mask, p, p, half_width);
        }
    }
    Some(mask)
}

fn to_canvas((u, v): (f32, f32)) -> (f32, f32) {
    (CENTER.0 + (u - 0.5) * GLYPH_BOX, CENTER.1 + (v - 0.5) * GLYPH_BOX)
}

/// Paint every pixel within `radius` of segment ab black (round caps).
fn stamp_segment(mask: &mut Surface, a: (f32, f32), b: (f32, f32), radius: f32) {
    let side = mask.side() as isize;
    let min_x = ((a.0.min(b.0) - radius).floor() as isize).clamp(0, side - 1);
    let max_x = ((a.0.max(b.0) + radius).ceil() as isize).clamp(0, side - 1);
    let min_y = ((a.1.min(b.1) - radius).floor() as isize).clamp(0, side - 1);
    let max_y = ((a.1.max(b.1) + radius).ceil() as isize).clamp(0, side - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            if dist_point_segment(p, a, b) <= radius {
                mask.set(x as usize, y as usize, [0, 0, 0, 255]);
            }
        }
    }
}

/// Distance from point p to segment ab.
fn dist_point_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::surface::{is_target, SURFACE_SIDE};

    fn target_area(mask: &Surface) -> usize {
        mask.pixels().iter().filter(|&&px| is_target(px)).count()
    }

    #[test]
    fn test_mask_is_canonical_size_with_nonempty_target() {
        let mask = render_mask("ㄅ").unwrap();
        assert_eq!(mask.side(), SURFACE_SIDE);
        let area = target_area(&mask);
        assert!(area > 0, "mask has no target pixels");
        assert!(
            area < SURFACE_SIDE * SURFACE_SIDE,
            "mask covers the whole canvas"
        );
    }

    #[test]
    fn test_mask_is_deterministic() {
        let a = render_mask("ㄨ").unwrap();
        let b = render_mask("ㄨ").unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_unknown_symbol_yields_no_mask() {
        assert!(render_mask("Z").is_none());
    }

    #[test]
    fn test_dist_point_segment() {
        // Perpendicular drop onto a horizontal segment
        let d = dist_point_segment((5.0, 3.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
        // Beyond the endpoint, distance is to the cap
        let d = dist_point_segment((14.0, 3.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
        // Degenerate segment is a point
        let d = dist_point_segment((3.0, 4.0), (0.0, 0.0), (0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
    }
}

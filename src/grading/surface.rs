//! Rasterized grading surfaces
//!
//! Both the reference mask and the learner's ink arrive here as square
//! RGBA rasters. Pixel classification mirrors the canvas-based original:
//! thresholds are deliberately loose so anti-aliased edges and
//! device-varied red tones still count.

use anyhow::{anyhow, Result};
use std::path::Path;

/// Canonical side length of every grading surface, in pixels.
pub const SURFACE_SIDE: usize = 320;

/// A square RGBA raster.
#[derive(Debug, Clone)]
pub struct Surface {
    side: usize,
    pixels: Vec<[u8; 4]>,
}

impl Surface {
    /// A blank (fully transparent) surface at the canonical size.
    pub fn blank() -> Self {
        Self::with_side(SURFACE_SIDE)
    }

    pub fn with_side(side: usize) -> Self {
        Surface {
            side,
            pixels: vec![[0, 0, 0, 0]; side * side],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        self.pixels[y * self.side + x]
    }

    pub fn set(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        self.pixels[y * self.side + x] = rgba;
    }

    /// Flood the whole surface with one color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in &mut self.pixels {
            *px = rgba;
        }
    }

    /// Load a binary PPM (P6) image as an opaque surface.
    ///
    /// PPM is the interchange format the CLI accepts for externally
    /// captured ink; alpha is fixed at 255 since P6 carries no opacity.
    pub fn from_ppm(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        parse_ppm(&bytes)
    }
}

/// Target-pixel test for the reference mask: visibly dark on any channel.
pub fn is_target(px: [u8; 4]) -> bool {
    px[3] > 10 && (px[0] < 220 || px[1] < 220 || px[2] < 220)
}

/// Ink-pixel test for the learner's trace: any opacity, broad red band.
pub fn is_ink(px: [u8; 4]) -> bool {
    px[3] > 0 && px[0] > 150 && px[1] < 180 && px[2] < 180
}

fn parse_ppm(bytes: &[u8]) -> Result<Surface> {
    let mut fields = Vec::with_capacity(4);
    let mut pos = 0;

    // Header: magic, width, height, maxval, separated by whitespace,
    // '#' comments allowed through the maxval token.
    while fields.len() < 4 {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos < bytes.len() && bytes[pos] == b'#' {
            while pos < bytes.len() && bytes[pos] != b'\n' {
                pos += 1;
            }
            continue;
        }
        let start = pos;
        while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if start == pos {
            return Err(anyhow!("truncated PPM header"));
        }
        fields.push(std::str::from_utf8(&bytes[start..pos])?.to_string());
    }

    if fields[0] != "P6" {
        return Err(anyhow!("unsupported PPM magic {:?}, expected P6", fields[0]));
    }
    let width: usize = fields[1].parse()?;
    let height: usize = fields[2].parse()?;
    let maxval: usize = fields[3].parse()?;
    if width != height {
        return Err(anyhow!("trace must be square, got {}x{}", width, height));
    }
    // Header dimensions are untrusted; refuse anything beyond the
    // canonical surface before allocating.
    if width == 0 || width > SURFACE_SIDE {
        return Err(anyhow!("trace side {} out of range (max {})", width, SURFACE_SIDE));
    }
    if maxval != 255 {
        return Err(anyhow!("unsupported PPM maxval {}", maxval));
    }

    // Exactly one whitespace byte separates the header from pixel data.
    pos += 1;
    let needed = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| anyhow!("PPM dimensions overflow"))?;
    let data = bytes
        .get(pos..pos + needed)
        .ok_or_else(|| anyhow!("PPM pixel data truncated"))?;

    let mut surface = Surface::with_side(width);
    for (i, rgb) in data.chunks_exact(3).enumerate() {
        surface.pixels[i] = [rgb[0], rgb[1], rgb[2], 255];
    }
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_classification() {
        assert!(is_target([0, 0, 0, 255]));
        // Anti-aliased gray still counts
        assert!(is_target([120, 120, 120, 40]));
        // White background does not
        assert!(!is_target([255, 255, 255, 255]));
        // Nearly transparent does not
        assert!(!is_target([0, 0, 0, 5]));
    }

    #[test]
    fn test_ink_classification_accepts_red_band() {
        // Pure red
        assert!(is_ink([239, 68, 68, 255]));
        // Washed-out red from a cheap stylus driver
        assert!(is_ink([200, 150, 120, 128]));
        // Blue is not ink
        assert!(!is_ink([0, 0, 255, 255]));
        // Transparent red is not ink
        assert!(!is_ink([255, 0, 0, 0]));
    }

    #[test]
    fn test_parse_ppm_roundtrip() {
        let mut bytes = b"P6\n# comment\n2 2\n255\n".to_vec();
        bytes.extend_from_slice(&[
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 255, 255, 255,
        ]);
        let s = parse_ppm(&bytes).unwrap();
        assert_eq!(s.side(), 2);
        assert_eq!(s.get(0, 0), [255, 0, 0, 255]);
        assert_eq!(s.get(1, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_parse_ppm_rejects_non_square() {
        let mut bytes = b"P6\n3 2\n255\n".to_vec();
        bytes.extend_from_slice(&[0; 18]);
        assert!(parse_ppm(&bytes).is_err());
    }

    #[test]
    fn test_parse_ppm_rejects_truncated() {
        let bytes = b"P6\n2 2\n255\n\x00\x01".to_vec();
        assert!(parse_ppm(&bytes).is_err());
    }

    #[test]
    fn test_parse_ppm_rejects_absurd_dimensions() {
        // Sides far past the canonical surface must fail cleanly,
        // not allocate or wrap.
        assert!(parse_ppm(b"P6\n9999999999 9999999999\n255\n").is_err());
        assert!(parse_ppm(b"P6\n4096 4096\n255\n").is_err());
        assert!(parse_ppm(b"P6\n0 0\n255\n").is_err());
    }
}

//! Frame metrics for automated visual checks
//!
//! The engine's look is defined by a narrow palette: emerald foliage,
//! gold and rose ornaments, warm bloom. These metrics let a harness
//! read back a rendered frame and verify that palette programmatically.

use wasm_bindgen::prelude::*;

/// Hue band for the golds (antique gold through warm white)
const GOLD_HUE: (f32, f32) = (30.0, 70.0);
/// Hue band for the emeralds
const EMERALD_HUE: (f32, f32) = (90.0, 160.0);

/// Metrics computed from one rendered frame
#[derive(Debug, Clone, Default)]
pub struct FrameMetrics {
    /// Average luminance (0-1)
    pub avg_brightness: f32,
    /// Maximum luminance found
    pub max_brightness: f32,
    /// Fraction of pixels bright enough to have bloomed (>0.7)
    pub bloom_coverage: f32,
    /// Fraction of pixels in the gold hue band
    pub gold_coverage: f32,
    /// Fraction of pixels in the emerald hue band
    pub emerald_coverage: f32,
    /// Contrast ratio (max / min non-black luminance)
    pub contrast_ratio: f32,
    /// Fraction of near-black pixels (<0.05)
    pub dark_pixels: f32,
    /// Fraction of near-white pixels (>0.9)
    pub bright_pixels: f32,
}

/// Analyze raw pixel data (RGBA format, 4 bytes per pixel)
pub fn analyze_frame(pixels: &[u8], width: u32, height: u32) -> FrameMetrics {
    let pixel_count = (width * height) as usize;
    if pixel_count == 0 || pixels.len() < pixel_count * 4 {
        return FrameMetrics::default();
    }

    let mut total_brightness = 0.0f64;
    let mut max_brightness = 0.0f32;
    let mut min_non_black = 1.0f32;
    let mut bloom_pixels = 0u32;
    let mut dark_pixels = 0u32;
    let mut bright_pixels = 0u32;
    let mut gold_pixels = 0u32;
    let mut emerald_pixels = 0u32;

    for i in 0..pixel_count {
        let r = pixels[i * 4] as f32 / 255.0;
        let g = pixels[i * 4 + 1] as f32 / 255.0;
        let b = pixels[i * 4 + 2] as f32 / 255.0;

        let brightness = 0.299 * r + 0.587 * g + 0.114 * b;
        total_brightness += brightness as f64;

        if brightness > max_brightness {
            max_brightness = brightness;
        }
        if brightness > 0.01 && brightness < min_non_black {
            min_non_black = brightness;
        }

        if brightness > 0.7 {
            bloom_pixels += 1;
        }
        if brightness < 0.05 {
            dark_pixels += 1;
        }
        if brightness > 0.9 {
            bright_pixels += 1;
        }

        // Only colored, visible pixels count toward the palette bands
        let (h, s, _v) = rgb_to_hsv(r, g, b);
        if s > 0.1 && brightness > 0.05 {
            if h >= GOLD_HUE.0 && h < GOLD_HUE.1 {
                gold_pixels += 1;
            } else if h >= EMERALD_HUE.0 && h < EMERALD_HUE.1 {
                emerald_pixels += 1;
            }
        }
    }

    let contrast_ratio = if min_non_black > 0.001 {
        max_brightness / min_non_black
    } else {
        max_brightness / 0.001
    };

    let n = pixel_count as f32;
    FrameMetrics {
        avg_brightness: (total_brightness / pixel_count as f64) as f32,
        max_brightness,
        bloom_coverage: bloom_pixels as f32 / n,
        gold_coverage: gold_pixels as f32 / n,
        emerald_coverage: emerald_pixels as f32 / n,
        contrast_ratio,
        dark_pixels: dark_pixels as f32 / n,
        bright_pixels: bright_pixels as f32 / n,
    }
}

/// Convert RGB (0-1) to HSV (hue: 0-360, saturation: 0-1, value: 0-1)
fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;

    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta < 0.0001 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };

    (h, s, v)
}

/// WASM-bindgen wrapper for analyzing readback pixels from JavaScript
#[wasm_bindgen]
pub struct FrameAnalyzer;

#[wasm_bindgen]
impl FrameAnalyzer {
    /// Analyze pixel data and return JSON metrics
    #[wasm_bindgen]
    pub fn analyze(pixels: &[u8], width: u32, height: u32) -> String {
        let metrics = analyze_frame(pixels, width, height);
        format!(
            r#"{{
  "avgBrightness": {:.4},
  "maxBrightness": {:.4},
  "bloomCoverage": {:.4},
  "goldCoverage": {:.4},
  "emeraldCoverage": {:.4},
  "contrastRatio": {:.4},
  "darkPixels": {:.4},
  "brightPixels": {:.4}
}}"#,
            metrics.avg_brightness,
            metrics.max_brightness,
            metrics.bloom_coverage,
            metrics.gold_coverage,
            metrics.emerald_coverage,
            metrics.contrast_ratio,
            metrics.dark_pixels,
            metrics.bright_pixels,
        )
    }
}

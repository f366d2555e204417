//! Acceptance ranges for rendered frames
//!
//! A harness renders a frame in a known mode, reads the pixels back,
//! runs [`analyze_frame`](crate::visual::analyze_frame), and checks the
//! metrics against the ranges here. The two modes look very different
//! on screen, so each gets its own set of bounds.

use super::metrics::FrameMetrics;

/// Expected metric ranges for one rendered frame
#[derive(Debug, Clone)]
pub struct FrameCriteria {
    pub min_brightness: f32,
    pub max_brightness: f32,
    pub min_bloom_coverage: f32,
    pub min_gold_coverage: f32,
    pub min_emerald_coverage: f32,
    pub max_dark_pixels: f32,
    pub min_contrast: f32,
}

impl FrameCriteria {
    /// Ranges for a fully formed tree: dense emerald cone, gold trim,
    /// blooming lights.
    pub fn formed() -> Self {
        Self {
            min_brightness: 0.05,
            max_brightness: 0.8,
            min_bloom_coverage: 0.01,
            min_gold_coverage: 0.005,
            min_emerald_coverage: 0.02,
            max_dark_pixels: 0.9,
            min_contrast: 2.0,
        }
    }

    /// Ranges for the scattered cloud: everything spread thin, so the
    /// palette floors drop and more of the backdrop shows through.
    pub fn scattered() -> Self {
        Self {
            min_brightness: 0.01,
            max_brightness: 0.8,
            min_bloom_coverage: 0.001,
            min_gold_coverage: 0.001,
            min_emerald_coverage: 0.005,
            max_dark_pixels: 0.97,
            min_contrast: 2.0,
        }
    }
}

impl Default for FrameCriteria {
    fn default() -> Self {
        Self::formed()
    }
}

/// Check metrics against criteria, returning a list of failures
pub fn check_frame(metrics: &FrameMetrics, criteria: &FrameCriteria) -> Vec<String> {
    let mut failures = Vec::new();

    if metrics.avg_brightness < criteria.min_brightness {
        failures.push(format!(
            "Frame too dark: avg brightness {:.4} < {:.4}",
            metrics.avg_brightness, criteria.min_brightness
        ));
    }

    if metrics.avg_brightness > criteria.max_brightness {
        failures.push(format!(
            "Frame too bright: avg brightness {:.4} > {:.4}",
            metrics.avg_brightness, criteria.max_brightness
        ));
    }

    if metrics.bloom_coverage < criteria.min_bloom_coverage {
        failures.push(format!(
            "Not enough bloom: coverage {:.4} < {:.4}",
            metrics.bloom_coverage, criteria.min_bloom_coverage
        ));
    }

    if metrics.gold_coverage < criteria.min_gold_coverage {
        failures.push(format!(
            "Not enough gold: coverage {:.4} < {:.4}",
            metrics.gold_coverage, criteria.min_gold_coverage
        ));
    }

    if metrics.emerald_coverage < criteria.min_emerald_coverage {
        failures.push(format!(
            "Not enough emerald: coverage {:.4} < {:.4}",
            metrics.emerald_coverage, criteria.min_emerald_coverage
        ));
    }

    if metrics.dark_pixels > criteria.max_dark_pixels {
        failures.push(format!(
            "Too much darkness: {:.1}% of pixels near black (max {:.1}%)",
            metrics.dark_pixels * 100.0,
            criteria.max_dark_pixels * 100.0
        ));
    }

    if metrics.contrast_ratio < criteria.min_contrast {
        failures.push(format!(
            "Insufficient contrast: ratio {:.2} < {:.2}",
            metrics.contrast_ratio, criteria.min_contrast
        ));
    }

    failures
}

/// Generate a human-readable report from frame metrics
pub fn frame_report(metrics: &FrameMetrics) -> String {
    format!(
        "Frame Metrics Report\n\
         ====================\n\
         Average Brightness: {:.4}\n\
         Maximum Brightness: {:.4}\n\
         Bloom Coverage: {:.2}%\n\
         Gold Coverage: {:.2}%\n\
         Emerald Coverage: {:.2}%\n\
         Contrast Ratio: {:.2}\n\
         Dark Pixels: {:.1}%\n\
         Bright Pixels: {:.1}%\n",
        metrics.avg_brightness,
        metrics.max_brightness,
        metrics.bloom_coverage * 100.0,
        metrics.gold_coverage * 100.0,
        metrics.emerald_coverage * 100.0,
        metrics.contrast_ratio,
        metrics.dark_pixels * 100.0,
        metrics.bright_pixels * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_formed_metrics() -> FrameMetrics {
        FrameMetrics {
            avg_brightness: 0.2,
            max_brightness: 1.0,
            bloom_coverage: 0.05,
            gold_coverage: 0.03,
            emerald_coverage: 0.15,
            contrast_ratio: 10.0,
            dark_pixels: 0.5,
            bright_pixels: 0.02,
        }
    }

    #[test]
    fn test_healthy_formed_frame_passes() {
        let failures = check_frame(&healthy_formed_metrics(), &FrameCriteria::formed());
        assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
    }

    #[test]
    fn test_black_frame_fails_formed() {
        let metrics = FrameMetrics {
            dark_pixels: 1.0,
            ..FrameMetrics::default()
        };
        let failures = check_frame(&metrics, &FrameCriteria::formed());
        assert!(!failures.is_empty());
        assert!(failures.iter().any(|f| f.contains("too dark")));
    }

    #[test]
    fn test_missing_emerald_reported() {
        let metrics = FrameMetrics {
            emerald_coverage: 0.0,
            ..healthy_formed_metrics()
        };
        let failures = check_frame(&metrics, &FrameCriteria::formed());
        assert!(failures.iter().any(|f| f.contains("emerald")));
    }

    #[test]
    fn test_missing_gold_reported() {
        let metrics = FrameMetrics {
            gold_coverage: 0.0,
            ..healthy_formed_metrics()
        };
        let failures = check_frame(&metrics, &FrameCriteria::formed());
        assert!(failures.iter().any(|f| f.contains("gold")));
    }

    #[test]
    fn test_scattered_bounds_are_looser() {
        let formed = FrameCriteria::formed();
        let scattered = FrameCriteria::scattered();

        assert!(scattered.min_brightness <= formed.min_brightness);
        assert!(scattered.min_gold_coverage <= formed.min_gold_coverage);
        assert!(scattered.min_emerald_coverage <= formed.min_emerald_coverage);
        assert!(scattered.max_dark_pixels >= formed.max_dark_pixels);
    }

    #[test]
    fn test_thin_scatter_passes_scattered_but_not_formed() {
        let metrics = FrameMetrics {
            avg_brightness: 0.03,
            max_brightness: 0.9,
            bloom_coverage: 0.002,
            gold_coverage: 0.002,
            emerald_coverage: 0.01,
            contrast_ratio: 8.0,
            dark_pixels: 0.94,
            bright_pixels: 0.001,
        };

        assert!(check_frame(&metrics, &FrameCriteria::scattered()).is_empty());
        assert!(!check_frame(&metrics, &FrameCriteria::formed()).is_empty());
    }

    #[test]
    fn test_report_includes_palette_lines() {
        let report = frame_report(&healthy_formed_metrics());
        assert!(report.contains("Gold Coverage"));
        assert!(report.contains("Emerald Coverage"));
        assert!(report.contains("Bloom Coverage"));
    }
}

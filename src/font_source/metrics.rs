//! Font metrics and measurement data
//!
//! Per-glyph horizontal metrics plus the font-wide summary values that live
//! in `head`, `hhea`, and `maxp` and must be recomputed whenever glyphs
//! change.

use write_fonts::tables::glyf::Bbox;

/// Advance width and left side bearing of one glyph (`hmtx` entry)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalMetric {
    pub advance: u16,
    pub lsb: i16,
}

impl HorizontalMetric {
    pub fn new(advance: u16, lsb: i16) -> Self {
        Self { advance, lsb }
    }
}

/// Summary values derived from every glyph in the font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    /// Union of all glyph boxes (`head` xMin..yMax)
    pub bbox: Option<Bbox>,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    /// Largest point count of any simple glyph
    pub max_points: u16,
    /// Largest contour count of any simple glyph
    pub max_contours: u16,
}

/// What [`FontMetrics`] needs to know about one glyph
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphMeasure {
    pub metric: HorizontalMetric,
    pub bbox: Option<Bbox>,
    /// `(points, contours)` for simple glyphs
    pub simple_counts: Option<(usize, usize)>,
}

impl FontMetrics {
    pub fn from_glyphs(glyphs: impl IntoIterator<Item = GlyphMeasure>) -> Self {
        let mut metrics = FontMetrics::default();
        let mut min_lsb = i32::MAX;
        let mut min_rsb = i32::MAX;
        let mut max_extent = i32::MIN;

        for glyph in glyphs {
            metrics.advance_width_max = metrics.advance_width_max.max(glyph.metric.advance);

            if let Some((points, contours)) = glyph.simple_counts {
                metrics.max_points = metrics.max_points.max(saturate_u16(points));
                metrics.max_contours = metrics.max_contours.max(saturate_u16(contours));
            }

            let Some(bbox) = glyph.bbox else {
                continue;
            };
            metrics.bbox = Some(match metrics.bbox {
                Some(current) => current.union(bbox),
                None => bbox,
            });

            let lsb = glyph.metric.lsb as i32;
            let extent = lsb + (bbox.x_max as i32 - bbox.x_min as i32);
            let rsb = glyph.metric.advance as i32 - extent;
            min_lsb = min_lsb.min(lsb);
            min_rsb = min_rsb.min(rsb);
            max_extent = max_extent.max(extent);
        }

        if metrics.bbox.is_some() {
            metrics.min_left_side_bearing = saturate_i16(min_lsb);
            metrics.min_right_side_bearing = saturate_i16(min_rsb);
            metrics.x_max_extent = saturate_i16(max_extent);
        }
        metrics
    }
}

fn saturate_u16(value: usize) -> u16 {
    value.min(u16::MAX as usize) as u16
}

fn saturate_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Number of long metrics needed in `hmtx`
///
/// Trailing glyphs that share the last advance width only need a left side
/// bearing.
pub fn number_of_long_metrics(advances: &[u16]) -> usize {
    let Some(last) = advances.last() else {
        return 0;
    };
    let mut count = advances.len();
    while count > 1 && advances[count - 2] == *last {
        count -= 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Bbox {
        Bbox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    #[test]
    fn summary_over_glyphs() {
        let metrics = FontMetrics::from_glyphs([
            GlyphMeasure::default(),
            GlyphMeasure {
                metric: HorizontalMetric::new(600, 50),
                bbox: Some(bbox(50, 0, 550, 700)),
                simple_counts: Some((12, 2)),
            },
            GlyphMeasure {
                metric: HorizontalMetric::new(500, -10),
                bbox: Some(bbox(-10, -200, 480, 500)),
                simple_counts: Some((30, 1)),
            },
        ]);

        assert_eq!(metrics.bbox, Some(bbox(-10, -200, 550, 700)));
        assert_eq!(metrics.advance_width_max, 600);
        assert_eq!(metrics.min_left_side_bearing, -10);
        // 600 - (50 + 500) = 50, 500 - (-10 + 490) = 20
        assert_eq!(metrics.min_right_side_bearing, 20);
        assert_eq!(metrics.x_max_extent, 550);
        assert_eq!(metrics.max_points, 30);
        assert_eq!(metrics.max_contours, 2);
    }

    #[test]
    fn no_outlines_means_zero_extents() {
        let metrics = FontMetrics::from_glyphs([GlyphMeasure {
            metric: HorizontalMetric::new(250, 0),
            ..Default::default()
        }]);
        assert_eq!(metrics.bbox, None);
        assert_eq!(metrics.advance_width_max, 250);
        assert_eq!(metrics.x_max_extent, 0);
    }

    #[test]
    fn long_metrics_compaction() {
        assert_eq!(number_of_long_metrics(&[]), 0);
        assert_eq!(number_of_long_metrics(&[500]), 1);
        assert_eq!(number_of_long_metrics(&[500, 600, 600, 600]), 2);
        assert_eq!(number_of_long_metrics(&[600, 600]), 1);
        assert_eq!(number_of_long_metrics(&[600, 500]), 2);
    }
}

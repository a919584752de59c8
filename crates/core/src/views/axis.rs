use eeg_cloud_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

const FONT_SIZE: f64 = 10.0;
const LABEL_GAP: f64 = 6.0;
const MIN_CATEGORY_SPACING_PX: f64 = 36.0;

/// Ticks for a value axis covering `[lo, hi]`, about `target` of them.
///
/// Steps are 1, 2 or 5 times a power of ten; the first tick is at or below
/// `lo` and the last at or above `hi`. Empty when the range is not finite.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()) {
        return Vec::new();
    }
    let (lo, hi) = if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo.min(hi), lo.max(hi))
    };
    let step = nice_step((hi - lo) / target.max(1) as f64);
    let first = (lo / step).floor() * step;
    let last = (hi / step).ceil() * step;
    let count = ((last - first) / step).round() as usize;
    (0..=count).map(|i| first + i as f64 * step).collect()
}

/// Smallest 1/2/5·10ⁿ step not below `raw`.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10.0_f64.powf(raw.log10().floor());
    for m in [1.0, 2.0, 5.0, 10.0] {
        if m * magnitude >= raw {
            return m * magnitude;
        }
    }
    10.0 * magnitude
}

/// A round upper bound for a scale starting at zero.
pub fn nice_ceiling(max: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) {
        return 1.0;
    }
    nice_ticks(0.0, max, 5).last().copied().unwrap_or(1.0)
}

pub fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}")
    } else if step >= 0.1 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

/// Horizontal gridlines with labels left of `plot` for each tick.
pub fn render_value_axis(plot: Rect, ticks: &[f64]) -> Vec<RenderCommand> {
    let (Some(&lo), Some(&hi)) = (ticks.first(), ticks.last()) else {
        return Vec::new();
    };
    let range = hi - lo;
    if range <= 0.0 {
        return Vec::new();
    }
    let step = if ticks.len() > 1 { ticks[1] - ticks[0] } else { range };

    let mut commands = Vec::with_capacity(ticks.len() * 2 + 1);
    for &t in ticks {
        let y = plot.bottom() - (t - lo) / range * plot.h;
        commands.push(RenderCommand::DrawLine {
            from: Point::new(plot.x, y),
            to: Point::new(plot.right(), y),
            color: ThemeToken::GridLine,
            width: 0.5,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(plot.x - LABEL_GAP, y),
            text: format_tick(t, step),
            color: ThemeToken::TextSecondary,
            font_size: FONT_SIZE,
            align: TextAlign::Right,
        });
    }
    commands.push(RenderCommand::DrawLine {
        from: Point::new(plot.x, plot.y),
        to: Point::new(plot.x, plot.bottom()),
        color: ThemeToken::AxisLine,
        width: 1.0,
    });
    commands
}

/// Show every n-th category label so neighbours don't collide.
pub fn label_stride(count: usize, width_px: f64) -> usize {
    if count == 0 || width_px <= 0.0 {
        return 1;
    }
    let per_label = width_px / count as f64;
    (MIN_CATEGORY_SPACING_PX / per_label).ceil().max(1.0) as usize
}

/// Category labels under `plot`, one per x position (thinned by stride).
pub fn render_category_labels(plot: Rect, xs: &[f64], labels: &[String]) -> Vec<RenderCommand> {
    let stride = label_stride(labels.len(), plot.w);
    xs.iter()
        .zip(labels)
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, (&x, label))| RenderCommand::DrawText {
            position: Point::new(x, plot.bottom() + LABEL_GAP + FONT_SIZE / 2.0),
            text: label.clone(),
            color: ThemeToken::TextSecondary,
            font_size: FONT_SIZE,
            align: TextAlign::Center,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_one_two_five() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.3), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(17.0), 20.0);
        assert!((nice_step(0.04) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn ticks_cover_range() {
        let ticks = nice_ticks(3.2, 97.5, 5);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(100.0));
        assert_eq!(ticks.len(), 6);
    }

    #[test]
    fn non_finite_range_has_no_ticks() {
        assert!(nice_ticks(f64::INFINITY, f64::NEG_INFINITY, 6).is_empty());
        assert!(nice_ticks(1.0, f64::INFINITY, 6).is_empty());
        assert!(nice_ticks(-1e308, 1e308, 6).is_empty());
        assert!(nice_ticks(f64::NAN, 1.0, 6).is_empty());
    }

    #[test]
    fn flat_range_is_widened() {
        let ticks = nice_ticks(4.0, 4.0, 4);
        assert!(ticks.first().copied().unwrap_or(f64::NAN) <= 3.0);
        assert!(ticks.last().copied().unwrap_or(f64::NAN) >= 5.0);
    }

    #[test]
    fn ceilings() {
        assert!((nice_ceiling(0.93) - 1.0).abs() < 1e-9);
        assert_eq!(nice_ceiling(7.1), 8.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
    }

    #[test]
    fn stride_thins_dense_labels() {
        assert_eq!(label_stride(12, 600.0), 1);
        assert_eq!(label_stride(60, 600.0), 4);
    }

    #[test]
    fn tick_formatting() {
        assert_eq!(format_tick(20.0, 20.0), "20");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
    }
}

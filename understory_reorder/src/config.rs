// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning knobs for a drag session.

use core::time::Duration;

use crate::host::Chrome;

/// Configuration for [`DragReorder`](crate::DragReorder).
///
/// ```
/// use core::time::Duration;
/// use understory_reorder::ReorderConfig;
///
/// let config = ReorderConfig::default()
///     .with_density(2.0)
///     .with_min_scale_ratio(0.5)
///     .with_durations(Duration::from_millis(200));
/// assert_eq!(config.edge_scroll_step(), 30.0);
/// assert_eq!(config.swap_duration, Duration::from_millis(200));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReorderConfig {
    /// Smallest scale applied to items while lifted, in `(0, 1]`.
    pub min_scale_ratio: f64,
    /// Duration of the lift-off transition.
    pub lift_duration: Duration,
    /// Duration of the crossing animation after a swap.
    pub swap_duration: Duration,
    /// Duration of the hover element's flight back to its slot.
    pub release_duration: Duration,
    /// Duration of the restore-layout transition.
    pub restore_duration: Duration,
    /// Auto-scroll step in density-independent units.
    pub edge_scroll_step_dp: f64,
    /// Pixels per density-independent unit.
    pub density: f64,
    /// Minimum time between repeated auto-scroll steps, in milliseconds.
    pub auto_scroll_interval_ms: u64,
    /// Opacity of the placeholder left behind by the lifted item.
    pub lifted_opacity: f64,
    /// Decorations shown in the resting layout.
    pub resting_chrome: Chrome,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        let transition = Duration::from_millis(300);
        Self {
            min_scale_ratio: 0.3,
            lift_duration: transition,
            swap_duration: transition,
            release_duration: transition,
            restore_duration: transition,
            edge_scroll_step_dp: 15.0,
            density: 1.0,
            auto_scroll_interval_ms: 16,
            lifted_opacity: 0.5,
            resting_chrome: Chrome::all(),
        }
    }
}

impl ReorderConfig {
    /// Sets the minimum item scale while lifted. Clamped to `(0, 1]`.
    #[must_use]
    pub fn with_min_scale_ratio(mut self, ratio: f64) -> Self {
        self.min_scale_ratio = sanitize_min_ratio(ratio);
        self
    }

    /// Sets the screen density used to convert the edge scroll step to pixels.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density.max(0.0);
        self
    }

    /// Uses the same duration for every transition.
    #[must_use]
    pub fn with_durations(mut self, duration: Duration) -> Self {
        self.lift_duration = duration;
        self.swap_duration = duration;
        self.release_duration = duration;
        self.restore_duration = duration;
        self
    }

    /// Sets the decorations of the resting layout.
    #[must_use]
    pub fn with_resting_chrome(mut self, chrome: Chrome) -> Self {
        self.resting_chrome = chrome;
        self
    }

    /// Auto-scroll step in pixels.
    #[must_use]
    pub fn edge_scroll_step(&self) -> f64 {
        self.edge_scroll_step_dp * self.density
    }

    /// Item scale that fits `content_height` into `viewport_height`, clamped to
    /// `[min_scale_ratio, 1]`.
    ///
    /// A `min_scale_ratio` outside `(0, 1]` is read the same way
    /// [`with_min_scale_ratio`](Self::with_min_scale_ratio) would store it.
    #[must_use]
    pub fn scale_ratio(&self, viewport_height: f64, content_height: f64) -> f64 {
        let ratio = viewport_height / content_height;
        if content_height > 0.0 && !ratio.is_nan() {
            ratio.clamp(sanitize_min_ratio(self.min_scale_ratio), 1.0)
        } else {
            1.0
        }
    }
}

/// Maps any value outside `(0, 1]`, NaN included, into it.
fn sanitize_min_ratio(ratio: f64) -> f64 {
    if ratio > 0.0 { ratio.min(1.0) } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_ratio_is_clamped() {
        let config = ReorderConfig::default();
        assert_eq!(config.scale_ratio(400.0, 200.0), 1.0);
        assert_eq!(config.scale_ratio(400.0, 800.0), 0.5);
        assert_eq!(config.scale_ratio(100.0, 1_000.0), 0.3);
        assert_eq!(config.scale_ratio(100.0, 0.0), 1.0);
    }

    #[test]
    fn invalid_min_ratio_disables_shrinking() {
        let config = ReorderConfig::default().with_min_scale_ratio(-2.0);
        assert_eq!(config.scale_ratio(100.0, 1_000.0), 1.0);
        let config = ReorderConfig::default().with_min_scale_ratio(4.0);
        assert_eq!(config.min_scale_ratio, 1.0);
    }

    #[test]
    fn out_of_range_fields_never_panic() {
        let config = ReorderConfig {
            min_scale_ratio: 1.5,
            ..ReorderConfig::default()
        };
        assert_eq!(config.scale_ratio(100.0, 1_000.0), 1.0);

        let config = ReorderConfig {
            min_scale_ratio: f64::NAN,
            ..ReorderConfig::default()
        };
        assert_eq!(config.scale_ratio(100.0, 1_000.0), 1.0);
        assert_eq!(ReorderConfig::default().scale_ratio(f64::NAN, 1_000.0), 1.0);
    }
}

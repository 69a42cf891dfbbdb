//! Tap-zone resolution: viewport-local tap position to navigation intent.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::types::{Intent, Point, Size};

const DEFAULT_PREVIOUS_FRACTION: f64 = 0.3;
const DEFAULT_NEXT_FRACTION: f64 = 0.3;

/// Fractions of the viewport width assigned to the outer bands. The center band takes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapZones {
    pub previous: f64,
    pub next: f64,
}

impl Default for TapZones {
    fn default() -> Self {
        Self { previous: DEFAULT_PREVIOUS_FRACTION, next: DEFAULT_NEXT_FRACTION }
    }
}

impl TapZones {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("previous", self.previous), ("next", self.next)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("tap zone fraction `{name}` must lie in [0, 1], got {value}"));
            }
        }
        if self.previous + self.next > 1.0 {
            return Err(anyhow!(
                "tap zone fractions overlap: previous {} + next {} exceeds the viewport",
                self.previous,
                self.next
            ));
        }
        Ok(())
    }

    /// Band edges for a concrete viewport width.
    pub fn layout(&self, width: f64) -> ZoneLayout {
        let center_start = width * self.previous;
        // Subtracting from the width keeps the right edge exact for round widths.
        let next_start = (width - width * self.next).max(center_start);
        ZoneLayout { width, center_start, next_start }
    }
}

/// Left `[0, center_start)`, center `[center_start, next_start)`, right `[next_start, width)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneLayout {
    pub width: f64,
    pub center_start: f64,
    pub next_start: f64,
}

impl ZoneLayout {
    pub fn classify(&self, x: f64) -> Intent {
        if !(0.0..self.width).contains(&x) {
            Intent::None
        } else if x < self.center_start {
            Intent::Previous
        } else if x < self.next_start {
            Intent::ToggleOverlay
        } else {
            Intent::Next
        }
    }
}

/// Resolve a tap into an intent.
///
/// An unmeasured or collapsed viewport, and taps outside the viewport, resolve to
/// [`Intent::None`].
pub fn resolve(point: Point, viewport: Size, zones: &TapZones) -> Intent {
    if viewport.is_degenerate() {
        return Intent::None;
    }
    if !(0.0..viewport.height).contains(&point.y) {
        return Intent::None;
    }
    zones.layout(viewport.width).classify(point.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_split_matches_documented_bands() {
        let layout = TapZones::default().layout(300.0);
        assert_eq!(layout.center_start, 90.0);
        assert_eq!(layout.next_start, 210.0);
    }

    #[test]
    fn boundaries_belong_to_the_band_they_open() {
        let zones = TapZones::default();
        let viewport = Size::new(300.0, 100.0);
        assert_eq!(resolve(Point::new(0.0, 50.0), viewport, &zones), Intent::Previous);
        assert_eq!(resolve(Point::new(89.999, 50.0), viewport, &zones), Intent::Previous);
        assert_eq!(resolve(Point::new(90.0, 50.0), viewport, &zones), Intent::ToggleOverlay);
        assert_eq!(resolve(Point::new(209.999, 50.0), viewport, &zones), Intent::ToggleOverlay);
        assert_eq!(resolve(Point::new(210.0, 50.0), viewport, &zones), Intent::Next);
        assert_eq!(resolve(Point::new(299.999, 50.0), viewport, &zones), Intent::Next);
    }

    #[test]
    fn outside_points_resolve_to_none() {
        let zones = TapZones::default();
        let viewport = Size::new(300.0, 100.0);
        assert_eq!(resolve(Point::new(300.0, 50.0), viewport, &zones), Intent::None);
        assert_eq!(resolve(Point::new(-1.0, 50.0), viewport, &zones), Intent::None);
        assert_eq!(resolve(Point::new(10.0, 100.0), viewport, &zones), Intent::None);
        assert_eq!(resolve(Point::new(f64::NAN, 10.0), viewport, &zones), Intent::None);
    }

    #[test]
    fn degenerate_viewport_never_navigates() {
        let zones = TapZones::default();
        assert_eq!(resolve(Point::new(5.0, 5.0), Size::new(0.0, 100.0), &zones), Intent::None);
        assert_eq!(resolve(Point::new(5.0, 5.0), Size::new(100.0, 0.0), &zones), Intent::None);
    }

    #[test]
    fn validate_rejects_bad_fractions() {
        assert!(TapZones::default().validate().is_ok());
        assert!(TapZones { previous: -0.1, next: 0.3 }.validate().is_err());
        assert!(TapZones { previous: 0.6, next: 0.5 }.validate().is_err());
        assert!(TapZones { previous: f64::NAN, next: 0.3 }.validate().is_err());
        assert!(TapZones { previous: 0.5, next: 0.5 }.validate().is_ok());
    }

    #[test]
    fn zero_width_center_band_is_allowed() {
        let zones = TapZones { previous: 0.5, next: 0.5 };
        let viewport = Size::new(100.0, 100.0);
        assert_eq!(resolve(Point::new(49.0, 1.0), viewport, &zones), Intent::Previous);
        assert_eq!(resolve(Point::new(50.0, 1.0), viewport, &zones), Intent::Next);
    }
}

//! Placement of the current page inside the viewport.

use crate::types::{FitMode, ImageDimensions, Rect, Size};

/// Compute the on-screen rectangle of a page of `page` pixels, centred in `viewport`.
///
/// Returns `None` when either side is degenerate, since no placement can be derived.
pub fn fit_page(page: ImageDimensions, viewport: Size, fit: FitMode) -> Option<Rect> {
    if viewport.is_degenerate() || page.width == 0 || page.height == 0 {
        return None;
    }

    let page_w = f64::from(page.width);
    let page_h = f64::from(page.height);
    let scale_w = viewport.width / page_w;
    let scale_h = viewport.height / page_h;

    let (width, height) = match fit {
        FitMode::FitWidth => (viewport.width, page_h * scale_w),
        FitMode::FitHeight => (page_w * scale_h, viewport.height),
        FitMode::FitContain => {
            let scale = scale_w.min(scale_h);
            (page_w * scale, page_h * scale)
        }
        FitMode::Original => (page_w, page_h),
        FitMode::Fill => (viewport.width, viewport.height),
    };

    Some(Rect {
        x: (viewport.width - width) / 2.0,
        y: (viewport.height - height) / 2.0,
        width,
        height,
    })
}

//! Box geometry and background positioning areas

use super::dom::ElementData;
use super::style::{BackgroundOrigin, Side};

/// A width × height pair in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

/// Rectangle representing a region
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// The sizes a layout engine reports for a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    /// Border box as laid out on screen (`getBoundingClientRect`)
    pub bounding: Rect,
    /// Border-box size (`offsetWidth`/`offsetHeight`)
    pub offset: Size,
    /// Padding-box size (`clientWidth`/`clientHeight`)
    pub client: Size,
}

impl BoxMetrics {
    /// Metrics for a box without borders or scrollbars
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            bounding: Rect::new(0.0, 0.0, width, height),
            offset: Size::new(width, height),
            client: Size::new(width, height),
        }
    }

    /// Metrics for a box with uniform border width
    pub fn bordered(width: f32, height: f32, border: f32) -> Self {
        Self {
            bounding: Rect::new(0.0, 0.0, width, height),
            offset: Size::new(width, height),
            client: Size::new(width - 2.0 * border, height - 2.0 * border),
        }
    }
}

/// Size of the element's background positioning area.
///
/// Fixed backgrounds are positioned against the viewport; everything else
/// against the box named by `background-origin`. Transforms are ignored.
pub fn positioning_area(element: &ElementData, viewport: Size) -> Size {
    let style = &element.style;
    if style.background_attachment_fixed() {
        return viewport;
    }

    let metrics = &element.metrics;
    match style.background_origin() {
        BackgroundOrigin::BorderBox => metrics.offset,
        BackgroundOrigin::PaddingBox => metrics.client,
        BackgroundOrigin::ContentBox => Size::new(
            metrics.client.width - style.padding(Side::Left) - style.padding(Side::Right),
            metrics.client.height - style.padding(Side::Top) - style.padding(Side::Bottom),
        ),
    }
}

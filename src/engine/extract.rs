//! Per-element image data extraction

use super::page::Page;
use super::width::{WidthResolution, calculate_background_width, needs_intrinsic_ratio};
use crate::network::ImageLoader;
use crate::renderer::{
    BackgroundSize, ElementKind, NodeId, parse_background_image, parse_background_size,
    positioning_area,
};
use crate::utils::ExtractError;

/// Which image an element shows and how wide it is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    /// Source URL, resolved against the page
    pub src: String,
    /// Rendered width in CSS pixels, unrounded
    pub width: f32,
}

/// A background whose width waits on the image's aspect ratio
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredBackground {
    pub src: String,
    pub size: BackgroundSize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Ready(ImageDescriptor),
    /// A probe for `src` is in flight
    Deferred(DeferredBackground),
}

/// Work out the image source and rendered width of `id`.
///
/// May start a probe load through the page's loader when a background's
/// width depends on the image's aspect ratio and the image is not cached.
pub fn extract_image_data<L: ImageLoader>(
    page: &mut Page<L>,
    id: NodeId,
) -> Result<Extraction, ExtractError> {
    let element = page.document().element(id);

    if element.kind() == ElementKind::Image {
        let raw = element.get_attribute("src").map(String::as_str).unwrap_or("");
        return Ok(Extraction::Ready(ImageDescriptor {
            src: page.resolve_url(raw),
            width: element.metrics.bounding.width,
        }));
    }

    if element.style.is_inline_flow() {
        return Err(ExtractError::UnsupportedInlineFlow);
    }
    let raw = parse_background_image(element.style.background_image())
        .ok_or(ExtractError::UnparsableBackgroundImage)?;
    let size = parse_background_size(element.style.background_size())
        .ok_or(ExtractError::UnparsableBackgroundSize)?;
    let area = positioning_area(element, page.viewport());
    let src = page.resolve_url(&raw);

    let natural = if needs_intrinsic_ratio(&size) {
        page.probe(&src)
    } else {
        None
    };

    match calculate_background_width(area, &size, natural)? {
        WidthResolution::Ready(width) => Ok(Extraction::Ready(ImageDescriptor { src, width })),
        WidthResolution::Pending => Ok(Extraction::Deferred(DeferredBackground { src, size })),
    }
}

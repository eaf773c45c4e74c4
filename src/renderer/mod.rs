//! Host document model for respswap
//!
//! The swapper reads elements, their computed styles and their box metrics
//! from here, and writes back `src`, inline background images and classes.

pub mod css;
mod dom;
mod geometry;
mod style;

pub use css::{BackgroundSize, SizeComponent, parse_background_image, parse_background_size};
pub use dom::{Document, ElementData, ElementKind, InlineDeclaration, NodeId};
pub use geometry::{BoxMetrics, Rect, Size, positioning_area};
pub use style::{BackgroundOrigin, ComputedStyle, Side};

//! # Respswap - width-aware image swapping
//!
//! Rewrites marked `<img>` sources and CSS background images so that a
//! server-side resizer receives the width each image is actually rendered
//! at, then swaps the resized image in once it has loaded.
//!
//! ## Architecture
//!
//! - **renderer**: host document model, computed styles, CSS value parsing
//!   and background positioning areas
//! - **network**: image loaders that report natural image sizes
//! - **engine**: width calculation, extraction, grouping and swapping
//! - **devtools**: console diagnostics and element paths
//! - **utils**: shared error types
//!
//! ## Example
//!
//! ```
//! use respswap::{BoxMetrics, Document, ElementData, MemoryImageLoader, Page, Respswap, Size};
//!
//! let mut document = Document::new();
//! let body = document.body();
//! let img = document.append_child(
//!     body,
//!     ElementData::new("img")
//!         .with_class("respswap")
//!         .with_attribute("src", "a.jpg")
//!         .with_metrics(BoxMetrics::sized(350.0, 200.0)),
//! );
//!
//! let loader = MemoryImageLoader::new().with_fallback(350, 200);
//! let mut page = Page::new(document, Size::new(1280.0, 720.0), loader);
//! Respswap::default().install(&mut page);
//!
//! page.mark_ready();
//! page.run_until_idle();
//! assert_eq!(page.document().element(img).get_attribute("src").unwrap(), "a@350w.jpg");
//! ```

pub mod devtools;
pub mod engine;
pub mod network;
pub mod renderer;
pub mod utils;

// Re-export main types for convenience
pub use engine::{Config, Page, Respswap, ScanReport, append_width_to_src};
pub use network::{HttpImageLoader, ImageLoader, MemoryImageLoader, NaturalSize};
pub use renderer::{BoxMetrics, Document, ElementData, NodeId, Size};
pub use utils::error::{ExtractError, RespswapError, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "respswap";

//! Image loading for respswap
//!
//! Probes learn an image's natural size; requests pre-load a rewritten URL
//! before it is swapped in.

mod http;
mod images;
mod loader;

pub use http::HttpImageLoader;
pub use images::{NaturalSize, decode_dimensions};
pub use loader::{CompletedLoad, ImageLoader, MemoryImageLoader};

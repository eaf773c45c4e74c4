//! Engine configuration

use super::rewrite::append_width_to_src;
use std::fmt;

/// Class token that opts an element into processing
pub const DEFAULT_MARKER_CLASS: &str = "respswap";

/// Strategy that turns a source URL and a pixel width into the URL to load
pub type RewriteFn = Box<dyn Fn(&str, u32) -> String>;

/// Respswap configuration
pub struct Config {
    /// Class token marking elements to process
    pub marker_class: String,
    rewrite: RewriteFn,
}

impl Config {
    pub fn with_marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Replace the URL convention, e.g. for a resizer that takes a query
    /// parameter instead of an `@<width>w` token.
    pub fn with_rewrite<F>(mut self, rewrite: F) -> Self
    where
        F: Fn(&str, u32) -> String + 'static,
    {
        self.rewrite = Box::new(rewrite);
        self
    }

    /// Apply the configured URL convention
    pub fn rewrite(&self, src: &str, width: u32) -> String {
        (self.rewrite)(src, width)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            rewrite: Box::new(append_width_to_src),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("marker_class", &self.marker_class)
            .finish_non_exhaustive()
    }
}

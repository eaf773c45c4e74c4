//! Image loading interface and an in-memory loader

use super::images::NaturalSize;
use crate::utils::{RespswapError, Result};
use std::collections::HashMap;

/// A finished image load, successful or not
#[derive(Debug)]
pub struct CompletedLoad {
    pub url: String,
    pub result: Result<NaturalSize>,
}

/// The browser's image fetch and decode stack, as seen by the page.
///
/// Every call to [`ImageLoader::request`] must eventually be answered by one
/// [`CompletedLoad`] for that URL, even when the image is already cached.
/// Requests for a URL that is still in flight may share its completion.
pub trait ImageLoader {
    /// Natural size of `url` if it has already been loaded. Otherwise starts
    /// loading it (if not already in flight) and returns `None`.
    fn probe(&mut self, url: &str) -> Option<NaturalSize>;

    /// Start loading `url`
    fn request(&mut self, url: &str);

    /// Loads finished since the last call, without blocking
    fn poll(&mut self) -> Vec<CompletedLoad>;

    /// Block until at least one load finishes. Returns an empty list when
    /// nothing is in flight.
    fn wait(&mut self) -> Vec<CompletedLoad>;
}

impl<L: ImageLoader + ?Sized> ImageLoader for Box<L> {
    fn probe(&mut self, url: &str) -> Option<NaturalSize> {
        (**self).probe(url)
    }

    fn request(&mut self, url: &str) {
        (**self).request(url)
    }

    fn poll(&mut self) -> Vec<CompletedLoad> {
        (**self).poll()
    }

    fn wait(&mut self) -> Vec<CompletedLoad> {
        (**self).wait()
    }
}

/// Loader serving a fixed table of images.
///
/// Requests complete on the next `poll`/`wait`, in request order. Every
/// actual fetch is logged, which makes fetch counts observable; requests
/// answered by the cache or by a load already in flight are not fetches.
#[derive(Debug, Default)]
pub struct MemoryImageLoader {
    /// What the "server" has
    images: HashMap<String, NaturalSize>,
    /// Served for unknown URLs when set
    fallback: Option<NaturalSize>,
    /// Loaded and cached
    complete: HashMap<String, NaturalSize>,
    /// URLs whose completion will be reported on the next poll
    queued: Vec<String>,
    fetches: Vec<String>,
}

impl MemoryImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `url` with the given natural size
    pub fn with_image(mut self, url: &str, width: u32, height: u32) -> Self {
        self.images
            .insert(url.to_string(), NaturalSize::new(width, height));
        self
    }

    /// Serve `url` and treat it as already loaded
    pub fn with_cached(mut self, url: &str, width: u32, height: u32) -> Self {
        let size = NaturalSize::new(width, height);
        self.images.insert(url.to_string(), size);
        self.complete.insert(url.to_string(), size);
        self
    }

    /// Serve any URL not in the table with this size
    pub fn with_fallback(mut self, width: u32, height: u32) -> Self {
        self.fallback = Some(NaturalSize::new(width, height));
        self
    }

    /// Every URL fetched so far, in order
    pub fn requests(&self) -> &[String] {
        &self.fetches
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.fetches.iter().filter(|r| *r == url).count()
    }

    fn lookup(&self, url: &str) -> Result<NaturalSize> {
        self.complete
            .get(url)
            .or_else(|| self.images.get(url))
            .copied()
            .or(self.fallback)
            .ok_or_else(|| RespswapError::NotFound(url.to_string()))
    }
}

impl ImageLoader for MemoryImageLoader {
    fn probe(&mut self, url: &str) -> Option<NaturalSize> {
        if let Some(size) = self.complete.get(url) {
            return Some(*size);
        }
        self.request(url);
        None
    }

    fn request(&mut self, url: &str) {
        if self.queued.iter().any(|u| u == url) {
            return;
        }
        if !self.complete.contains_key(url) {
            self.fetches.push(url.to_string());
        }
        self.queued.push(url.to_string());
    }

    fn poll(&mut self) -> Vec<CompletedLoad> {
        let queued = std::mem::take(&mut self.queued);
        queued
            .into_iter()
            .map(|url| {
                let result = self.lookup(&url);
                if let Ok(size) = result {
                    self.complete.insert(url.clone(), size);
                }
                CompletedLoad { url, result }
            })
            .collect()
    }

    fn wait(&mut self) -> Vec<CompletedLoad> {
        self.poll()
    }
}

//! Page representation
//!
//! The host environment a scan runs against: the document, the viewport, the
//! console, and the image loader with its one-shot listeners.

use crate::devtools::Console;
use crate::network::{CompletedLoad, ImageLoader, NaturalSize};
use crate::renderer::{Document, Size};
use crate::utils::{RespswapError, Result};
use std::rc::Rc;
use url::Url;

/// What a load listener is told. Shared because one load can answer several
/// listeners.
pub type LoadOutcome = std::result::Result<NaturalSize, Rc<RespswapError>>;

/// Runs once when a requested image finishes loading
pub type LoadListener<L> = Box<dyn FnOnce(&mut Page<L>, LoadOutcome)>;

/// Runs once when the document becomes ready
pub type ReadyListener<L> = Box<dyn FnOnce(&mut Page<L>)>;

/// A loaded web page
pub struct Page<L> {
    /// Base URL for resolving relative image URLs
    url: Option<Url>,
    document: Document,
    viewport: Size,
    console: Console,
    loader: L,
    load_listeners: Vec<(String, LoadListener<L>)>,
    ready_listeners: Vec<ReadyListener<L>>,
    ready: bool,
}

impl<L: ImageLoader> Page<L> {
    /// Create a new page
    pub fn new(document: Document, viewport: Size, loader: L) -> Self {
        Self {
            url: None,
            document,
            viewport,
            console: Console::new(),
            loader,
            load_listeners: Vec::new(),
            ready_listeners: Vec::new(),
            ready: false,
        }
    }

    /// Set the URL relative image references resolve against
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Keep at most `max` console messages, dropping the oldest
    pub fn with_console_limit(mut self, max: usize) -> Self {
        self.console.set_max_messages(max);
        self
    }

    /// Get the page URL
    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Get the DOM document
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Resolve an image reference the way `img.src` would report it.
    /// Without a base URL, or when joining fails, the reference is kept as is.
    pub fn resolve_url(&self, raw: &str) -> String {
        match &self.url {
            Some(base) => base
                .join(raw)
                .map(String::from)
                .unwrap_or_else(|_| raw.to_string()),
            None => raw.to_string(),
        }
    }

    /// Natural size of `url` if already loaded; otherwise starts loading it
    pub fn probe(&mut self, url: &str) -> Option<NaturalSize> {
        self.loader.probe(url)
    }

    /// Request `url` and run `listener` once its load finishes
    pub fn add_load_listener(&mut self, url: &str, listener: LoadListener<L>) {
        self.loader.request(url);
        self.load_listeners.push((url.to_string(), listener));
    }

    /// Load listeners still waiting for their image
    pub fn pending_listeners(&self) -> usize {
        self.load_listeners.len()
    }

    /// Run `listener` when the document becomes ready, or right away if it
    /// already is.
    pub fn on_ready(&mut self, listener: ReadyListener<L>) {
        if self.ready {
            listener(self);
        } else {
            self.ready_listeners.push(listener);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Mark the document as ready. Only the first call fires listeners.
    pub fn mark_ready(&mut self) {
        if self.ready {
            return;
        }
        self.ready = true;
        for listener in std::mem::take(&mut self.ready_listeners) {
            listener(self);
        }
    }

    /// Deliver loads that have already finished. Returns the number of
    /// listeners run.
    pub fn dispatch_loads(&mut self) -> usize {
        let completed = self.loader.poll();
        self.deliver(completed)
    }

    /// Keep waiting for and delivering loads until none are in flight,
    /// including loads started by the listeners themselves.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        loop {
            let completed = self.loader.wait();
            if completed.is_empty() {
                return fired;
            }
            fired += self.deliver(completed);
        }
    }

    fn deliver(&mut self, completed: Vec<CompletedLoad>) -> usize {
        let mut fired = 0;
        for load in completed {
            let outcome: LoadOutcome = load.result.map_err(Rc::new);
            // Listeners leave the table before they run: each fires at most
            // once, and ones they register wait for the next load.
            let (matching, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.load_listeners)
                .into_iter()
                .partition(|(url, _)| *url == load.url);
            self.load_listeners = waiting;
            for (_, listener) in matching {
                listener(self, outcome.clone());
                fired += 1;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::MemoryImageLoader;
    use std::cell::Cell;

    type TestPage = Page<MemoryImageLoader>;

    fn page(loader: MemoryImageLoader) -> TestPage {
        Page::new(Document::new(), Size::new(800.0, 600.0), loader)
    }

    #[test]
    fn test_resolve_url() {
        let plain = page(MemoryImageLoader::new());
        assert_eq!(plain.resolve_url("a.jpg"), "a.jpg");

        let based = page(MemoryImageLoader::new())
            .with_base_url("https://site.test/gallery/")
            .unwrap();
        assert_eq!(based.resolve_url("a.jpg"), "https://site.test/gallery/a.jpg");
        assert_eq!(
            based.resolve_url("https://cdn.test/b.png"),
            "https://cdn.test/b.png"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(page(MemoryImageLoader::new()).with_base_url("not a url").is_err());
    }

    #[test]
    fn test_load_listener_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let mut page = page(MemoryImageLoader::new().with_image("a.jpg", 10, 5));
        for _ in 0..2 {
            let fired = Rc::clone(&fired);
            page.add_load_listener(
                "a.jpg",
                Box::new(move |_: &mut TestPage, outcome: LoadOutcome| {
                    assert_eq!(outcome.unwrap(), NaturalSize::new(10, 5));
                    fired.set(fired.get() + 1);
                }),
            );
        }

        assert_eq!(page.dispatch_loads(), 2);
        assert_eq!(page.dispatch_loads(), 0);
        assert_eq!(fired.get(), 2);
        assert_eq!(page.pending_listeners(), 0);
    }

    #[test]
    fn test_failed_load_reaches_listener() {
        let failed = Rc::new(Cell::new(false));
        let mut page = page(MemoryImageLoader::new());
        let flag = Rc::clone(&failed);
        page.add_load_listener(
            "missing.jpg",
            Box::new(move |_: &mut TestPage, outcome: LoadOutcome| flag.set(outcome.is_err())),
        );

        page.run_until_idle();
        assert!(failed.get());
    }

    #[test]
    fn test_run_until_idle_follows_chained_loads() {
        let mut page = page(MemoryImageLoader::new().with_fallback(1, 1));
        page.add_load_listener(
            "first.jpg",
            Box::new(|page: &mut TestPage, _: LoadOutcome| {
                page.add_load_listener(
                    "second.jpg",
                    Box::new(|page: &mut TestPage, _: LoadOutcome| page.console_mut().info("done")),
                );
            }),
        );

        assert_eq!(page.run_until_idle(), 2);
        assert_eq!(page.console().message_count(), 1);
    }

    #[test]
    fn test_console_limit_keeps_latest() {
        let mut page = page(MemoryImageLoader::new()).with_console_limit(2);
        for i in 0..4 {
            page.console_mut().error(format!("error {}", i));
        }

        let kept: Vec<_> = page.console().messages().map(|m| m.message.as_str()).collect();
        assert_eq!(kept, ["error 2", "error 3"]);
    }

    #[test]
    fn test_ready_listeners() {
        let runs = Rc::new(Cell::new(0));
        let mut page = page(MemoryImageLoader::new());

        let counter = Rc::clone(&runs);
        page.on_ready(Box::new(move |_: &mut TestPage| counter.set(counter.get() + 1)));
        assert_eq!(runs.get(), 0);

        page.mark_ready();
        page.mark_ready();
        assert_eq!(runs.get(), 1);

        let counter = Rc::clone(&runs);
        page.on_ready(Box::new(move |_: &mut TestPage| counter.set(counter.get() + 1)));
        assert_eq!(runs.get(), 2);
    }
}

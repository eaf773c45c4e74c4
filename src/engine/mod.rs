//! The swapping engine
//!
//! A scan runs in phases:
//! 1. Collect every element carrying the marker class
//! 2. Extract each one's image source and rendered width
//! 3. Group elements by source, keeping the widest requirement
//! 4. Rewrite each source URL once for its group
//! 5. Load the rewritten URL and swap it in on every element of the group
//! 6. Strip the marker class from everything scanned

mod config;
mod extract;
mod page;
mod rewrite;
mod width;

pub use config::{Config, DEFAULT_MARKER_CLASS, RewriteFn};
pub use extract::{DeferredBackground, Extraction, ImageDescriptor, extract_image_data};
pub use page::{LoadListener, LoadOutcome, Page, ReadyListener};
pub use rewrite::append_width_to_src;
pub use width::{WidthResolution, calculate_background_width, needs_intrinsic_ratio};

use crate::devtools::path_to;
use crate::network::ImageLoader;
use crate::renderer::{ElementKind, NodeId, positioning_area};
use crate::utils::ExtractError;
use std::collections::HashMap;
use std::rc::Rc;

/// Elements sharing one source image within a scan
#[derive(Debug, Clone, Default)]
struct SourceGroup {
    elements: Vec<NodeId>,
    max_width: f32,
}

/// Counts from one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Elements that carried the marker class
    pub scanned: usize,
    /// Distinct sources a swap was started for
    pub groups: usize,
    /// Backgrounds waiting on their image's aspect ratio
    pub deferred: usize,
    /// Elements skipped because of an extraction error
    pub errors: usize,
}

/// Swaps marked images for variants sized to their rendered width
#[derive(Debug, Clone)]
pub struct Respswap {
    config: Rc<Config>,
}

impl Respswap {
    pub fn new(config: Config) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan once the page's document becomes ready
    pub fn install<L: ImageLoader + 'static>(&self, page: &mut Page<L>) {
        let engine = self.clone();
        page.on_ready(Box::new(move |page: &mut Page<L>| {
            engine.scan_for_new_images(page);
        }));
    }

    /// Process every element currently carrying the marker class.
    ///
    /// Call again after inserting new marked elements. Swaps complete as the
    /// page delivers loads; the marker class is gone from every scanned
    /// element by the time this returns.
    pub fn scan_for_new_images<L: ImageLoader + 'static>(&self, page: &mut Page<L>) -> ScanReport {
        let marked = page
            .document()
            .elements_with_class(&self.config.marker_class);
        let mut report = ScanReport {
            scanned: marked.len(),
            ..ScanReport::default()
        };

        // All reads first, so layout is not interleaved with writes.
        let mut groups: HashMap<String, SourceGroup> = HashMap::new();
        for &id in &marked {
            match extract_image_data(page, id) {
                Ok(Extraction::Ready(descriptor)) => {
                    let group = groups.entry(descriptor.src).or_default();
                    group.elements.push(id);
                    group.max_width = group.max_width.max(descriptor.width);
                }
                Ok(Extraction::Deferred(deferred)) => {
                    report.deferred += 1;
                    self.defer(page, id, deferred);
                }
                Err(err) => {
                    report.errors += 1;
                    self.report_error(page, err, id);
                }
            }
        }

        report.groups = groups.len();
        for (src, group) in groups {
            self.swap_image(page, &src, group.max_width, group.elements);
        }

        for &id in &marked {
            page.document_mut()
                .element_mut(id)
                .remove_class(&self.config.marker_class);
        }

        log::debug!(
            "respswap scan: {} scanned, {} groups, {} deferred, {} errors",
            report.scanned,
            report.groups,
            report.deferred,
            report.errors
        );
        report
    }

    /// Rewrite `src` for `width` and, once the new image has loaded, show it
    /// on every element in `elements`.
    fn swap_image<L: ImageLoader + 'static>(
        &self,
        page: &mut Page<L>,
        src: &str,
        width: f32,
        elements: Vec<NodeId>,
    ) {
        let width = width.round();
        // Negative or collapsed areas would ask the resizer for a 0px image.
        if !(width >= 1.0) {
            let message = format!("Skipping {}: rendered width {} is not positive", src, width);
            log::warn!("{}", message);
            page.console_mut().warn(message);
            return;
        }

        let new_src = self.config.rewrite(src, width as u32);
        log::debug!("swapping {} -> {} on {} element(s)", src, new_src, elements.len());

        let target = new_src.clone();
        page.add_load_listener(
            &new_src,
            Box::new(move |page: &mut Page<L>, outcome: LoadOutcome| match outcome {
                Ok(_) => apply_swap(page, &target, &elements),
                Err(err) => {
                    let message = format!("Failed to load {}: {}", target, err);
                    log::warn!("{}", message);
                    page.console_mut().warn(message);
                }
            }),
        );
    }

    /// Finish a deferred background once its probe has loaded.
    ///
    /// This path swaps the single element on its own; it does not share the
    /// load with other elements using the same image.
    fn defer<L: ImageLoader + 'static>(
        &self,
        page: &mut Page<L>,
        id: NodeId,
        deferred: DeferredBackground,
    ) {
        let engine = self.clone();
        let src = deferred.src.clone();
        page.add_load_listener(
            &src,
            Box::new(move |page: &mut Page<L>, outcome: LoadOutcome| {
                engine.resume_deferred(page, id, deferred, outcome);
            }),
        );
    }

    fn resume_deferred<L: ImageLoader + 'static>(
        &self,
        page: &mut Page<L>,
        id: NodeId,
        deferred: DeferredBackground,
        outcome: LoadOutcome,
    ) {
        let natural = match outcome {
            Ok(natural) => natural,
            Err(err) => {
                log::warn!("probe for {} failed: {}", deferred.src, err);
                return;
            }
        };

        let area = positioning_area(page.document().element(id), page.viewport());
        match calculate_background_width(area, &deferred.size, Some(natural)) {
            Ok(WidthResolution::Ready(width)) => {
                self.swap_image(page, &deferred.src, width, vec![id]);
            }
            Ok(WidthResolution::Pending) => {
                log::warn!("{} still has no aspect ratio after loading", deferred.src);
            }
            Err(err) => self.report_error(page, err, id),
        }
    }

    fn report_error<L: ImageLoader>(&self, page: &mut Page<L>, err: ExtractError, id: NodeId) {
        let message = format!("{} Element: {}", err, path_to(page.document(), id));
        log::error!("{}", message);
        page.console_mut().error(message);
    }
}

impl Default for Respswap {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Point every element at `new_src`
fn apply_swap<L>(page: &mut Page<L>, new_src: &str, elements: &[NodeId])
where
    L: ImageLoader,
{
    for &id in elements {
        let element = page.document_mut().element_mut(id);
        match element.kind() {
            ElementKind::Image => element.set_attribute("src", new_src),
            ElementKind::Generic => {
                element.set_style_property("background-image", format!("url('{}')", new_src), true);
            }
        }
    }
}

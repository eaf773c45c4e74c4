//! Selector-like paths that identify an element in diagnostics

use crate::renderer::{Document, NodeId};

/// Describe where `id` sits in the document.
///
/// Stops at the first ancestor with an id (`#hero`) or at `body`; otherwise
/// each step is `tag:nth-child(n)`, e.g. `body > div:nth-child(2) > img:nth-child(1)`.
pub fn path_to(document: &Document, id: NodeId) -> String {
    let element = document.element(id);
    if let Some(element_id) = element.id() {
        return format!("#{}", element_id);
    }

    let name = element.tag_name.to_ascii_lowercase();
    match document.parent(id) {
        Some(parent) if name != "body" => format!(
            "{} > {}:nth-child({})",
            path_to(document, parent),
            name,
            document.child_index(id)
        ),
        _ => name,
    }
}

//! Computed style values
//!
//! Values are kept as the serialized strings a CSSOM would hand back, and are
//! only parsed (see [`super::css`]) by the code that needs them.

use super::css::parse_px;
use std::collections::HashMap;

/// Tags whose user-agent `display` is `block`
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "html", "li", "main", "nav", "ol", "p", "pre", "section", "table", "ul",
];

/// `background-origin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundOrigin {
    BorderBox,
    PaddingBox,
    ContentBox,
}

/// A box side, for padding lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    fn padding_property(self) -> &'static str {
        match self {
            Side::Top => "padding-top",
            Side::Right => "padding-right",
            Side::Bottom => "padding-bottom",
            Side::Left => "padding-left",
        }
    }
}

/// Computed styles for an element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    properties: HashMap<String, String>,
}

impl ComputedStyle {
    /// Style with the user-agent defaults for `tag`
    pub fn for_tag(tag: &str) -> Self {
        let mut style = Self::default();
        let tag = tag.to_ascii_lowercase();
        if BLOCK_TAGS.contains(&tag.as_str()) {
            style.set("display", "block");
        }
        style
    }

    /// Get a property value
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties
            .get(&property.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Set a property value
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.properties
            .insert(property.to_ascii_lowercase(), value.into());
    }

    fn get_or(&self, property: &str, initial: &'static str) -> &str {
        self.get(property).map(str::trim).unwrap_or(initial)
    }

    pub fn display(&self) -> &str {
        self.get_or("display", "inline")
    }

    pub fn float(&self) -> &str {
        self.get_or("float", "none")
    }

    pub fn position(&self) -> &str {
        self.get_or("position", "static")
    }

    pub fn background_image(&self) -> &str {
        self.get_or("background-image", "none")
    }

    pub fn background_size(&self) -> &str {
        self.get_or("background-size", "auto")
    }

    pub fn background_attachment_fixed(&self) -> bool {
        self.get_or("background-attachment", "scroll")
            .eq_ignore_ascii_case("fixed")
    }

    /// Unknown values fall back to the initial `padding-box`
    pub fn background_origin(&self) -> BackgroundOrigin {
        match self.get_or("background-origin", "padding-box") {
            "border-box" => BackgroundOrigin::BorderBox,
            "content-box" => BackgroundOrigin::ContentBox,
            _ => BackgroundOrigin::PaddingBox,
        }
    }

    /// Padding in px; anything unparsable counts as zero
    pub fn padding(&self, side: Side) -> f32 {
        self.get(side.padding_property())
            .and_then(parse_px)
            .unwrap_or(0.0)
    }

    /// True when the element lays out in inline flow, where the background
    /// positioning area has no single well-defined box.
    pub fn is_inline_flow(&self) -> bool {
        self.display() == "inline"
            && self.float() == "none"
            && matches!(self.position(), "static" | "relative")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let style = ComputedStyle::default();
        assert_eq!(style.display(), "inline");
        assert_eq!(style.background_image(), "none");
        assert_eq!(style.background_size(), "auto");
        assert_eq!(style.background_origin(), BackgroundOrigin::PaddingBox);
        assert!(!style.background_attachment_fixed());
    }

    #[test]
    fn test_user_agent_display() {
        assert_eq!(ComputedStyle::for_tag("DIV").display(), "block");
        assert_eq!(ComputedStyle::for_tag("span").display(), "inline");
    }

    #[test]
    fn test_inline_flow_detection() {
        let mut style = ComputedStyle::for_tag("span");
        assert!(style.is_inline_flow());

        style.set("position", "relative");
        assert!(style.is_inline_flow());

        style.set("position", "absolute");
        assert!(!style.is_inline_flow());

        let mut floated = ComputedStyle::for_tag("span");
        floated.set("float", "left");
        assert!(!floated.is_inline_flow());

        let mut inline_block = ComputedStyle::for_tag("span");
        inline_block.set("display", "inline-block");
        assert!(!inline_block.is_inline_flow());
    }

    #[test]
    fn test_padding_parsing() {
        let mut style = ComputedStyle::default();
        style.set("padding-left", "12.5px");
        style.set("padding-right", "bogus");
        assert_eq!(style.padding(Side::Left), 12.5);
        assert_eq!(style.padding(Side::Right), 0.0);
        assert_eq!(style.padding(Side::Top), 0.0);
    }

    #[test]
    fn test_property_names_are_case_insensitive() {
        let mut style = ComputedStyle::default();
        style.set("Background-Origin", "content-box");
        assert_eq!(style.background_origin(), BackgroundOrigin::ContentBox);
    }
}

//! Default convention for encoding a width into an image URL

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

fn regex(pattern: &'static str, desc: &'static str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid {desc} regex: {err}"))
}

fn width_token() -> &'static Regex {
    static WIDTH_TOKEN: OnceLock<Regex> = OnceLock::new();
    WIDTH_TOKEN.get_or_init(|| regex(r"@[0-9]+w", "width token"))
}

fn image_extension() -> &'static Regex {
    static IMAGE_EXTENSION: OnceLock<Regex> = OnceLock::new();
    IMAGE_EXTENSION.get_or_init(|| regex(r"\.(?:jpe?g|png|gif|webp)\b", "image extension"))
}

/// Encode `width` into `src` as an `@<width>w` token.
///
/// An existing token is replaced; otherwise the token goes right before the
/// image extension, or at the very end when there is none:
///
/// ```
/// use respswap::append_width_to_src;
///
/// assert_eq!(append_width_to_src("photo@400w.jpg", 800), "photo@800w.jpg");
/// assert_eq!(append_width_to_src("/img/a.png?v=2", 320), "/img/a@320w.png?v=2");
/// assert_eq!(append_width_to_src("/resize/a", 320), "/resize/a@320w");
/// ```
pub fn append_width_to_src(src: &str, width: u32) -> String {
    let suffix = format!("@{}w", width);

    if width_token().is_match(src) {
        return width_token()
            .replacen(src, 1, NoExpand(&suffix))
            .into_owned();
    }

    if let Some(ext) = image_extension().find(src) {
        let mut out = String::with_capacity(src.len() + suffix.len());
        out.push_str(&src[..ext.start()]);
        out.push_str(&suffix);
        out.push_str(&src[ext.start()..]);
        return out;
    }

    src.to_string() + &suffix
}

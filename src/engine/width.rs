//! Background width calculation
//!
//! Pure: callers supply the positioning area and, when they have it, the
//! image's natural size.

use crate::network::NaturalSize;
use crate::renderer::{BackgroundSize, Size, SizeComponent};
use crate::utils::ExtractError;

/// Outcome of a width calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthResolution {
    /// Rendered width in CSS pixels, unrounded
    Ready(f32),
    /// The intrinsic aspect ratio is needed but the image is not loaded yet
    Pending,
}

/// Whether resolving `size` needs the image's intrinsic aspect ratio
pub fn needs_intrinsic_ratio(size: &BackgroundSize) -> bool {
    !matches!(size, BackgroundSize::Explicit { width, .. } if !width.is_auto())
}

/// Width at which the background image will be drawn.
///
/// `natural` is only consulted when the width depends on the aspect ratio;
/// without it that case is [`WidthResolution::Pending`].
pub fn calculate_background_width(
    area: Size,
    size: &BackgroundSize,
    natural: Option<NaturalSize>,
) -> Result<WidthResolution, ExtractError> {
    if let BackgroundSize::Explicit { width, .. } = size {
        match *width {
            SizeComponent::Px(px) => return Ok(WidthResolution::Ready(px)),
            SizeComponent::Percent(fraction) => {
                return Ok(WidthResolution::Ready(fraction * area.width));
            }
            SizeComponent::Auto => {}
        }
    }

    let Some(natural) = natural else {
        return Ok(WidthResolution::Pending);
    };
    let image_ratio = natural.aspect_ratio();

    let width = match size {
        BackgroundSize::Cover if area.aspect_ratio() > image_ratio => area.width,
        BackgroundSize::Contain if area.aspect_ratio() < image_ratio => area.width,
        BackgroundSize::Cover | BackgroundSize::Contain => area.height * image_ratio,
        BackgroundSize::Explicit { height, .. } => match *height {
            None | Some(SizeComponent::Auto) => return Err(ExtractError::MissingFixedSize),
            Some(SizeComponent::Px(px)) => px * image_ratio,
            Some(SizeComponent::Percent(fraction)) => fraction * area.height * image_ratio,
        },
    };
    Ok(WidthResolution::Ready(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn explicit(width: SizeComponent, height: Option<SizeComponent>) -> BackgroundSize {
        BackgroundSize::Explicit { width, height }
    }

    #[test]
    fn test_fixed_width_needs_no_image() {
        let area = Size::new(400.0, 300.0);
        let size = explicit(SizeComponent::Px(250.0), Some(SizeComponent::Auto));
        assert!(!needs_intrinsic_ratio(&size));
        assert_eq!(
            calculate_background_width(area, &size, None),
            Ok(WidthResolution::Ready(250.0))
        );
    }

    #[test]
    fn test_percentage_width_scales_area() {
        let area = Size::new(400.0, 300.0);
        let size = explicit(SizeComponent::Percent(0.5), None);
        assert_eq!(
            calculate_background_width(area, &size, None),
            Ok(WidthResolution::Ready(200.0))
        );
    }

    #[test]
    fn test_keyword_without_image_is_pending() {
        let area = Size::new(400.0, 300.0);
        assert!(needs_intrinsic_ratio(&BackgroundSize::Cover));
        assert_eq!(
            calculate_background_width(area, &BackgroundSize::Cover, None),
            Ok(WidthResolution::Pending)
        );
    }

    #[test]
    fn test_cover_tall_area_uses_height() {
        // area ratio 0.5 < image ratio 1
        let width = calculate_background_width(
            Size::new(100.0, 200.0),
            &BackgroundSize::Cover,
            Some(NaturalSize::new(50, 50)),
        );
        assert_eq!(width, Ok(WidthResolution::Ready(200.0)));
    }

    #[test]
    fn test_cover_wide_area_uses_width() {
        let width = calculate_background_width(
            Size::new(300.0, 100.0),
            &BackgroundSize::Cover,
            Some(NaturalSize::new(50, 50)),
        );
        assert_eq!(width, Ok(WidthResolution::Ready(300.0)));
    }

    #[test]
    fn test_contain() {
        let natural = Some(NaturalSize::new(200, 100));
        // area ratio 1 < image ratio 2
        assert_eq!(
            calculate_background_width(Size::new(100.0, 100.0), &BackgroundSize::Contain, natural),
            Ok(WidthResolution::Ready(100.0))
        );
        // area ratio 4 > image ratio 2
        assert_eq!(
            calculate_background_width(Size::new(400.0, 100.0), &BackgroundSize::Contain, natural),
            Ok(WidthResolution::Ready(200.0))
        );
    }

    #[test]
    fn test_height_driven_widths() {
        let area = Size::new(100.0, 300.0);
        let natural = Some(NaturalSize::new(200, 100));
        assert_eq!(
            calculate_background_width(area, &explicit(SizeComponent::Auto, Some(SizeComponent::Px(40.0))), natural),
            Ok(WidthResolution::Ready(80.0))
        );
        assert_eq!(
            calculate_background_width(area, &explicit(SizeComponent::Auto, Some(SizeComponent::Percent(0.5))), natural),
            Ok(WidthResolution::Ready(300.0))
        );
    }

    #[test]
    fn test_auto_auto_is_missing_fixed_size() {
        let natural = Some(NaturalSize::new(200, 100));
        for size in [
            explicit(SizeComponent::Auto, None),
            explicit(SizeComponent::Auto, Some(SizeComponent::Auto)),
        ] {
            assert_eq!(
                calculate_background_width(Size::new(10.0, 10.0), &size, natural),
                Err(ExtractError::MissingFixedSize)
            );
        }
    }

    proptest! {
        #[test]
        fn cover_fills_and_contain_fits(
            area_w in 1.0f32..4000.0,
            area_h in 1.0f32..4000.0,
            nat_w in 1u32..4000,
            nat_h in 1u32..4000,
        ) {
            let area = Size::new(area_w, area_h);
            let natural = Some(NaturalSize::new(nat_w, nat_h));
            let slack = area_w * 1e-4;

            let Ok(WidthResolution::Ready(cover)) =
                calculate_background_width(area, &BackgroundSize::Cover, natural)
            else {
                panic!("cover with a loaded image must resolve");
            };
            prop_assert!(cover >= area_w - slack);

            let Ok(WidthResolution::Ready(contain)) =
                calculate_background_width(area, &BackgroundSize::Contain, natural)
            else {
                panic!("contain with a loaded image must resolve");
            };
            prop_assert!(contain <= area_w + slack);
        }
    }
}

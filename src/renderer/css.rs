//! Parsers for the background-related CSS values, using cssparser

use cssparser::{ParseError, Parser, ParserInput, Token};

/// One dimension of an explicit `background-size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeComponent {
    Auto,
    /// Absolute length in CSS pixels
    Px(f32),
    /// Percentage of the positioning area, as a fraction (50% is 0.5)
    Percent(f32),
}

impl SizeComponent {
    pub fn is_auto(&self) -> bool {
        matches!(self, SizeComponent::Auto)
    }
}

/// A single-layer `background-size` value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundSize {
    Cover,
    Contain,
    /// `<width> <height>?`; a missing height behaves like `auto`
    Explicit {
        width: SizeComponent,
        height: Option<SizeComponent>,
    },
}

/// Parse a `background-image` holding exactly one `url(...)`.
///
/// Returns `None` for `none`, gradients, empty urls and multiple layers.
pub fn parse_background_image(value: &str) -> Option<String> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(|p| single_url(p)).ok()
}

/// Parse `cover | contain | <lpa> <lpa>?` where `<lpa>` is a px length, a
/// percentage or `auto`.
pub fn parse_background_size(value: &str) -> Option<BackgroundSize> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(|p| background_size(p)).ok()
}

/// Parse a px length such as `12px` (a bare `0` is accepted too)
pub fn parse_px(value: &str) -> Option<f32> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(|p| px_length(p)).ok()
}

fn single_url<'i>(parser: &mut Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
    let url = parser.expect_url()?;
    if url.trim().is_empty() {
        return Err(parser.new_custom_error(()));
    }
    Ok(url.trim().to_string())
}

fn background_size<'i>(parser: &mut Parser<'i, '_>) -> Result<BackgroundSize, ParseError<'i, ()>> {
    if parser
        .try_parse(|p| p.expect_ident_matching("cover"))
        .is_ok()
    {
        return Ok(BackgroundSize::Cover);
    }
    if parser
        .try_parse(|p| p.expect_ident_matching("contain"))
        .is_ok()
    {
        return Ok(BackgroundSize::Contain);
    }

    let width = size_component(parser)?;
    let height = parser.try_parse(|p| size_component(p)).ok();
    Ok(BackgroundSize::Explicit { width, height })
}

fn size_component<'i>(parser: &mut Parser<'i, '_>) -> Result<SizeComponent, ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Ident(ref ident) if ident.eq_ignore_ascii_case("auto") => Ok(SizeComponent::Auto),
        Token::Percentage { unit_value, .. } if unit_value >= 0.0 => {
            Ok(SizeComponent::Percent(unit_value))
        }
        Token::Dimension { value, ref unit, .. }
            if value >= 0.0 && unit.eq_ignore_ascii_case("px") =>
        {
            Ok(SizeComponent::Px(value))
        }
        Token::Number { value, .. } if value == 0.0 => Ok(SizeComponent::Px(0.0)),
        _ => Err(parser.new_custom_error(())),
    }
}

fn px_length<'i>(parser: &mut Parser<'i, '_>) -> Result<f32, ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Dimension { value, ref unit, .. } if unit.eq_ignore_ascii_case("px") => Ok(value),
        Token::Number { value, .. } if value == 0.0 => Ok(0.0),
        _ => Err(parser.new_custom_error(())),
    }
}

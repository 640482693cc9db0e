//! Measurement-to-pixel conversion.
//!
//! The converter is context-driven: font-relative units resolve against the
//! caller-supplied root/parent font sizes, and percentages only resolve when
//! the caller provides a `parent_size` (the resolver does so for `font-size`
//! alone). Unsupported units yield `None` and the caller keeps the raw value.

/// Default root font size in CSS pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Clone, Copy, Debug)]
pub struct MeasurementContext<'a> {
    pub value: &'a str,
    pub root_font_size: f32,
    pub parent_font_size: f32,
    pub parent_size: Option<f32>,
}

/// Convert a single measurement to pixels, or `None` if the value is not a
/// measurement this converter understands.
pub fn to_pixels(ctx: &MeasurementContext<'_>) -> Option<f32> {
    let (number, unit) = split_number(ctx.value.trim())?;
    match unit.to_ascii_lowercase().as_str() {
        "" | "px" => Some(number),
        "em" => Some(number * ctx.parent_font_size),
        "rem" => Some(number * ctx.root_font_size),
        // Approximate: 1ex and 1ch as half an em.
        "ex" | "ch" => Some(number * ctx.parent_font_size * 0.5),
        "pt" => Some(number * 96.0 / 72.0),
        "pc" => Some(number * 16.0),
        "in" => Some(number * 96.0),
        "cm" => Some(number * 96.0 / 2.54),
        "mm" => Some(number * 96.0 / 25.4),
        "q" => Some(number * 96.0 / 101.6),
        "%" => ctx.parent_size.map(|size| number * size / 100.0),
        _ => None,
    }
}

/// Resolve every measurement token in a whitespace-separated value, leaving
/// unconvertible tokens untouched.
pub fn resolve_measurements_in_value(ctx: &MeasurementContext<'_>) -> String {
    ctx.value
        .split_whitespace()
        .map(|token| {
            let token_ctx = MeasurementContext { value: token, ..*ctx };
            to_pixels(&token_ctx).map_or_else(|| token.to_string(), format_px)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_px(px: f32) -> String {
    format!("{px}px")
}

fn split_number(value: &str) -> Option<(f32, &str)> {
    let mut end = 0;
    for (i, c) in value.char_indices() {
        let valid = c.is_ascii_digit() || c == '.' || ((c == '+' || c == '-') && i == 0);
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        return None;
    }
    let number: f32 = value[..end].parse().ok()?;
    Some((number, value[end..].trim()))
}

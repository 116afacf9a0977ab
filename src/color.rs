use image::Rgba;

use crate::error::{ChessgifError, ChessgifResult};

/// Parse a square color given as `#RRGGBB`/`#RRGGBBAA` hex or a named color.
pub fn parse(source: &str) -> ChessgifResult<Rgba<u8>> {
    let s = source.trim();
    if s.is_empty() {
        return Err(ChessgifError::invalid_color("empty color string"));
    }
    if s.starts_with('#') || s.chars().all(|c| c.is_ascii_hexdigit()) {
        return parse_hex(s);
    }
    named(s).ok_or_else(|| {
        ChessgifError::invalid_color(format!(
            "unknown color name \"{s}\" (expected a name or #RRGGBB hex)"
        ))
    })
}

fn parse_hex(s: &str) -> ChessgifResult<Rgba<u8>> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(ChessgifError::invalid_color(format!(
            "non-ascii hex color \"{s}\""
        )));
    }

    fn hex_byte(pair: &str) -> ChessgifResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| ChessgifError::invalid_color(format!("invalid hex byte \"{pair}\"")))
    }

    match s.len() {
        6 => Ok(Rgba([
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ])),
        _ => Err(ChessgifError::invalid_color(
            "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

fn named(s: &str) -> Option<Rgba<u8>> {
    let rgb: [u8; 3] = match s.to_ascii_lowercase().as_str() {
        "white" => [255, 255, 255],
        "black" => [0, 0, 0],
        "red" => [255, 0, 0],
        "green" => [0, 128, 0],
        "blue" => [0, 0, 255],
        "yellow" => [255, 255, 0],
        "orange" => [255, 165, 0],
        "purple" => [128, 0, 128],
        "brown" => [165, 42, 42],
        "pink" => [255, 192, 203],
        "gray" | "grey" => [128, 128, 128],
        "silver" => [192, 192, 192],
        "beige" => [245, 245, 220],
        "tan" => [210, 180, 140],
        "ivory" => [255, 255, 240],
        "navy" => [0, 0, 128],
        "teal" => [0, 128, 128],
        "maroon" => [128, 0, 0],
        "olive" => [128, 128, 0],
        _ => return None,
    };
    Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_and_without_hash() {
        assert_eq!(parse("#f0d9b5").unwrap(), Rgba([0xf0, 0xd9, 0xb5, 255]));
        assert_eq!(parse("B58863").unwrap(), Rgba([0xb5, 0x88, 0x63, 255]));
        assert_eq!(parse("#11223344").unwrap(), Rgba([0x11, 0x22, 0x33, 0x44]));
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        assert_eq!(parse("white").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse("Beige").unwrap(), Rgba([245, 245, 220, 255]));
    }

    #[test]
    fn bad_inputs_are_rejected() {
        for bad in ["", "#f0d9", "#zzzzzz", "no-such-color"] {
            assert!(matches!(parse(bad), Err(ChessgifError::InvalidColor(_))));
        }
    }
}

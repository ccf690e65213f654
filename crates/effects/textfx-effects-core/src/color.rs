//! Hex color adjustment used by the stacked-shadow effects.

/// Lighten (positive `amount`) or darken (negative) a 6-digit hex color,
/// clamping each channel to [0, 255]. The `#` prefix round-trips: it appears
/// on the output iff it was present on the input.
///
/// Input is intentionally not validated; a malformed channel pair reads as 0
/// rather than erroring, so the result for bad input is defined but
/// meaningless. Callers that need validation must do it themselves.
pub fn adjust_color(color: &str, amount: i32) -> String {
    let (prefix, hex) = match color.strip_prefix('#') {
        Some(rest) => ("#", rest),
        None => ("", color),
    };

    let channel = |i: usize| -> i32 {
        hex.get(i..i + 2)
            .and_then(|pair| i32::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    let adjust = |c: i32| (c + amount).clamp(0, 255) as u8;

    format!(
        "{prefix}{:02x}{:02x}{:02x}",
        adjust(channel(0)),
        adjust(channel(2)),
        adjust(channel(4)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_and_clamp() {
        assert_eq!(adjust_color("#000000", 50), "#323232");
        assert_eq!(adjust_color("#ffffff", -300), "#000000");
        assert_eq!(adjust_color("#ffffff", 300), "#ffffff");
    }

    #[test]
    fn prefix_round_trips() {
        assert_eq!(adjust_color("808080", 0), "808080");
        assert_eq!(adjust_color("#808080", 0), "#808080");
    }

    #[test]
    fn malformed_input_does_not_panic() {
        // Unparsable pairs read as channel 0.
        assert_eq!(adjust_color("zzzzzz", 16), "101010");
        assert_eq!(adjust_color("#ab", 0), "#ab0000");
    }
}

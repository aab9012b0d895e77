use tally_style::FontWeight;

/// Maps a font name onto one of the standard PDF families, ignoring case.
pub fn standard_family(name: &str) -> Option<&'static str> {
    match name.trim().to_lowercase().as_str() {
        "helvetica" | "arial" | "sans-serif" => Some("Helvetica"),
        "times" | "times-roman" | "times new roman" | "serif" => Some("Times"),
        "courier" | "courier new" | "monospace" => Some("Courier"),
        _ => None,
    }
}

/// Get the standard PDF font name with a weight suffix
pub fn get_styled_font_name(base_name: &str, weight: FontWeight) -> String {
    match (base_name, weight) {
        ("Times", FontWeight::Regular) => "Times-Roman".to_string(),
        (_, FontWeight::Bold) => format!("{}-Bold", base_name),
        (_, FontWeight::Regular) => base_name.to_string(),
    }
}

/// Encode text for a WinAnsi font; characters outside Latin-1 become '?'.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}

/// Approximate advance width of `text` in a Helvetica face.
///
/// Uses average glyph widths rather than real metrics, which is close enough
/// for column sizing and justification.
pub fn approx_text_width(text: &str, font_size: f32, weight: FontWeight) -> f32 {
    let em = match weight {
        FontWeight::Regular => 0.5,
        FontWeight::Bold => 0.55,
    };
    text.chars().count() as f32 * font_size * em
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styled_font_name() {
        assert_eq!(get_styled_font_name("Helvetica", FontWeight::Bold), "Helvetica-Bold");
        assert_eq!(get_styled_font_name("Helvetica", FontWeight::Regular), "Helvetica");
        assert_eq!(get_styled_font_name("Times", FontWeight::Regular), "Times-Roman");
        assert_eq!(get_styled_font_name("Courier", FontWeight::Bold), "Courier-Bold");
    }

    #[test]
    fn test_standard_family_aliases() {
        assert_eq!(standard_family(" Times New Roman "), Some("Times"));
        assert_eq!(standard_family("COURIER"), Some("Courier"));
        assert_eq!(standard_family("helvetica"), Some("Helvetica"));
        assert_eq!(standard_family("Comic Sans"), None);
    }

    #[test]
    fn test_win_ansi_replaces_wide_chars() {
        assert_eq!(to_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(to_win_ansi("\u{2603}"), vec![b'?']);
    }

    #[test]
    fn test_text_width_scales() {
        assert_eq!(approx_text_width("abcd", 10.0, FontWeight::Regular), 20.0);
        assert!(approx_text_width("abcd", 10.0, FontWeight::Bold) > 20.0);
    }
}

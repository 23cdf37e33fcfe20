//! Text contrast decision for menu colors
//!
//! The owner picks arbitrary background colors; text on top of them is
//! rendered black or white depending on YIQ-weighted luminance.

/// Text color to render over a given background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContrast {
    Black,
    White,
}

impl TextContrast {
    /// Decide the readable text color for a hex background.
    ///
    /// Accepts `#RGB` and `#RRGGBB` (leading `#` optional). This is a
    /// render-path helper: unparseable input falls back to black rather
    /// than failing.
    pub fn for_background(hex: &str) -> Self {
        let Some((r, g, b)) = parse_hex(hex) else {
            tracing::debug!(color = hex, "unparseable background color, defaulting to black");
            return Self::Black;
        };
        // YIQ luma, midpoint threshold
        let yiq = (r * 299 + g * 587 + b * 114) / 1000;
        if yiq >= 128 { Self::Black } else { Self::White }
    }

    /// CSS color keyword
    pub fn css(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

fn parse_hex(hex: &str) -> Option<(u32, u32, u32)> {
    let hex = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |i: usize| {
                u32::from_str_radix(&hex[i..i + 1], 16)
                    .ok()
                    .map(|v| v * 17)
            };
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |i: usize| u32::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_backgrounds_get_black() {
        assert_eq!(TextContrast::for_background("#FFFFFF"), TextContrast::Black);
        assert_eq!(TextContrast::for_background("#F3F4F6"), TextContrast::Black);
        assert_eq!(TextContrast::for_background("#FFD700"), TextContrast::Black);
    }

    #[test]
    fn test_dark_backgrounds_get_white() {
        assert_eq!(TextContrast::for_background("#000000"), TextContrast::White);
        assert_eq!(TextContrast::for_background("#1F2937"), TextContrast::White);
        assert_eq!(TextContrast::for_background("#8B0000"), TextContrast::White);
    }

    #[test]
    fn test_short_form() {
        assert_eq!(TextContrast::for_background("#fff"), TextContrast::Black);
        assert_eq!(TextContrast::for_background("000"), TextContrast::White);
    }

    #[test]
    fn test_invalid_defaults_to_black() {
        assert_eq!(TextContrast::for_background(""), TextContrast::Black);
        assert_eq!(TextContrast::for_background("#12"), TextContrast::Black);
        assert_eq!(TextContrast::for_background("tomato"), TextContrast::Black);
    }

    #[test]
    fn test_css_keyword() {
        assert_eq!(TextContrast::Black.css(), "black");
        assert_eq!(TextContrast::White.css(), "white");
    }
}

//! Color value model and parser
//!
//! Turns raw text tokens into canonicalized color values. Recognizes
//! 3/4/6/8-digit hex notation (optional leading `#`, case-insensitive)
//! and the CSS extended named-keyword set.

use serde::{Deserialize, Serialize};

/// A single parsed color with an optional user-assigned display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorValue {
    /// Canonical identity: uppercase hex with leading `#` (#RRGGBB or #RRGGBBAA).
    /// Stable for the lifetime of the value; never changes on rename.
    pub id: String,

    /// Renderable lowercase hex form
    pub css_value: String,

    /// User-assigned display name (unset until renamed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ColorValue {
    fn from_canonical_hex(upper: String) -> Self {
        let css_value = upper.to_ascii_lowercase();
        Self {
            id: upper,
            css_value,
            name: None,
        }
    }

    /// Name shown in the preview tree and used as the export key:
    /// the user-assigned name if set, otherwise the css value
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) if !name.is_empty() => name,
            _ => &self.css_value,
        }
    }
}

/// A color line that could not be parsed. Carries the original token
/// so callers can log what was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub raw: String,
}

/// Parse one raw color token (already split and trimmed by the caller).
///
/// Pure: same input always yields the same output. Returns the canonical
/// `ColorValue` on success, or a `ParseFailure` carrying the raw token.
pub fn parse_color(raw: &str) -> Result<ColorValue, ParseFailure> {
    if let Some(hex) = parse_hex(raw) {
        return Ok(ColorValue::from_canonical_hex(hex));
    }

    let keyword = raw.to_ascii_lowercase();
    if let Ok(idx) = NAMED_COLORS.binary_search_by(|(name, _)| name.cmp(&keyword.as_str())) {
        return Ok(ColorValue::from_canonical_hex(
            NAMED_COLORS[idx].1.to_string(),
        ));
    }

    Err(ParseFailure {
        raw: raw.to_string(),
    })
}

/// Parse hex notation into the canonical uppercase `#`-prefixed form.
/// 3- and 4-digit shorthand expands by doubling each nibble.
fn parse_hex(raw: &str) -> Option<String> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    Some(format!("#{}", expanded.to_ascii_uppercase()))
}

/// CSS extended color keywords (X11 set plus `rebeccapurple`),
/// sorted by keyword for binary search
const NAMED_COLORS: &[(&str, &str)] = &[
    ("aliceblue", "#F0F8FF"),
    ("antiquewhite", "#FAEBD7"),
    ("aqua", "#00FFFF"),
    ("aquamarine", "#7FFFD4"),
    ("azure", "#F0FFFF"),
    ("beige", "#F5F5DC"),
    ("bisque", "#FFE4C4"),
    ("black", "#000000"),
    ("blanchedalmond", "#FFEBCD"),
    ("blue", "#0000FF"),
    ("blueviolet", "#8A2BE2"),
    ("brown", "#A52A2A"),
    ("burlywood", "#DEB887"),
    ("cadetblue", "#5F9EA0"),
    ("chartreuse", "#7FFF00"),
    ("chocolate", "#D2691E"),
    ("coral", "#FF7F50"),
    ("cornflowerblue", "#6495ED"),
    ("cornsilk", "#FFF8DC"),
    ("crimson", "#DC143C"),
    ("cyan", "#00FFFF"),
    ("darkblue", "#00008B"),
    ("darkcyan", "#008B8B"),
    ("darkgoldenrod", "#B8860B"),
    ("darkgray", "#A9A9A9"),
    ("darkgreen", "#006400"),
    ("darkgrey", "#A9A9A9"),
    ("darkkhaki", "#BDB76B"),
    ("darkmagenta", "#8B008B"),
    ("darkolivegreen", "#556B2F"),
    ("darkorange", "#FF8C00"),
    ("darkorchid", "#9932CC"),
    ("darkred", "#8B0000"),
    ("darksalmon", "#E9967A"),
    ("darkseagreen", "#8FBC8F"),
    ("darkslateblue", "#483D8B"),
    ("darkslategray", "#2F4F4F"),
    ("darkslategrey", "#2F4F4F"),
    ("darkturquoise", "#00CED1"),
    ("darkviolet", "#9400D3"),
    ("deeppink", "#FF1493"),
    ("deepskyblue", "#00BFFF"),
    ("dimgray", "#696969"),
    ("dimgrey", "#696969"),
    ("dodgerblue", "#1E90FF"),
    ("firebrick", "#B22222"),
    ("floralwhite", "#FFFAF0"),
    ("forestgreen", "#228B22"),
    ("fuchsia", "#FF00FF"),
    ("gainsboro", "#DCDCDC"),
    ("ghostwhite", "#F8F8FF"),
    ("gold", "#FFD700"),
    ("goldenrod", "#DAA520"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("greenyellow", "#ADFF2F"),
    ("grey", "#808080"),
    ("honeydew", "#F0FFF0"),
    ("hotpink", "#FF69B4"),
    ("indianred", "#CD5C5C"),
    ("indigo", "#4B0082"),
    ("ivory", "#FFFFF0"),
    ("khaki", "#F0E68C"),
    ("lavender", "#E6E6FA"),
    ("lavenderblush", "#FFF0F5"),
    ("lawngreen", "#7CFC00"),
    ("lemonchiffon", "#FFFACD"),
    ("lightblue", "#ADD8E6"),
    ("lightcoral", "#F08080"),
    ("lightcyan", "#E0FFFF"),
    ("lightgoldenrodyellow", "#FAFAD2"),
    ("lightgray", "#D3D3D3"),
    ("lightgreen", "#90EE90"),
    ("lightgrey", "#D3D3D3"),
    ("lightpink", "#FFB6C1"),
    ("lightsalmon", "#FFA07A"),
    ("lightseagreen", "#20B2AA"),
    ("lightskyblue", "#87CEFA"),
    ("lightslategray", "#778899"),
    ("lightslategrey", "#778899"),
    ("lightsteelblue", "#B0C4DE"),
    ("lightyellow", "#FFFFE0"),
    ("lime", "#00FF00"),
    ("limegreen", "#32CD32"),
    ("linen", "#FAF0E6"),
    ("magenta", "#FF00FF"),
    ("maroon", "#800000"),
    ("mediumaquamarine", "#66CDAA"),
    ("mediumblue", "#0000CD"),
    ("mediumorchid", "#BA55D3"),
    ("mediumpurple", "#9370DB"),
    ("mediumseagreen", "#3CB371"),
    ("mediumslateblue", "#7B68EE"),
    ("mediumspringgreen", "#00FA9A"),
    ("mediumturquoise", "#48D1CC"),
    ("mediumvioletred", "#C71585"),
    ("midnightblue", "#191970"),
    ("mintcream", "#F5FFFA"),
    ("mistyrose", "#FFE4E1"),
    ("moccasin", "#FFE4B5"),
    ("navajowhite", "#FFDEAD"),
    ("navy", "#000080"),
    ("oldlace", "#FDF5E6"),
    ("olive", "#808000"),
    ("olivedrab", "#6B8E23"),
    ("orange", "#FFA500"),
    ("orangered", "#FF4500"),
    ("orchid", "#DA70D6"),
    ("palegoldenrod", "#EEE8AA"),
    ("palegreen", "#98FB98"),
    ("paleturquoise", "#AFEEEE"),
    ("palevioletred", "#DB7093"),
    ("papayawhip", "#FFEFD5"),
    ("peachpuff", "#FFDAB9"),
    ("peru", "#CD853F"),
    ("pink", "#FFC0CB"),
    ("plum", "#DDA0DD"),
    ("powderblue", "#B0E0E6"),
    ("purple", "#800080"),
    ("rebeccapurple", "#663399"),
    ("red", "#FF0000"),
    ("rosybrown", "#BC8F8F"),
    ("royalblue", "#4169E1"),
    ("saddlebrown", "#8B4513"),
    ("salmon", "#FA8072"),
    ("sandybrown", "#F4A460"),
    ("seagreen", "#2E8B57"),
    ("seashell", "#FFF5EE"),
    ("sienna", "#A0522D"),
    ("silver", "#C0C0C0"),
    ("skyblue", "#87CEEB"),
    ("slateblue", "#6A5ACD"),
    ("slategray", "#708090"),
    ("slategrey", "#708090"),
    ("snow", "#FFFAFA"),
    ("springgreen", "#00FF7F"),
    ("steelblue", "#4682B4"),
    ("tan", "#D2B48C"),
    ("teal", "#008080"),
    ("thistle", "#D8BFD8"),
    ("tomato", "#FF6347"),
    ("turquoise", "#40E0D0"),
    ("violet", "#EE82EE"),
    ("wheat", "#F5DEB3"),
    ("white", "#FFFFFF"),
    ("whitesmoke", "#F5F5F5"),
    ("yellow", "#FFFF00"),
    ("yellowgreen", "#9ACD32"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit_hex() {
        let color = parse_color("#64ffda").unwrap();
        assert_eq!(color.id, "#64FFDA");
        assert_eq!(color.css_value, "#64ffda");
        assert_eq!(color.name, None);
    }

    #[test]
    fn test_hex_without_hash() {
        let color = parse_color("A5D6A7").unwrap();
        assert_eq!(color.id, "#A5D6A7");
        assert_eq!(color.css_value, "#a5d6a7");
    }

    #[test]
    fn test_shorthand_expands_by_nibble_doubling() {
        assert_eq!(parse_color("#fff").unwrap().id, "#FFFFFF");
        assert_eq!(parse_color("#f0c").unwrap().id, "#FF00CC");
        // 4-digit shorthand carries alpha
        assert_eq!(parse_color("#f0c8").unwrap().id, "#FF00CC88");
    }

    #[test]
    fn test_eight_digit_hex_keeps_alpha() {
        let color = parse_color("#64FFDA80").unwrap();
        assert_eq!(color.id, "#64FFDA80");
        assert_eq!(color.css_value, "#64ffda80");
    }

    #[test]
    fn test_case_insensitive_canonicalization() {
        // Differently-cased forms of the same value share one id
        assert_eq!(
            parse_color("#fff").unwrap().id,
            parse_color("#FFF").unwrap().id
        );
        assert_eq!(
            parse_color("#a5d6a7").unwrap().id,
            parse_color("A5D6A7").unwrap().id
        );
    }

    #[test]
    fn test_named_keywords() {
        assert_eq!(parse_color("red").unwrap().id, "#FF0000");
        assert_eq!(parse_color("Red").unwrap().id, "#FF0000");
        assert_eq!(parse_color("rebeccapurple").unwrap().id, "#663399");
        assert_eq!(parse_color("snow").unwrap().css_value, "#fffafa");
    }

    #[test]
    fn test_named_color_table_is_sorted() {
        // binary_search depends on this
        for pair in NAMED_COLORS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} >= {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_invalid_tokens_fail_with_raw() {
        for raw in ["", "#12345", "notacolor", "#ggg", "transparent"] {
            let failure = parse_color(raw).unwrap_err();
            assert_eq!(failure.raw, raw);
        }
    }

    #[test]
    fn test_display_name_falls_back_to_css_value() {
        let mut color = parse_color("#64FFDA").unwrap();
        assert_eq!(color.display_name(), "#64ffda");
        color.name = Some("teal-accent".to_string());
        assert_eq!(color.display_name(), "teal-accent");
    }
}

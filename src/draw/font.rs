//! Font descriptor and Pango layout helpers for text shapes.

use serde::{Deserialize, Serialize};

/// Font configuration for text shapes.
///
/// Stored on every [`TextShape`](super::shape::TextShape) so a persisted
/// drawing re-renders with the font it was authored with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "JetBrains Mono")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Style Weight Size"
    /// Example: "Sans Bold 32" or "Monospace Italic 24"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }

    /// Builds a Pango layout for `text` bound to `ctx`.
    pub(crate) fn layout(&self, ctx: &cairo::Context, text: &str, size: f64) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(ctx);
        let font_desc = pango::FontDescription::from_string(&self.to_pango_string(size));
        layout.set_font_description(Some(&font_desc));
        layout.set_text(text);
        layout
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pango_string_omits_normal_parts() {
        let font = FontDescriptor::default();
        assert_eq!(font.to_pango_string(32.0), "Sans 32");
    }

    #[test]
    fn pango_string_includes_style_and_weight() {
        let font = FontDescriptor::new(
            "JetBrains Mono".to_string(),
            "bold".to_string(),
            "italic".to_string(),
        );
        assert_eq!(font.to_pango_string(15.6), "JetBrains Mono Italic Bold 16");
    }
}

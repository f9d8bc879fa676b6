//! Art styles and the instruction text sent to the image model.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of refinement styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Pencil,
    Charcoal,
    Watercolor,
    Oil,
    Digital,
    Minimalist,
}

impl Style {
    /// Every style, in the order they are offered to the user.
    pub const ALL: [Style; 6] = [
        Style::Pencil,
        Style::Charcoal,
        Style::Watercolor,
        Style::Oil,
        Style::Digital,
        Style::Minimalist,
    ];

    /// Looks up a style by identifier (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(name))
    }

    /// Like [`Style::from_name`], but unknown identifiers fall back to pencil.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!("Unknown style '{}', falling back to pencil", name);
            Style::default()
        })
    }

    /// Resolves a list of style names, dropping repeats but keeping the
    /// order of first appearance.
    pub fn resolve_all<S: AsRef<str>>(names: &[S]) -> Vec<Self> {
        let mut styles = Vec::with_capacity(names.len());
        for name in names {
            let style = Self::resolve(name.as_ref());
            if !styles.contains(&style) {
                styles.push(style);
            }
        }
        styles
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Pencil => "pencil",
            Style::Charcoal => "charcoal",
            Style::Watercolor => "watercolor",
            Style::Oil => "oil",
            Style::Digital => "digital",
            Style::Minimalist => "minimalist",
        }
    }

    /// Descriptive prompt fragment for this style.
    pub fn prompt_fragment(self) -> &'static str {
        match self {
            Style::Pencil => {
                "Convert this rough sketch into a professional, high-quality, detailed pencil sketch. \
                 Maintain the original composition and subject matter but enhance the artistic \
                 quality, shading, and detail. Make it look like it was drawn by a master artist."
            }
            Style::Charcoal => {
                "Convert this rough sketch into an expressive charcoal drawing on textured paper. \
                 Keep the original composition and subject matter, with bold strokes, deep blacks, \
                 and soft smudged shading."
            }
            Style::Watercolor => {
                "Convert this rough sketch into a delicate watercolor painting. Keep the original \
                 composition and subject matter, using soft washes of color, gentle gradients, and \
                 visible paper texture."
            }
            Style::Oil => {
                "Convert this rough sketch into a rich oil painting. Keep the original composition \
                 and subject matter, with visible brushwork, deep saturated colors, and dramatic \
                 lighting."
            }
            Style::Digital => {
                "Convert this rough sketch into polished digital art. Keep the original composition \
                 and subject matter, with clean line work, vibrant colors, and smooth professional \
                 rendering."
            }
            Style::Minimalist => {
                "Convert this rough sketch into a clean minimalist line drawing. Keep the original \
                 composition and subject matter, using as few confident lines as possible on a \
                 plain white background."
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the instruction for `style`, appending `details` when it has content.
pub fn build_instruction(style: Style, details: Option<&str>) -> String {
    let mut instruction = style.prompt_fragment().to_string();
    if let Some(details) = details.map(str::trim).filter(|d| !d.is_empty()) {
        instruction.push_str("\n\nAdditional instructions from user: ");
        instruction.push_str(details);
    }
    instruction
}

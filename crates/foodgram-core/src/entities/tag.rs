//! Tag entity - a labelled colour used to group recipes

use crate::value_objects::Snowflake;

/// Colour assigned when none is given
pub const DEFAULT_TAG_COLOR: &str = "#ffffff";

/// Recipe tag (breakfast, dinner, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: Snowflake,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl Tag {
    pub fn new(id: Snowflake, name: String, color: Option<String>, slug: String) -> Self {
        Self {
            id,
            name,
            color: color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string()),
            slug,
        }
    }

    /// Check a `#rrggbb` colour value
    pub fn is_valid_color(color: &str) -> bool {
        color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

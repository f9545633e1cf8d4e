//! Shopping list export
//!
//! [`layout_shopping_list`] places the aggregated lines on A4 pages and
//! [`render_pdf`] turns the pages into a PDF with an embedded TrueType font.

mod layout;
mod pdf;

pub use layout::{
    layout_shopping_list, LineKind, PageLayout, TextLine, FOOTER_LINES, ITEMS_PER_PAGE, TITLE,
};
pub use pdf::{render_pdf, FontSource};

/// File name the PDF is offered under
pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.pdf";

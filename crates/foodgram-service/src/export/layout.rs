//! Page layout of the shopping list, in PDF points

use foodgram_core::AggregatedIngredient;

/// A4 width
pub const PAGE_WIDTH: f32 = 595.0;
/// A4 height
pub const PAGE_HEIGHT: f32 = 842.0;

const MARGIN_X: f32 = 20.0;

pub const TITLE: &str = "Для ваших рецептов нужно купить:";
const TITLE_SIZE: f32 = 20.0;
const TITLE_Y: f32 = 800.0;

const ITEM_SIZE: f32 = 14.0;
const FIRST_ITEM_Y: f32 = 750.0;
const ITEM_STEP: f32 = 20.0;
/// Lowest baseline an item may use
const MIN_ITEM_Y: f32 = 70.0;

/// Number of item lines that fit on one page
pub const ITEMS_PER_PAGE: usize = ((FIRST_ITEM_Y - MIN_ITEM_Y) / ITEM_STEP) as usize + 1;

const FOOTER_SIZE: f32 = 10.0;
/// Footer text with its baseline
pub const FOOTER_LINES: [(&str, f32); 2] = [("Foodgram, 2022", 40.0), ("All rights reserved", 25.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Item,
    Footer,
}

/// One positioned line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub kind: LineKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl TextLine {
    fn new(kind: LineKind, text: impl Into<String>, y: f32, size: f32) -> Self {
        Self {
            kind,
            text: text.into(),
            x: MARGIN_X,
            y,
            size,
        }
    }
}

/// Text lines of one page, in drawing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub lines: Vec<TextLine>,
}

impl PageLayout {
    fn with_items(items: &[AggregatedIngredient]) -> Self {
        let mut lines = Vec::with_capacity(items.len() + 3);
        lines.push(TextLine::new(LineKind::Title, TITLE, TITLE_Y, TITLE_SIZE));

        let mut y = FIRST_ITEM_Y;
        for item in items {
            lines.push(TextLine::new(LineKind::Item, item.to_string(), y, ITEM_SIZE));
            y -= ITEM_STEP;
        }

        lines.extend(
            FOOTER_LINES
                .iter()
                .map(|(text, y)| TextLine::new(LineKind::Footer, *text, *y, FOOTER_SIZE)),
        );
        Self { lines }
    }

    /// Item lines only, without title and footer
    pub fn items(&self) -> impl Iterator<Item = &TextLine> {
        self.lines.iter().filter(|line| line.kind == LineKind::Item)
    }
}

/// Lay out the aggregated ingredients. Always returns at least one page.
pub fn layout_shopping_list(items: &[AggregatedIngredient]) -> Vec<PageLayout> {
    if items.is_empty() {
        return vec![PageLayout::with_items(&[])];
    }
    items
        .chunks(ITEMS_PER_PAGE)
        .map(PageLayout::with_items)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> AggregatedIngredient {
        AggregatedIngredient {
            name: format!("ингредиент {n}"),
            amount: n as i64,
            measurement_unit: "г".to_string(),
        }
    }

    fn items(count: usize) -> Vec<AggregatedIngredient> {
        (1..=count).map(item).collect()
    }

    fn texts(page: &PageLayout) -> Vec<&str> {
        page.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_empty_list_has_title_and_footer() {
        let pages = layout_shopping_list(&[]);
        assert_eq!(pages.len(), 1);
        assert_eq!(
            texts(&pages[0]),
            vec![TITLE, "Foodgram, 2022", "All rights reserved"]
        );
    }

    #[test]
    fn test_one_line_per_ingredient_in_order() {
        let list = vec![
            AggregatedIngredient {
                name: "говядина".to_string(),
                amount: 700,
                measurement_unit: "г".to_string(),
            },
            AggregatedIngredient {
                name: "лук репчатый".to_string(),
                amount: 2,
                measurement_unit: "шт.".to_string(),
            },
        ];
        let pages = layout_shopping_list(&list);
        let lines: Vec<_> = pages[0].items().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "говядина: 700 г");
        assert_eq!(lines[1].text, "лук репчатый: 2 шт.");
        assert_eq!(lines[0].y, 750.0);
        assert_eq!(lines[1].y, 730.0);
        assert!(lines.iter().all(|l| l.x == 20.0));
    }

    #[test]
    fn test_page_capacity() {
        assert_eq!(ITEMS_PER_PAGE, 35);

        let full = layout_shopping_list(&items(35));
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].items().last().unwrap().y, 70.0);

        let overflow = layout_shopping_list(&items(36));
        assert_eq!(overflow.len(), 2);
        let second: Vec<_> = overflow[1].items().collect();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].text, "ингредиент 36: 36 г");
        assert_eq!(second[0].y, 750.0);
    }

    #[test]
    fn test_every_page_has_title_and_footer() {
        for page in layout_shopping_list(&items(80)) {
            let texts = texts(&page);
            assert_eq!(texts[0], TITLE);
            assert!(texts.ends_with(&["Foodgram, 2022", "All rights reserved"]));
        }
    }

    #[test]
    fn test_items_stay_above_footer() {
        for page in layout_shopping_list(&items(100)) {
            assert!(page.items().all(|l| l.y >= MIN_ITEM_Y));
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let list = items(40);
        assert_eq!(layout_shopping_list(&list), layout_shopping_list(&list));
    }
}

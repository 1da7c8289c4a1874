//! Layout strategies: carousel slot selection, list pagination, rendering.

use core::ops::Range;

use heapless::String;
use platform::config::{
    CAROUSEL_VISIBLE_COUNT, GLYPH_WIDTH, ICON_SIZE, LIST_ITEMS_PER_PAGE, TEXT_LINES,
};
use platform::{centered_x, line_y, Display, ProgressBar};

use crate::error::MenuError;
use crate::node::{Content, MenuNode, NodeKind};
use crate::pool::NodePool;

/// Left edges of the left, center and right carousel slots.
pub const CAROUSEL_SLOT_X: [i32; 3] = [0, 48, 96];

/// Top edge of the carousel icons.
pub const CAROUSEL_Y: i32 = 16;

/// Bytes kept of a list row, marker included.
pub const LIST_ROW_LEN: usize = 24;

/// Text line holding the centred label of the carousel's center item.
pub const CAROUSEL_LABEL_LINE: u8 = 3;

/// Rendering parameters of the active node's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutConfig {
    /// Icon carousel.
    Carousel {
        /// Items drawn at once.
        visible_count: u8,
    },
    /// Paginated list.
    List {
        /// Rows per page.
        items_per_page: u8,
    },
    /// Page-drawn.
    Custom,
}

impl LayoutConfig {
    /// Defaults for `kind`.
    #[must_use]
    pub const fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::HorizontalIconCarousel => Self::Carousel {
                visible_count: CAROUSEL_VISIBLE_COUNT,
            },
            NodeKind::VerticalList => Self::List {
                items_per_page: LIST_ITEMS_PER_PAGE,
            },
            NodeKind::Custom => Self::Custom,
        }
    }

    /// Rows per page, or 1 for layouts that do not paginate.
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        match self {
            Self::List { items_per_page } if *items_per_page > 0 => *items_per_page as usize,
            _ => 1,
        }
    }
}

/// Page bookkeeping of a vertical list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pagination {
    /// Page showing the selection.
    pub current_page: usize,
    /// `ceil(items / items_per_page)`.
    pub total_pages: usize,
    /// Rows per page, at least 1.
    pub items_per_page: usize,
}

impl Pagination {
    /// Page 0 of an empty list.
    #[must_use]
    pub const fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 0,
            total_pages: 0,
            items_per_page: if items_per_page == 0 { 1 } else { items_per_page },
        }
    }

    /// Recompute the page count and move to the page holding `selected`
    /// if it is not on the current one.
    pub fn update(&mut self, item_count: usize, selected: usize) {
        self.total_pages = item_count.div_ceil(self.items_per_page);
        if !self.page_range(item_count).contains(&selected) {
            self.current_page = selected / self.items_per_page;
        }
    }

    /// Index of the first item on the current page.
    #[must_use]
    pub const fn page_start(&self) -> usize {
        self.current_page.saturating_mul(self.items_per_page)
    }

    /// Item indices shown on the current page.
    #[must_use]
    pub fn page_range(&self, item_count: usize) -> Range<usize> {
        let start = self.page_start().min(item_count);
        let end = start.saturating_add(self.items_per_page).min(item_count);
        start..end
    }
}

/// Child indices shown by a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CarouselSlots {
    /// Previous item, wrapping.
    pub left: Option<usize>,
    /// Selected item.
    pub center: usize,
    /// Next item, wrapping.
    pub right: Option<usize>,
}

/// Choose carousel slots for `count` items around `selected`.
///
/// With one item only the center is shown. With two the other item is shown
/// on the right only, so no item is drawn twice.
#[must_use]
pub fn carousel_slots(selected: usize, count: usize) -> Option<CarouselSlots> {
    if count == 0 {
        return None;
    }
    let center = selected % count;
    let next = center.saturating_add(1) % count;
    let prev = center.checked_sub(1).unwrap_or(count.saturating_sub(1));
    Some(match count {
        1 => CarouselSlots {
            left: None,
            center,
            right: None,
        },
        2 => CarouselSlots {
            left: None,
            center,
            right: Some(next),
        },
        _ => CarouselSlots {
            left: Some(prev),
            center,
            right: Some(next),
        },
    })
}

/// Index after `selected`, wrapping to 0.
#[must_use]
pub fn wrap_next(selected: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        selected.saturating_add(1) % count
    }
}

/// Index before `selected`, wrapping to the last item.
#[must_use]
pub fn wrap_prev(selected: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        selected.min(count).checked_sub(1).unwrap_or(count.saturating_sub(1))
    }
}

pub(crate) fn render_carousel<E, const N: usize>(
    pool: &NodePool<'_, E, N>,
    node: &MenuNode<'_, E>,
    display: &mut dyn Display,
) -> Result<(), MenuError> {
    display.clear();
    if let Some(slots) = carousel_slots(node.selected_index(), node.children().len()) {
        let placed = [
            (slots.left, CAROUSEL_SLOT_X[0], true),
            (Some(slots.center), CAROUSEL_SLOT_X[1], false),
            (slots.right, CAROUSEL_SLOT_X[2], true),
        ];
        for (index, x, inverted) in placed {
            let Some(child) = index.and_then(|i| node.children().get(i)) else {
                continue;
            };
            draw_carousel_item(pool.get(*child)?, x, inverted, display);
        }
        if let Some(center) = node.selected_child() {
            let label = pool.get(center)?.label();
            let x = centered_x(label.chars().count(), GLYPH_WIDTH);
            display.clear_line(CAROUSEL_LABEL_LINE);
            display.draw_text(x, line_y(CAROUSEL_LABEL_LINE), label);
        }
    }
    display.present();
    Ok(())
}

fn draw_carousel_item<E>(
    item: &MenuNode<'_, E>,
    x: i32,
    inverted: bool,
    display: &mut dyn Display,
) {
    match item.content().icon() {
        Some(icon) => {
            display.draw_bitmap(x, CAROUSEL_Y, icon.width, icon.height, icon.data, inverted);
        }
        None => {
            // No icon: the initial in a framed box the size of an icon.
            display.draw_progress_bar(&ProgressBar {
                x,
                y: CAROUSEL_Y,
                width: ICON_SIZE,
                height: ICON_SIZE,
                value: 0,
                min: 0,
                max: 1,
            });
            let mut initial: String<4> = String::new();
            if let Some(c) = item.label().chars().next() {
                let _ = initial.push(c);
            }
            let half = i32::try_from(ICON_SIZE / 2).unwrap_or(0);
            display.draw_text(
                x.saturating_add(half).saturating_sub(3),
                CAROUSEL_Y.saturating_add(half).saturating_sub(5),
                &initial,
            );
        }
    }
}

/// `"> text"` or `"  text"`, cut on a char boundary when the text is too long.
fn list_row(marker: char, text: &str) -> String<LIST_ROW_LEN> {
    let mut row = String::new();
    for c in [marker, ' '].into_iter().chain(text.chars()) {
        if row.push(c).is_err() {
            break;
        }
    }
    row
}

pub(crate) fn render_list<E, const N: usize>(
    pool: &NodePool<'_, E, N>,
    node: &MenuNode<'_, E>,
    pagination: &Pagination,
    display: &mut dyn Display,
) -> Result<(), MenuError> {
    let range = pagination.page_range(node.children().len());
    let mut line: u8 = 0;
    for index in range {
        let Some(&child) = node.children().get(index) else {
            break;
        };
        let item = pool.get(child)?;
        let marker = if index == node.selected_index() { '>' } else { ' ' };
        let text = match item.content() {
            Content::Text(text) => *text,
            _ => item.label(),
        };
        display.print_line(line, &list_row(marker, text));
        line = line.saturating_add(1);
    }
    let rows = u8::try_from(pagination.items_per_page)
        .unwrap_or(TEXT_LINES)
        .min(TEXT_LINES);
    while line < rows {
        display.clear_line(line);
        line = line.saturating_add(1);
    }
    display.present_dirty();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults_per_kind() {
        assert_eq!(
            LayoutConfig::for_kind(NodeKind::HorizontalIconCarousel),
            LayoutConfig::Carousel { visible_count: 3 }
        );
        assert_eq!(LayoutConfig::for_kind(NodeKind::VerticalList).items_per_page(), 4);
        assert_eq!(LayoutConfig::for_kind(NodeKind::Custom).items_per_page(), 1);
    }

    #[test]
    fn pagination_follows_selection() {
        let mut p = Pagination::new(4);
        p.update(10, 7);
        assert_eq!((p.current_page, p.total_pages), (1, 3));
        p.update(10, 5);
        assert_eq!(p.current_page, 1, "still on the same page");
        p.update(10, 9);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.page_range(10), 8..10);
        p.update(10, 0);
        assert_eq!(p.current_page, 0);
    }

    #[test]
    fn zero_items_per_page_is_treated_as_one() {
        let mut p = Pagination::new(0);
        p.update(3, 2);
        assert_eq!((p.current_page, p.total_pages), (2, 3));
    }

    #[test]
    fn carousel_slots_wrap() {
        assert_eq!(
            carousel_slots(0, 5),
            Some(CarouselSlots {
                left: Some(4),
                center: 0,
                right: Some(1)
            })
        );
        assert_eq!(carousel_slots(4, 5).map(|s| s.right), Some(Some(0)));
        assert_eq!(carousel_slots(0, 0), None);
    }

    #[test]
    fn small_carousels_do_not_repeat_items() {
        let one = carousel_slots(0, 1).unwrap();
        assert_eq!((one.left, one.center, one.right), (None, 0, None));
        let two = carousel_slots(1, 2).unwrap();
        assert_eq!((two.left, two.center, two.right), (None, 1, Some(0)));
    }

    #[test]
    fn wrap_helpers() {
        assert_eq!(wrap_prev(0, 3), 2);
        assert_eq!(wrap_next(2, 3), 0);
        assert_eq!(wrap_prev(0, 0), 0);
        assert_eq!(wrap_next(0, 0), 0);
    }
}

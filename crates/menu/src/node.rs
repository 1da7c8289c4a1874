//! Menu tree element types.

use heapless::{String, Vec};
use platform::config::{ICON_SIZE, LINE_HEIGHT, MAX_CHILDREN, MAX_LABEL_LEN, SCREEN_WIDTH};

use crate::behavior::PageBehavior;

/// Handle to a node in a [`NodePool`](crate::pool::NodePool).
///
/// The generation makes handles to freed slots detectable: once a node is
/// deleted every copy of its id fails with
/// [`MenuError::StaleNode`](crate::MenuError::StaleNode), even after the slot
/// is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeId {
    index: u16,
    generation: u16,
}

impl NodeId {
    pub(crate) const fn new(index: u16, generation: u16) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the pool.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) const fn generation(self) -> u16 {
        self.generation
    }
}

/// Rendering and default key-handling strategy of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeKind {
    /// Three-slot icon carousel over the children.
    HorizontalIconCarousel,
    /// Paginated text list over the children.
    VerticalList,
    /// Drawn entirely by the node's [`PageBehavior`].
    Custom,
}

/// Monochrome bitmap (1 bpp, row-major, MSB first, rows byte-padded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data.
    pub data: &'static [u8],
}

impl Icon {
    /// Square icon of the standard carousel size.
    #[must_use]
    pub const fn square(data: &'static [u8]) -> Self {
        Self {
            width: ICON_SIZE,
            height: ICON_SIZE,
            data,
        }
    }
}

/// Kind-dependent payload of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Content {
    /// Nothing to show besides the label.
    #[default]
    Empty,
    /// Carousel icon.
    Icon(Icon),
    /// Text shown instead of the label in a list row.
    Text(&'static str),
    /// Page drawn by its behavior; the optional icon represents it in a carousel.
    Custom {
        /// Icon used when the page appears as a carousel item.
        icon: Option<Icon>,
    },
}

impl Content {
    /// Icon to use when this node is a carousel item.
    #[must_use]
    pub const fn icon(&self) -> Option<&Icon> {
        match self {
            Self::Icon(icon) | Self::Custom { icon: Some(icon) } => Some(icon),
            _ => None,
        }
    }
}

/// Position and size on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Geometry {
    /// Default geometry: icon-sized for carousels, one text line otherwise.
    #[must_use]
    pub const fn default_for(kind: NodeKind) -> Self {
        let (width, height) = match kind {
            NodeKind::HorizontalIconCarousel => (ICON_SIZE, ICON_SIZE),
            NodeKind::VerticalList | NodeKind::Custom => (SCREEN_WIDTH, LINE_HEIGHT),
        };
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Independent state bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeFlags {
    /// Currently the selected child of its parent.
    pub selected: bool,
    /// Drawn when its parent is rendered.
    pub visible: bool,
    /// Reacts to input.
    pub enabled: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            selected: false,
            visible: true,
            enabled: true,
        }
    }
}

/// Bounded display name.
pub type Label = String<MAX_LABEL_LEN>;

/// Copy `text` into a [`Label`], cutting at the last char boundary that fits.
#[must_use]
pub fn make_label(text: &str) -> Label {
    let mut label = Label::new();
    for c in text.chars() {
        if label.push(c).is_err() {
            break;
        }
    }
    label
}

/// One element of the menu tree.
pub struct MenuNode<'a, E> {
    pub(crate) kind: NodeKind,
    pub(crate) label: Label,
    pub(crate) content: Content,
    pub(crate) geometry: Geometry,
    pub(crate) flags: NodeFlags,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId, MAX_CHILDREN>,
    pub(crate) selected: usize,
    pub(crate) behavior: Option<&'a mut (dyn PageBehavior<E> + 'a)>,
}

impl<'a, E> MenuNode<'a, E> {
    pub(crate) fn new(label: &str, kind: NodeKind, content: Content) -> Self {
        Self {
            kind,
            label: make_label(label),
            content,
            geometry: Geometry::default_for(kind),
            flags: NodeFlags::default(),
            parent: None,
            children: Vec::new(),
            selected: 0,
            behavior: None,
        }
    }

    /// Rendering strategy.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Payload.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Position and size.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// State bits.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Non-owning back-reference to the parent.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Owned children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Index of the selected child. Always `< children().len()` when there
    /// are children, 0 otherwise.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected child, if any.
    pub fn selected_child(&self) -> Option<NodeId> {
        self.children.get(self.selected).copied()
    }

    /// Whether a page behavior is attached.
    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_truncate_on_char_boundary() {
        let label = make_label("Temperature and Humidity");
        assert_eq!(label.as_str(), "Temperature and ");
        // 'é' is two bytes and would straddle the 16-byte limit.
        let label = make_label("abcdefghijklmnoé");
        assert_eq!(label.as_str(), "abcdefghijklmno");
    }

    #[test]
    fn default_geometry_by_kind() {
        let g = Geometry::default_for(NodeKind::HorizontalIconCarousel);
        assert_eq!((g.width, g.height), (32, 32));
        let g = Geometry::default_for(NodeKind::VerticalList);
        assert_eq!((g.width, g.height), (128, 16));
        let g = Geometry::default_for(NodeKind::Custom);
        assert_eq!((g.width, g.height), (128, 16));
    }

    #[test]
    fn content_icon_lookup() {
        static DATA: [u8; 128] = [0; 128];
        let icon = Icon::square(&DATA);
        assert_eq!(Content::Icon(icon).icon(), Some(&icon));
        assert_eq!(Content::Custom { icon: Some(icon) }.icon(), Some(&icon));
        assert_eq!(Content::Custom { icon: None }.icon(), None);
        assert_eq!(Content::Text("x").icon(), None);
    }
}

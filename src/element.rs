// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cell::RefCell;
use std::rc::Rc;

/// Shared handle to an element, held by its binding and by the group it belongs to
pub type ElementRef<E> = Rc<RefCell<E>>;

/// Wrap an element into an [`ElementRef`]
pub fn element_ref<E>(element: E) -> ElementRef<E> {
    Rc::new(RefCell::new(element))
}

/// How text behaves when it reaches the right edge of its container
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WhiteSpace {
    /// Wrap at word boundaries
    #[default]
    Normal,
    /// Keep everything on one line, overflowing if needed
    NoWrap,
}

/// Which box the reported container size describes
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BoxSizing {
    /// Reported size is already the content box
    #[default]
    ContentBox,
    /// Reported size includes padding and border
    BorderBox,
}

/// Edge sizes in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Box geometry of the element's parent, as the host computed it
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerBox {
    pub width: f32,
    pub height: f32,
    pub padding: Insets,
    pub border: Insets,
    pub box_sizing: BoxSizing,
}

impl ContainerBox {
    /// Content box sized container without padding or border
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn border(mut self, border: Insets) -> Self {
        self.border = border;
        self
    }

    pub fn box_sizing(mut self, box_sizing: BoxSizing) -> Self {
        self.box_sizing = box_sizing;
        self
    }

    /// Width and height available to the content, never negative
    pub fn content_size(&self) -> (f32, f32) {
        match self.box_sizing {
            BoxSizing::ContentBox => (self.width.max(0.0), self.height.max(0.0)),
            BoxSizing::BorderBox => (
                (self.width - self.padding.horizontal() - self.border.horizontal()).max(0.0),
                (self.height - self.padding.vertical() - self.border.vertical()).max(0.0),
            ),
        }
    }
}

/// Rendered size of an element at its currently applied font size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderedSize {
    /// Width including any overflowing content
    pub scroll_width: f32,
    pub offset_height: f32,
}

impl RenderedSize {
    pub const ZERO: Self = Self {
        scroll_width: 0.0,
        offset_height: 0.0,
    };

    pub fn new(scroll_width: f32, offset_height: f32) -> Self {
        Self {
            scroll_width,
            offset_height,
        }
    }

    /// Either dimension collapsed, so the element is not laid out
    pub fn is_empty(&self) -> bool {
        self.scroll_width <= 0.0 || self.offset_height <= 0.0
    }
}

/// An element whose font size can be probed against its container.
///
/// Measurement takes `&mut self` because backends usually shape and lay out
/// lazily on first read after a change.
pub trait MeasurableElement {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: &str);

    /// Currently applied font size in pixels, if any was applied
    fn font_size(&self) -> Option<f32>;

    fn set_font_size(&mut self, px: f32);

    fn set_white_space(&mut self, white_space: WhiteSpace);

    fn rendered_size(&mut self) -> RenderedSize;

    fn container(&self) -> ContainerBox;
}

impl<E: MeasurableElement + ?Sized> MeasurableElement for Box<E> {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn set_text(&mut self, text: &str) {
        (**self).set_text(text);
    }

    fn font_size(&self) -> Option<f32> {
        (**self).font_size()
    }

    fn set_font_size(&mut self, px: f32) {
        (**self).set_font_size(px);
    }

    fn set_white_space(&mut self, white_space: WhiteSpace) {
        (**self).set_white_space(white_space);
    }

    fn rendered_size(&mut self) -> RenderedSize {
        (**self).rendered_size()
    }

    fn container(&self) -> ContainerBox {
        (**self).container()
    }
}

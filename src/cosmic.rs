// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Wrap};

use crate::{ContainerBox, MeasurableElement, RenderedSize, WhiteSpace};

/// A [`MeasurableElement`] laid out with `cosmic-text`.
///
/// All text boxes of a window usually share one [`FontSystem`].
pub struct TextBox {
    font_system: Rc<RefCell<FontSystem>>,
    buffer: Buffer,
    text: String,
    family: Option<String>,
    font_size: Option<f32>,
    line_height: f32,
    white_space: WhiteSpace,
    container: ContainerBox,
    visible: bool,
    measured: Option<RenderedSize>,
}

impl TextBox {
    /// Font size used for layout until a size is applied
    pub const DEFAULT_FONT_SIZE: f32 = 16.0;

    pub fn new(font_system: Rc<RefCell<FontSystem>>, container: ContainerBox) -> Self {
        let buffer = Buffer::new(
            &mut font_system.borrow_mut(),
            Metrics::new(Self::DEFAULT_FONT_SIZE, Self::DEFAULT_FONT_SIZE * 1.2),
        );
        Self {
            font_system,
            buffer,
            text: String::new(),
            family: None,
            font_size: None,
            line_height: 1.2,
            white_space: WhiteSpace::Normal,
            container,
            visible: true,
            measured: None,
        }
    }

    /// Use the font family with this name instead of the default sans-serif
    pub fn family(mut self, name: impl Into<String>) -> Self {
        self.family = Some(name.into());
        self.measured = None;
        self
    }

    /// Line height as a multiple of the font size
    pub fn line_height(mut self, scale: f32) -> Self {
        self.line_height = scale;
        self.measured = None;
        self
    }

    pub fn set_container(&mut self, container: ContainerBox) {
        self.container = container;
        self.measured = None;
    }

    /// A hidden text box reports no rendered size
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn white_space(&self) -> WhiteSpace {
        self.white_space
    }

    fn layout(&mut self) -> RenderedSize {
        let font_size = self.font_size.unwrap_or(Self::DEFAULT_FONT_SIZE);
        let (content_width, _) = self.container.content_size();
        let attrs = match &self.family {
            Some(name) => Attrs::new().family(Family::Name(name)),
            None => Attrs::new(),
        };

        let mut font_system = self.font_system.borrow_mut();
        let font_system = &mut *font_system;
        self.buffer.set_metrics(
            font_system,
            Metrics::new(font_size, font_size * self.line_height),
        );
        self.buffer.set_wrap(
            font_system,
            match self.white_space {
                WhiteSpace::Normal => Wrap::WordOrGlyph,
                WhiteSpace::NoWrap => Wrap::None,
            },
        );
        self.buffer.set_size(font_system, Some(content_width), None);
        self.buffer
            .set_text(font_system, &self.text, &attrs, Shaping::Advanced, None);
        self.buffer.shape_until_scroll(font_system, false);

        let (width, height) = self
            .buffer
            .layout_runs()
            .fold((0.0f32, 0.0f32), |(width, height), run| {
                (width.max(run.line_w), height.max(run.line_top + run.line_height))
            });
        if width <= 0.0 {
            // no glyphs were shaped, usually because no font matched
            return RenderedSize::ZERO;
        }
        RenderedSize::new(width, height)
    }
}

impl MeasurableElement for TextBox {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.measured = None;
        }
    }

    fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    fn set_font_size(&mut self, px: f32) {
        if self.font_size != Some(px) {
            self.font_size = Some(px);
            self.measured = None;
        }
    }

    fn set_white_space(&mut self, white_space: WhiteSpace) {
        if self.white_space != white_space {
            self.white_space = white_space;
            self.measured = None;
        }
    }

    fn rendered_size(&mut self) -> RenderedSize {
        if !self.visible {
            return RenderedSize::ZERO;
        }
        match self.measured {
            Some(size) => size,
            None => {
                let size = self.layout();
                self.measured = Some(size);
                size
            }
        }
    }

    fn container(&self) -> ContainerBox {
        self.container
    }
}

impl fmt::Debug for TextBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBox")
            .field("text", &self.text)
            .field("family", &self.family)
            .field("font_size", &self.font_size)
            .field("white_space", &self.white_space)
            .field("container", &self.container)
            .field("visible", &self.visible)
            .finish()
    }
}

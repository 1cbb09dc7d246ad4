#![allow(dead_code)]

use std::rc::Rc;

use cosmic_text_fit::{
    element_ref, ContainerBox, CycleScheduler, ElementRef, MeasurableElement, RenderedSize,
    Scheduler, WhiteSpace,
};

/// An element with a monospace layout model.
///
/// Every character advances by `advance` times the font size and every line is
/// `line_height` times the font size tall. The defaults are powers of two so that
/// boundary sizes are exact.
#[derive(Debug)]
pub struct FakeElement {
    pub text: String,
    pub font_size: Option<f32>,
    pub white_space: WhiteSpace,
    pub container: ContainerBox,
    pub visible: bool,
    pub advance: f32,
    pub line_height: f32,
    /// Calls of `rendered_size`
    pub measurements: usize,
    /// Calls of `set_font_size`
    pub font_size_writes: usize,
}

impl FakeElement {
    pub fn new(text: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            font_size: None,
            white_space: WhiteSpace::Normal,
            container: ContainerBox::new(width, height),
            visible: true,
            advance: 0.5,
            line_height: 1.0,
            measurements: 0,
            font_size_writes: 0,
        }
    }

    pub fn empty(width: f32, height: f32) -> Self {
        Self::new("", width, height)
    }

    pub fn container(mut self, container: ContainerBox) -> Self {
        self.container = container;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn into_ref(self) -> ElementRef<Self> {
        element_ref(self)
    }

    /// Whether the text overflows its container at `px`, leaving the element untouched
    pub fn overflows_at(&self, px: f32) -> bool {
        let (width, height) = self.container.content_size();
        let size = self.layout(px);
        size.scroll_width > width || size.offset_height > height
    }

    fn layout(&self, px: f32) -> RenderedSize {
        let char_width = self.advance * px;
        let lines: Vec<usize> = match self.white_space {
            WhiteSpace::NoWrap => vec![self.text.chars().count()],
            WhiteSpace::Normal => {
                let (max_width, _) = self.container.content_size();
                let mut lines = Vec::new();
                let mut current = 0usize;
                for word in self.text.split_whitespace() {
                    let len = word.chars().count();
                    if current == 0 {
                        current = len;
                    } else if (current + 1 + len) as f32 * char_width <= max_width {
                        current += 1 + len;
                    } else {
                        lines.push(current);
                        current = len;
                    }
                }
                lines.push(current);
                lines
            }
        };
        let widest = lines.iter().copied().max().unwrap_or(0);
        RenderedSize::new(
            widest as f32 * char_width,
            lines.len() as f32 * self.line_height * px,
        )
    }
}

impl MeasurableElement for FakeElement {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    fn set_font_size(&mut self, px: f32) {
        self.font_size_writes += 1;
        self.font_size = Some(px);
    }

    fn set_white_space(&mut self, white_space: WhiteSpace) {
        self.white_space = white_space;
    }

    fn rendered_size(&mut self) -> RenderedSize {
        self.measurements += 1;
        if !self.visible || self.text.is_empty() {
            return RenderedSize::ZERO;
        }
        self.layout(self.font_size.unwrap_or(16.0))
    }

    fn container(&self) -> ContainerBox {
        self.container
    }
}

/// A scheduler to drive by hand, and the same scheduler as the crate consumes it
pub fn scheduler() -> (CycleScheduler, Rc<dyn Scheduler>) {
    let scheduler = CycleScheduler::new();
    let shared: Rc<dyn Scheduler> = Rc::new(scheduler.clone());
    (scheduler, shared)
}

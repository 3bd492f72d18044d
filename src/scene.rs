/// The draw list produced by one frame of simulation.
///
/// The rules in `compute` never touch a terminal; they append what they
/// would have drawn, in order, and the game loop replays it onto a
/// `Surface`.
use crate::assets::{Image, Rgb};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Paint `image` with its top-left corner at `(x, y)`.
    Blit { image: Image, x: i32, y: i32 },
    Text { text: String, color: Rgb, x: i32, y: i32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blit(&mut self, image: &Image, (x, y): (i32, i32)) {
        self.ops.push(DrawOp::Blit {
            image: *image,
            x,
            y,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, color: Rgb, (x, y): (i32, i32)) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            color,
            x,
            y,
        });
    }

    /// Blits of images with the given glyph, in draw order.
    pub fn blits_of(&self, glyph: char) -> impl Iterator<Item = (&Image, i32, i32)> + '_ {
        self.ops.iter().filter_map(move |op| match op {
            DrawOp::Blit { image, x, y } if image.glyph == glyph => Some((image, *x, *y)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

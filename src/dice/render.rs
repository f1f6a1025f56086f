//! Procedural dice face textures.

use super::digits::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::atlas::layout::check_cell_size;
use crate::error::{AtlasError, Result};
use crate::text::load_font;
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;
use std::path::Path;
use std::sync::Arc;

/// How the face value is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiceStyle {
    /// Classic pips.
    #[default]
    Dots,
    /// A centered digit.
    Numerals,
}

impl DiceStyle {
    /// File name for a rendered face, e.g. `dice_face_3.png` or `dice_number_3.png`.
    pub fn file_name(self, pips: u8) -> String {
        match self {
            DiceStyle::Dots => format!("dice_face_{}.png", pips),
            DiceStyle::Numerals => format!("dice_number_{}.png", pips),
        }
    }
}

/// Dice face rendering options.
#[derive(Clone)]
pub struct DiceFaceOptions {
    /// Face width and height in pixels.
    pub size: u32,
    pub style: DiceStyle,
    pub background: [u8; 4],
    /// Pip, digit and border color.
    pub dot_color: [u8; 4],
    /// Color used instead of `dot_color` on face 1.
    pub face_one_color: [u8; 4],
    pub dot_radius: u32,
    /// Font for numerals. Falls back to built-in bitmap digits.
    pub font: Option<Arc<FontVec>>,
}

impl std::fmt::Debug for DiceFaceOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiceFaceOptions")
            .field("size", &self.size)
            .field("style", &self.style)
            .field("background", &self.background)
            .field("dot_color", &self.dot_color)
            .field("face_one_color", &self.face_one_color)
            .field("dot_radius", &self.dot_radius)
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Default for DiceFaceOptions {
    fn default() -> Self {
        Self::new(128)
    }
}

impl DiceFaceOptions {
    /// Options for a face of the given size. Dot radius scales from 10px at 128px.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            style: DiceStyle::Dots,
            background: [255, 255, 255, 255],
            dot_color: [0, 0, 0, 255],
            face_one_color: [255, 0, 0, 255],
            dot_radius: ((u64::from(size) * 10 / 128) as u32).max(1),
            font: None,
        }
    }

    pub fn with_style(mut self, style: DiceStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(Arc::new(font));
        self
    }

    /// Load a TrueType/OpenType font for numerals.
    pub fn with_font_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(self.with_font(load_font(path)?))
    }

    fn ink(&self, pips: u8) -> Rgba<u8> {
        if pips == 1 {
            Rgba(self.face_one_color)
        } else {
            Rgba(self.dot_color)
        }
    }
}

/// Pip centers for a face, in pixels from the top-left.
pub fn dot_positions(pips: u8, size: u32) -> Vec<(f32, f32)> {
    let size = size as f32;
    let padding = size * 0.15;
    let (left, top) = (padding, padding);
    let (right, bottom) = (size - padding, size - padding);
    let center = size / 2.0;

    match pips {
        1 => vec![(center, center)],
        2 => vec![(left, top), (right, bottom)],
        3 => vec![(left, top), (center, center), (right, bottom)],
        4 => vec![(left, top), (right, top), (left, bottom), (right, bottom)],
        5 => vec![
            (left, top),
            (right, top),
            (center, center),
            (left, bottom),
            (right, bottom),
        ],
        6 => vec![
            (left, top),
            (left, center),
            (left, bottom),
            (right, top),
            (right, center),
            (right, bottom),
        ],
        _ => Vec::new(),
    }
}

/// Render one die face (1..=6).
pub fn render_dice_face(pips: u8, options: &DiceFaceOptions) -> Result<RgbaImage> {
    if !(1..=6).contains(&pips) {
        return Err(AtlasError::InvalidDieFace(pips));
    }
    check_cell_size(options.size)?;

    let mut image = RgbaImage::from_pixel(options.size, options.size, Rgba(options.background));
    let ink = options.ink(pips);
    draw_border(&mut image, ink);

    match options.style {
        DiceStyle::Dots => {
            for (x, y) in dot_positions(pips, options.size) {
                draw_filled_circle_mut(
                    &mut image,
                    (x.round() as i32, y.round() as i32),
                    options.dot_radius as i32,
                    ink,
                );
            }
        }
        DiceStyle::Numerals => match &options.font {
            Some(font) => draw_font_digit(&mut image, pips, font, ink),
            None => draw_bitmap_digit(&mut image, pips, ink),
        },
    }

    Ok(image)
}

/// Render faces 1 through 6, in order.
pub fn render_dice_faces(options: &DiceFaceOptions) -> Result<[RgbaImage; 6]> {
    Ok([
        render_dice_face(1, options)?,
        render_dice_face(2, options)?,
        render_dice_face(3, options)?,
        render_dice_face(4, options)?,
        render_dice_face(5, options)?,
        render_dice_face(6, options)?,
    ])
}

/// Two-pixel frame inset from the edge.
fn draw_border(image: &mut RgbaImage, color: Rgba<u8>) {
    let size = image.width();
    if size < 8 {
        return;
    }
    for inset in 1..=2 {
        let side = size - inset * 2;
        draw_hollow_rect_mut(image, Rect::at(inset as i32, inset as i32).of_size(side, side), color);
    }
}

fn draw_font_digit(image: &mut RgbaImage, pips: u8, font: &FontVec, color: Rgba<u8>) {
    let size = image.width();
    let scale = PxScale::from(size as f32 * 0.5);
    let text = pips.to_string();
    let (w, h) = text_size(scale, font, &text);
    let x = (size as i32 - w as i32) / 2;
    let y = (size as i32 - h as i32) / 2;
    draw_text_mut(image, color, x, y, scale, font, &text);
}

fn draw_bitmap_digit(image: &mut RgbaImage, pips: u8, color: Rgba<u8>) {
    let size = image.width();
    let cell = (size / 2 / GLYPH_HEIGHT).max(1);
    let x0 = (size as i32 - (GLYPH_WIDTH * cell) as i32) / 2;
    let y0 = (size as i32 - (GLYPH_HEIGHT * cell) as i32) / 2;

    for (col, row) in digits::cells(pips) {
        let rect = Rect::at(x0 + (col * cell) as i32, y0 + (row * cell) as i32).of_size(cell, cell);
        draw_filled_rect_mut(image, rect, color);
    }
}

//! Placeholder text textures.
//!
//! Each label is drawn centered on a transparent texture, colored by its
//! level (`lv0`..`lv5` in the name) or its category. The decorated style adds
//! a translucent backing panel, a light outline around the glyphs and a
//! dashed frame.

use crate::atlas::layout::MAX_CELL_SIZE;
use crate::atlas::{encode_png, write_atomic};
use crate::error::{AtlasError, Result};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default texture width and height.
pub const DEFAULT_TEXT_SIZE: u32 = 256;

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 32.0;

/// Labels longer than this shrink the font to keep roughly the same width.
const MAX_FULL_SIZE_CHARS: usize = 8;

/// Colors for `lv0` through `lv5`.
pub const LEVEL_COLORS: [[u8; 4]; 6] = [
    [0x80, 0x80, 0x80, 255],
    [0x4C, 0xAF, 0x50, 255],
    [0x21, 0x96, 0xF3, 255],
    [0x9C, 0x27, 0xB0, 255],
    [0xFF, 0x98, 0x00, 255],
    [0xFF, 0xD7, 0x00, 255],
];
pub const NPC_COLOR: [u8; 4] = [0xFF, 0x6B, 0x6B, 255];
pub const OBJECT_COLOR: [u8; 4] = [0x00, 0xBC, 0xD4, 255];
pub const DEFAULT_COLOR: [u8; 4] = [0x33, 0x33, 0x33, 255];

const PANEL_COLOR: [u8; 4] = [0, 0, 0, 51];
const OUTLINE_COLOR: [u8; 4] = [255, 255, 255, 204];
const OUTLINE_WIDTH: i32 = 2;
const FRAME_INSET: u32 = 5;
const FRAME_DASH: u32 = 5;
const FRAME_ALPHA: u8 = 77;

/// One texture to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLabel {
    /// Output file stem, e.g. `lv3` or `merchant`.
    pub name: String,
    /// Text to draw. Anything after the first `-` is description and is not drawn.
    #[serde(default)]
    pub text: Option<String>,
    /// Optional grouping; also the output subdirectory.
    #[serde(default)]
    pub category: Option<String>,
}

impl TextLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            category: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// The string actually drawn.
    pub fn display_text(&self) -> String {
        self.text
            .as_deref()
            .and_then(|text| text.split('-').next())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(self.name.as_str())
            .to_string()
    }

    pub fn color(&self) -> [u8; 4] {
        label_color(&self.name, self.category.as_deref())
    }

    /// `<category>/<name>.png`, or `<name>.png` without a category.
    ///
    /// Names and categories must be single plain path components.
    pub fn relative_path(&self) -> Result<PathBuf> {
        let file = format!("{}.png", plain_component(&self.name)?);
        Ok(match &self.category {
            Some(category) => Path::new(plain_component(category)?).join(file),
            None => PathBuf::from(file),
        })
    }
}

fn plain_component(name: &str) -> Result<&str> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(name),
        _ => Err(AtlasError::InvalidLabel(name.to_string())),
    }
}

/// Level number from a name containing `lv<digits>`.
pub fn level_of(name: &str) -> Option<u32> {
    name.match_indices("lv").find_map(|(i, _)| {
        let digits: String = name[i + 2..].chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    })
}

/// Level color if the name has one, otherwise the category color.
pub fn label_color(name: &str, category: Option<&str>) -> [u8; 4] {
    if let Some(level) = level_of(name) {
        return LEVEL_COLORS
            .get(level as usize)
            .copied()
            .unwrap_or(DEFAULT_COLOR);
    }
    match category {
        Some("npc") => NPC_COLOR,
        Some("object") => OBJECT_COLOR,
        _ => DEFAULT_COLOR,
    }
}

/// Font size after shrinking for long labels.
pub fn fitted_font_size(text: &str, font_size: f32) -> f32 {
    let chars = text.chars().count();
    if chars > MAX_FULL_SIZE_CHARS {
        font_size * MAX_FULL_SIZE_CHARS as f32 / chars as f32
    } else {
        font_size
    }
}

/// Load a TrueType/OpenType font.
pub fn load_font<P: AsRef<Path>>(path: P) -> Result<FontVec> {
    let data = std::fs::read(path)?;
    FontVec::try_from_vec(data).map_err(|e| AtlasError::Font(e.to_string()))
}

/// Read a JSON array of labels.
pub fn load_labels<P: AsRef<Path>>(path: P) -> Result<Vec<TextLabel>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Labels in `category` (if given) whose name is in `only` (if non-empty).
pub fn filter_labels(
    labels: &[TextLabel],
    category: Option<&str>,
    only: &[String],
) -> Vec<TextLabel> {
    labels
        .iter()
        .filter(|label| category.map_or(true, |c| label.category.as_deref() == Some(c)))
        .filter(|label| only.is_empty() || only.iter().any(|o| *o == label.name))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    /// Panel, outline and dashed frame.
    #[default]
    Decorated,
    /// Just the colored text.
    Simple,
}

#[derive(Clone)]
pub struct TextTextureOptions {
    pub width: u32,
    pub height: u32,
    pub font_size: f32,
    pub style: TextStyle,
    /// Without a font only the decorations are drawn.
    pub font: Option<Arc<FontVec>>,
}

impl std::fmt::Debug for TextTextureOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextTextureOptions")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("font_size", &self.font_size)
            .field("style", &self.style)
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Default for TextTextureOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_SIZE, DEFAULT_TEXT_SIZE)
    }
}

impl TextTextureOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            font_size: DEFAULT_FONT_SIZE,
            style: TextStyle::Decorated,
            font: None,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(Arc::new(font));
        self
    }

    pub fn with_font_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        Ok(self.with_font(load_font(path)?))
    }
}

/// Render one label texture.
pub fn render_text_texture(label: &TextLabel, options: &TextTextureOptions) -> Result<RgbaImage> {
    let (width, height) = (options.width, options.height);
    if width == 0 || height == 0 || width > MAX_CELL_SIZE || height > MAX_CELL_SIZE {
        return Err(AtlasError::InvalidTextureSize { width, height });
    }

    let mut image = RgbaImage::new(width, height);
    let color = Rgba(label.color());
    let text = label.display_text();

    if options.style == TextStyle::Decorated {
        draw_panel(&mut image);
    }

    if let Some(font) = &options.font {
        let font: &FontVec = font;
        let scale = PxScale::from(fitted_font_size(&text, options.font_size));
        let (w, h) = text_size(scale, font, &text);
        let x = (width as i32 - w as i32) / 2;
        let y = (height as i32 - h as i32) / 2;

        if options.style == TextStyle::Decorated {
            for dy in [-OUTLINE_WIDTH, 0, OUTLINE_WIDTH] {
                for dx in [-OUTLINE_WIDTH, 0, OUTLINE_WIDTH] {
                    if (dx, dy) != (0, 0) {
                        let outline = Rgba(OUTLINE_COLOR);
                        draw_text_mut(&mut image, outline, x + dx, y + dy, scale, font, &text);
                    }
                }
            }
        }
        draw_text_mut(&mut image, color, x, y, scale, font, &text);
    }

    if options.style == TextStyle::Decorated {
        draw_dashed_frame(&mut image, color);
    }

    Ok(image)
}

/// Translucent band across the middle.
fn draw_panel(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    let fraction = |value: u32, percent: u64| (u64::from(value) * percent / 100) as u32;
    let (panel_w, panel_h) = (fraction(width, 80), fraction(height, 30));
    if panel_w == 0 || panel_h == 0 {
        return;
    }
    let origin = (fraction(width, 10) as i32, fraction(height, 35) as i32);
    let rect = Rect::at(origin.0, origin.1).of_size(panel_w, panel_h);
    draw_filled_rect_mut(image, rect, Rgba(PANEL_COLOR));
}

/// One-pixel dashed outline, inset from the edge.
fn draw_dashed_frame(image: &mut RgbaImage, color: Rgba<u8>) {
    let (width, height) = image.dimensions();
    if width <= FRAME_INSET * 2 || height <= FRAME_INSET * 2 {
        return;
    }
    let ink = Rgba([color.0[0], color.0[1], color.0[2], FRAME_ALPHA]);
    let (left, top) = (FRAME_INSET, FRAME_INSET);
    let (right, bottom) = (width - FRAME_INSET - 1, height - FRAME_INSET - 1);
    let on = |offset: u32| (offset / FRAME_DASH) % 2 == 0;

    for x in left..=right {
        if on(x - left) {
            image.put_pixel(x, top, ink);
            image.put_pixel(x, bottom, ink);
        }
    }
    for y in top..=bottom {
        if on(y - top) {
            image.put_pixel(left, y, ink);
            image.put_pixel(right, y, ink);
        }
    }
}

/// Outcome of [`generate_text_textures`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBatch {
    pub written: Vec<PathBuf>,
    /// Label name and error message.
    pub failed: Vec<(String, String)>,
}

/// Render and write every label under `output_dir`.
///
/// Labels render in parallel. A failing label is recorded and does not stop the batch.
pub fn generate_text_textures(
    labels: &[TextLabel],
    output_dir: &Path,
    options: &TextTextureOptions,
) -> Result<TextBatch> {
    if options.font.is_none() {
        warn!("no font given, text textures will only contain decorations");
    }
    std::fs::create_dir_all(output_dir)?;

    let results: Vec<(String, Result<PathBuf>)> = labels
        .par_iter()
        .map(|label| (label.name.clone(), write_text_texture(label, output_dir, options)))
        .collect();

    let mut batch = TextBatch::default();
    for (name, result) in results {
        match result {
            Ok(path) => batch.written.push(path),
            Err(e) => {
                warn!(label = %name, error = %e, "failed to generate text texture");
                batch.failed.push((name, e.to_string()));
            }
        }
    }

    info!(
        dir = %output_dir.display(),
        success = batch.written.len(),
        failed = batch.failed.len(),
        "generated text textures"
    );
    Ok(batch)
}

fn write_text_texture(
    label: &TextLabel,
    output_dir: &Path,
    options: &TextTextureOptions,
) -> Result<PathBuf> {
    let path = output_dir.join(label.relative_path()?);
    let image = render_text_texture(label, options)?;
    write_atomic(&path, &encode_png(&image)?)?;
    debug!(
        label = %label.name,
        text = %label.display_text(),
        path = %path.display(),
        "wrote text texture"
    );
    Ok(path)
}

use serde::Serialize;

use super::{ImageSource, StickerKind};
use crate::geometry::Color;

pub const TEXT_FONT_SIZE_MIN: u16 = 12;
pub const TEXT_FONT_SIZE_MAX: u16 = 72;
pub const EMOJI_FONT_SIZE_MIN: u16 = 24;
pub const EMOJI_FONT_SIZE_MAX: u16 = 120;

const DEFAULT_TEXT_COLOR: Color = Color::new(0, 0, 0);
const DEFAULT_TEXT_FONT_SIZE: u16 = 24;
const DEFAULT_EMOJI_FONT_SIZE: u16 = 48;
const DEFAULT_SHAPE_FILL: Color = Color::new(0xFF, 0x57, 0x33);

/// Variant-specific visual attributes. Fields a kind does not use stay `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StickerStyle {
    pub color: Option<Color>,
    pub font_size: Option<u16>,
    pub fill: Option<Color>,
    pub background_image: Option<ImageSource>,
}

impl StickerStyle {
    pub fn text(color: Color, font_size: u16) -> Self {
        Self {
            color: Some(color),
            font_size: Some(clamp_font_size(StickerKind::Text, font_size)),
            ..Self::default()
        }
    }

    pub fn emoji(font_size: u16) -> Self {
        Self {
            font_size: Some(clamp_font_size(StickerKind::Emoji, font_size)),
            ..Self::default()
        }
    }

    pub fn shape(fill: Color) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn default_for(kind: StickerKind) -> Self {
        match kind {
            StickerKind::Text => Self::text(DEFAULT_TEXT_COLOR, DEFAULT_TEXT_FONT_SIZE),
            StickerKind::Emoji => Self::emoji(DEFAULT_EMOJI_FONT_SIZE),
            StickerKind::Shape => Self::shape(DEFAULT_SHAPE_FILL),
            StickerKind::Image | StickerKind::Gif => Self::default(),
        }
    }

    /// Font size to render with, falling back to the kind's default.
    pub fn effective_font_size(&self, kind: StickerKind) -> u16 {
        self.font_size.unwrap_or(match kind {
            StickerKind::Emoji => DEFAULT_EMOJI_FONT_SIZE,
            _ => DEFAULT_TEXT_FONT_SIZE,
        })
    }

    pub fn effective_fill(&self) -> Color {
        self.fill.unwrap_or(DEFAULT_SHAPE_FILL)
    }

    pub fn effective_color(&self) -> Color {
        self.color.unwrap_or(DEFAULT_TEXT_COLOR)
    }
}

/// Clamps a font size to the editable range of `kind`.
pub fn clamp_font_size(kind: StickerKind, size: u16) -> u16 {
    match kind {
        StickerKind::Emoji => size.clamp(EMOJI_FONT_SIZE_MIN, EMOJI_FONT_SIZE_MAX),
        _ => size.clamp(TEXT_FONT_SIZE_MIN, TEXT_FONT_SIZE_MAX),
    }
}

//! Sticker object model and the indexed arena holding the live collection.

mod style;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::geometry::{Point, Size};

pub use style::{
    clamp_font_size, StickerStyle, EMOJI_FONT_SIZE_MAX, EMOJI_FONT_SIZE_MIN, TEXT_FONT_SIZE_MAX,
    TEXT_FONT_SIZE_MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StickerId(u64);

impl StickerId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Displayable image reference: a URL or a `data:` URL produced by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageSource(String);

impl ImageSource {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerKind {
    Image,
    Text,
    Shape,
    Emoji,
    Gif,
}

impl StickerKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Shape => "shape",
            Self::Emoji => "emoji",
            Self::Gif => "gif",
        }
    }

    /// Box size a freshly added sticker of this kind starts with.
    pub const fn default_size(self) -> Size {
        match self {
            Self::Text | Self::Emoji | Self::Gif => Size::new(200.0, 50.0),
            Self::Shape | Self::Image => Size::new(100.0, 100.0),
        }
    }
}

impl FromStr for StickerKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "image" => Ok(Self::Image),
            "text" => Ok(Self::Text),
            "shape" => Ok(Self::Shape),
            "emoji" => Ok(Self::Emoji),
            "gif" => Ok(Self::Gif),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
    Star,
    Hexagon,
    Heart,
    Diamond,
    Pentagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        Self::Square,
        Self::Circle,
        Self::Triangle,
        Self::Star,
        Self::Hexagon,
        Self::Heart,
        Self::Diamond,
        Self::Pentagon,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Star => "star",
            Self::Hexagon => "hexagon",
            Self::Heart => "heart",
            Self::Diamond => "diamond",
            Self::Pentagon => "pentagon",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == value)
            .ok_or_else(|| ModelError::UnknownShape(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown sticker kind `{0}`")]
    UnknownKind(String),
    #[error("unknown shape `{0}`")]
    UnknownShape(String),
    #[error("text sticker content is empty")]
    EmptyText,
}

/// Payload of a sticker. The variant determines the sticker's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StickerContent {
    Image(ImageSource),
    Text(String),
    Shape(ShapeKind),
    Emoji(String),
    Gif(ImageSource),
}

impl StickerContent {
    pub fn text(text: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ModelError::EmptyText);
        }
        Ok(Self::Text(text))
    }

    pub const fn kind(&self) -> StickerKind {
        match self {
            Self::Image(_) => StickerKind::Image,
            Self::Text(_) => StickerKind::Text,
            Self::Shape(_) => StickerKind::Shape,
            Self::Emoji(_) => StickerKind::Emoji,
            Self::Gif(_) => StickerKind::Gif,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sticker {
    pub id: StickerId,
    pub position: Point,
    pub rotation: f64,
    pub scale: f64,
    pub size: Size,
    pub content: StickerContent,
    pub style: StickerStyle,
}

impl Sticker {
    pub fn new(id: StickerId, position: Point, content: StickerContent, style: StickerStyle) -> Self {
        Self {
            id,
            position,
            rotation: 0.0,
            scale: 1.0,
            size: content.kind().default_size(),
            content,
            style,
        }
    }

    pub const fn kind(&self) -> StickerKind {
        self.content.kind()
    }

    /// Copies position, rotation, scale and size from `other`. Content and
    /// style stay as they are.
    pub fn apply_geometry(&mut self, other: &Sticker) {
        self.position = other.position;
        self.rotation = other.rotation;
        self.scale = other.scale;
        self.size = other.size;
    }

    /// Center of the unscaled box, which is also the transform origin.
    pub fn center(&self) -> Point {
        self.position
            .offset(self.size.width / 2.0, self.size.height / 2.0)
    }
}

/// Live sticker collection: id-indexed storage plus draw order.
#[derive(Debug, Clone)]
pub struct StickerObjects {
    entries: HashMap<StickerId, Sticker>,
    order: Vec<StickerId>,
    next_id: u64,
}

impl Default for StickerObjects {
    fn default() -> Self {
        Self::new()
    }
}

impl StickerObjects {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    pub fn allocate_id(&mut self) -> StickerId {
        let id = StickerId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: StickerId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: StickerId) -> Option<&Sticker> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: StickerId) -> Option<&mut Sticker> {
        self.entries.get_mut(&id)
    }

    pub fn index_of(&self, id: StickerId) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Iterates stickers bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &Sticker> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn ids(&self) -> &[StickerId] {
        &self.order
    }

    pub fn push(&mut self, sticker: Sticker) {
        let index = self.order.len();
        self.insert_at(index, sticker);
    }

    /// Inserts at draw-order `index` (clamped to the end). An existing entry
    /// with the same id is replaced in place instead.
    pub fn insert_at(&mut self, index: usize, sticker: Sticker) {
        let id = sticker.id;
        if self.entries.insert(id, sticker).is_some() {
            return;
        }
        let index = index.min(self.order.len());
        self.order.insert(index, id);
        if id.0 >= self.next_id {
            self.next_id = id.0.saturating_add(1);
        }
    }

    /// Replaces the snapshot for an existing id; returns `false` when the id is gone.
    pub fn replace(&mut self, sticker: Sticker) -> bool {
        match self.entries.get_mut(&sticker.id) {
            Some(slot) => {
                *slot = sticker;
                true
            }
            None => false,
        }
    }

    /// Removes a sticker, returning its last snapshot and former draw-order index.
    pub fn remove(&mut self, id: StickerId) -> Option<(Sticker, usize)> {
        let sticker = self.entries.remove(&id)?;
        let index = self.index_of(id).unwrap_or(self.order.len());
        self.order.retain(|candidate| *candidate != id);
        Some((sticker, index))
    }
}

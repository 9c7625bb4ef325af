//! Read-only projection of the editor state for a host renderer.
//!
//! A `Scene` lists stickers in draw order with everything a host needs to
//! paint them: the CSS-style transform, box size, per-kind visual payload,
//! and the handle set for the selected sticker. It serializes to JSON.

use serde::Serialize;

use crate::geometry::Color;
use crate::input::ResizeHandle;
use crate::sticker::{
    ImageSource, ShapeKind, Sticker, StickerContent, StickerId, StickerKind, StickerObjects,
};

const TEXTURED_FILL_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Visual {
    Image {
        src: ImageSource,
    },
    Gif {
        src: ImageSource,
    },
    Text {
        text: String,
        color: Color,
        font_size: u16,
    },
    Emoji {
        emoji: String,
        font_size: u16,
    },
    Shape {
        shape: ShapeKind,
        fill: Color,
        fill_opacity: f64,
        texture: Option<ImageSource>,
    },
}

impl Visual {
    fn of(sticker: &Sticker) -> Self {
        let style = &sticker.style;
        match &sticker.content {
            StickerContent::Image(src) => Self::Image { src: src.clone() },
            StickerContent::Gif(src) => Self::Gif { src: src.clone() },
            StickerContent::Text(text) => Self::Text {
                text: text.clone(),
                color: style.effective_color(),
                font_size: style.effective_font_size(StickerKind::Text),
            },
            StickerContent::Emoji(emoji) => Self::Emoji {
                emoji: emoji.clone(),
                font_size: style.effective_font_size(StickerKind::Emoji),
            },
            StickerContent::Shape(shape) => Self::Shape {
                shape: *shape,
                fill: style.effective_fill(),
                fill_opacity: if style.background_image.is_some() {
                    TEXTURED_FILL_OPACITY
                } else {
                    1.0
                },
                texture: style.background_image.clone(),
            },
        }
    }
}

/// Kind-specific controls offered on the selected sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAffordance {
    EditTextStyle,
    EditFill,
    UploadTexture,
    EditSize,
}

impl EditAffordance {
    pub fn for_kind(kind: StickerKind) -> Vec<Self> {
        match kind {
            StickerKind::Text => vec![Self::EditTextStyle],
            StickerKind::Shape => vec![Self::EditFill, Self::UploadTexture],
            StickerKind::Emoji => vec![Self::EditSize],
            StickerKind::Image | StickerKind::Gif => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleSet {
    pub delete: bool,
    pub rotate: bool,
    pub scale: bool,
    pub resize: [ResizeHandle; 8],
    pub edit: Vec<EditAffordance>,
}

impl HandleSet {
    fn for_kind(kind: StickerKind) -> Self {
        Self {
            delete: true,
            rotate: true,
            scale: true,
            resize: ResizeHandle::ALL,
            edit: EditAffordance::for_kind(kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub id: StickerId,
    pub kind: StickerKind,
    pub transform: String,
    pub width: f64,
    pub height: f64,
    pub visual: Visual,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handles: Option<HandleSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub background: Option<ImageSource>,
    pub nodes: Vec<SceneNode>,
    pub selected: Option<StickerId>,
}

impl Scene {
    pub fn project(
        objects: &StickerObjects,
        selected: Option<StickerId>,
        background: Option<&ImageSource>,
    ) -> Self {
        let nodes = objects
            .iter()
            .map(|sticker| SceneNode {
                id: sticker.id,
                kind: sticker.kind(),
                transform: css_transform(sticker),
                width: sticker.size.width,
                height: sticker.size.height,
                visual: Visual::of(sticker),
                handles: (selected == Some(sticker.id)).then(|| HandleSet::for_kind(sticker.kind())),
            })
            .collect();
        Self {
            background: background.cloned(),
            nodes,
            selected: selected.filter(|id| objects.contains(*id)),
        }
    }

    pub fn node(&self, id: StickerId) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// `translate(Xpx, Ypx) rotate(Rdeg) scale(S)`, origin at the box center.
pub fn css_transform(sticker: &Sticker) -> String {
    format!(
        "translate({}px, {}px) rotate({}deg) scale({})",
        sticker.position.x, sticker.position.y, sticker.rotation, sticker.scale
    )
}

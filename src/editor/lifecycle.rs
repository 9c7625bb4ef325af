use super::StickerEditor;
use crate::error::EditorResult;
use crate::geometry::Color;
use crate::gif::GifSource;
use crate::history::HistoryEntry;
use crate::sticker::{
    clamp_font_size, ImageSource, ShapeKind, Sticker, StickerContent, StickerId, StickerKind,
    StickerStyle,
};
use crate::upload::decode_image;

impl StickerEditor {
    /// Appends a sticker at the default position, selects it and records `ADD`.
    pub fn add_object(&mut self, content: StickerContent, style: StickerStyle) -> StickerId {
        self.settle();
        let id = self.objects.allocate_id();
        let sticker = Sticker::new(id, self.config.default_position, content, style);
        let index = self.objects.len();
        tracing::debug!(id = %id, kind = sticker.kind().name(), "sticker added");
        self.objects.push(sticker.clone());
        self.history.commit(HistoryEntry::added(sticker, index));
        self.selected = Some(id);
        id
    }

    /// Adds a text sticker. Blank text is rejected without touching history.
    pub fn add_text(&mut self, text: &str, color: Color, font_size: u16) -> Option<StickerId> {
        match StickerContent::text(text) {
            Ok(content) => Some(self.add_object(content, StickerStyle::text(color, font_size))),
            Err(err) => {
                tracing::debug!(%err, "text sticker rejected");
                None
            }
        }
    }

    pub fn add_emoji(&mut self, emoji: &str) -> StickerId {
        self.add_object(
            StickerContent::Emoji(emoji.to_string()),
            StickerStyle::default_for(StickerKind::Emoji),
        )
    }

    pub fn add_shape(&mut self, shape: ShapeKind) -> StickerId {
        self.add_object(
            StickerContent::Shape(shape),
            StickerStyle::default_for(StickerKind::Shape),
        )
    }

    /// Adds a shape filled with the colour picked by the user.
    pub fn add_shape_with_fill(&mut self, shape: ShapeKind, fill: Color) -> StickerId {
        self.add_object(StickerContent::Shape(shape), StickerStyle::shape(fill))
    }

    /// Adds a shape from its palette name, e.g. `"star"`.
    pub fn add_shape_named(&mut self, name: &str) -> EditorResult<StickerId> {
        let shape = name.parse::<ShapeKind>()?;
        Ok(self.add_shape(shape))
    }

    pub fn add_image(&mut self, source: ImageSource) -> StickerId {
        self.add_object(StickerContent::Image(source), StickerStyle::default())
    }

    /// Decodes an uploaded file and adds it as an image sticker.
    pub fn add_image_bytes(&mut self, bytes: &[u8]) -> EditorResult<StickerId> {
        let decoded = decode_image(bytes).inspect_err(|err| {
            tracing::warn!(%err, "image sticker upload rejected");
        })?;
        Ok(self.add_image(decoded.source))
    }

    pub fn add_gif(&mut self, url: impl Into<String>) -> StickerId {
        self.add_object(
            StickerContent::Gif(ImageSource::new(url)),
            StickerStyle::default(),
        )
    }

    /// Adds the GIF currently chosen in the picker.
    pub fn add_gif_from_picker(&mut self) -> StickerId {
        let source = self.gif_picker.selected().clone();
        self.add_object(StickerContent::Gif(source), StickerStyle::default())
    }

    /// Loads the next page of the picker's current query.
    pub fn load_more_gifs(&mut self, source: &dyn GifSource) -> EditorResult<usize> {
        Ok(self.gif_picker.load_more(source)?)
    }

    /// Removes a sticker and records `DELETE`. Unknown ids are a no-op.
    pub fn delete_object(&mut self, id: StickerId) -> bool {
        self.settle();
        let Some((sticker, index)) = self.objects.remove(id) else {
            tracing::debug!(id = %id, "delete on missing sticker ignored");
            return false;
        };
        tracing::debug!(id = %id, index, "sticker deleted");
        self.history.commit(HistoryEntry::deleted(sticker, index));
        if self.selected == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Replaces the canvas background. Invalid data leaves the old one in place.
    pub fn upload_background(&mut self, bytes: &[u8]) -> EditorResult<()> {
        let decoded = decode_image(bytes).inspect_err(|err| {
            tracing::warn!(%err, "background upload rejected");
        })?;
        tracing::debug!(width = decoded.width, height = decoded.height, "background replaced");
        self.background = Some(decoded.source);
        Ok(())
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// Sets the texture drawn behind a shape. Returns `Ok(false)` when `id`
    /// is missing or not a shape.
    pub fn upload_shape_background(&mut self, id: StickerId, bytes: &[u8]) -> EditorResult<bool> {
        if self.objects.get(id).map(Sticker::kind) != Some(StickerKind::Shape) {
            tracing::debug!(id = %id, "shape texture target is not a shape");
            return Ok(false);
        }
        let decoded = decode_image(bytes).inspect_err(|err| {
            tracing::warn!(%err, id = %id, "shape texture upload rejected");
        })?;
        Ok(self.edit_style(id, &[StickerKind::Shape], |style| {
            style.background_image = Some(decoded.source);
        }))
    }

    /// Font size for text or emoji, clamped to the kind's editable range.
    pub fn set_font_size(&mut self, id: StickerId, font_size: u16) -> bool {
        let Some(kind) = self.objects.get(id).map(Sticker::kind) else {
            return false;
        };
        self.edit_style(id, &[StickerKind::Text, StickerKind::Emoji], |style| {
            style.font_size = Some(clamp_font_size(kind, font_size));
        })
    }

    pub fn set_color(&mut self, id: StickerId, color: Color) -> bool {
        self.edit_style(id, &[StickerKind::Text], |style| style.color = Some(color))
    }

    pub fn set_fill(&mut self, id: StickerId, fill: Color) -> bool {
        self.edit_style(id, &[StickerKind::Shape], |style| style.fill = Some(fill))
    }

    pub fn set_text(&mut self, id: StickerId, text: &str) -> bool {
        let Ok(content) = StickerContent::text(text) else {
            return false;
        };
        match self.objects.get_mut(id) {
            Some(sticker) if sticker.kind() == StickerKind::Text => {
                sticker.content = content;
                true
            }
            _ => false,
        }
    }

    /// Style edits are not recorded in history.
    fn edit_style(
        &mut self,
        id: StickerId,
        kinds: &[StickerKind],
        edit: impl FnOnce(&mut StickerStyle),
    ) -> bool {
        match self.objects.get_mut(id) {
            Some(sticker) if kinds.contains(&sticker.kind()) => {
                edit(&mut sticker.style);
                true
            }
            _ => {
                tracing::debug!(id = %id, "style edit ignored");
                false
            }
        }
    }
}

use thiserror::Error;

use crate::sticker::ImageSource;

pub const DEFAULT_GIF_QUERY: &str = "wedding";
pub const GIF_PAGE_SIZE: usize = 10;
pub const DEFAULT_GIF_URL: &str =
    "https://media1.tenor.com/m/WMCy2kbsNLUAAAAC/wedding-we-want-a-wedding.gif";

#[derive(Debug, Error)]
pub enum GifError {
    #[error("gif search failed: {message}")]
    Search { message: String },
    #[error("gif result has no displayable url: {id}")]
    MissingUrl { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifResult {
    pub id: String,
    pub display_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GifPage {
    pub results: Vec<GifResult>,
    /// Total matches reported by the service, when known.
    pub total: Option<usize>,
}

/// Remote GIF search service.
pub trait GifSource {
    fn search(&self, query: &str, offset: usize, limit: usize) -> Result<GifPage, GifError>;
}

/// Paged search state plus the GIF that the next "add gif" will use.
#[derive(Debug, Clone)]
pub struct GifPicker {
    query: String,
    offset: usize,
    results: Vec<GifResult>,
    exhausted: bool,
    selected: ImageSource,
}

impl Default for GifPicker {
    fn default() -> Self {
        Self {
            query: DEFAULT_GIF_QUERY.to_string(),
            offset: 0,
            results: Vec::new(),
            exhausted: false,
            selected: ImageSource::new(DEFAULT_GIF_URL),
        }
    }
}

impl GifPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[GifResult] {
        &self.results
    }

    pub fn selected(&self) -> &ImageSource {
        &self.selected
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Changes the query and drops accumulated pages.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.offset = 0;
        self.results.clear();
        self.exhausted = false;
    }

    /// Fetches the next page and appends it. Returns how many results arrived.
    pub fn load_more(&mut self, source: &dyn GifSource) -> Result<usize, GifError> {
        if self.exhausted {
            return Ok(0);
        }
        let page = source.search(&self.query, self.offset, GIF_PAGE_SIZE)?;
        let fetched = page.results.len();
        self.offset += fetched;
        self.exhausted = fetched < GIF_PAGE_SIZE
            || page.total.is_some_and(|total| self.offset >= total);
        self.results.extend(page.results);
        tracing::debug!(query = %self.query, fetched, offset = self.offset, "gif page loaded");
        Ok(fetched)
    }

    /// Selects a loaded result by id.
    pub fn select(&mut self, id: &str) -> Result<&ImageSource, GifError> {
        let result = self
            .results
            .iter()
            .find(|result| result.id == id)
            .ok_or_else(|| GifError::MissingUrl { id: id.to_string() })?;
        if result.display_url.trim().is_empty() {
            return Err(GifError::MissingUrl { id: id.to_string() });
        }
        self.selected = ImageSource::new(result.display_url.clone());
        Ok(&self.selected)
    }
}

use pdf_template::Rect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Template error: {0}")]
    Template(#[from] pdf_template::TemplateError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zone {name:?} on page {page_index} has a non-positive dimension")]
    DegenerateZone { name: String, page_index: usize },
    #[error("Generated document would exceed the page limit of {limit}")]
    PageLimitExceeded { limit: usize },
    #[error("Rights protection failed: {0}")]
    Protection(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// A named placement zone resolved on a template page.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: String,
    pub page_index: usize,
    pub rect: Rect,
}

/// One placed piece of text, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
}

/// Text placement for one output page, backed by a template page's artwork.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// Index of the template page supplying the background.
    pub template_page: usize,
    pub runs: Vec<TextRun>,
}

/// The full computed placement, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub pages: Vec<PagePlan>,
    /// True when placement came from declared zones rather than margins.
    pub zone_layout: bool,
}

impl RenderPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

use std::fmt::{Display, Formatter, Result as FmtResult};

use scraper::Html;

use super::{Header, Markup, Record};

/// A blog post: the only entry kind that gets rewritten and published.
///
/// Metadata is fixed once parsed; only the content changes, through the
/// parsed markup tree.
#[derive(Debug, Clone)]
pub struct Post {
    pub header: Header,
    markup: Markup,
}
impl Post {
    pub fn new(header: Header, content: impl Into<String>) -> Self {
        Self {
            header,
            markup: Markup::from(content.into()),
        }
    }

    /// The final segment of the post's path.
    pub fn id(&self) -> &str {
        self.header.path.rsplit('/').next().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        &self.header.title
    }

    pub fn is_draft(&self) -> bool {
        self.header.draft
    }

    /// The content markup, or `None` while the parsed tree has edits that
    /// have not been [committed](Self::commit).
    pub fn content(&self) -> Option<&str> {
        self.markup.source()
    }

    /// The parsed content tree, built on first access and cached.
    pub fn markup_mut(&mut self) -> &mut Html {
        self.markup.tree_mut()
    }

    /// Write the parsed tree back into the content string.
    pub fn commit(&mut self) -> &str {
        self.markup.commit()
    }
}
impl From<Record> for Post {
    fn from(record: Record) -> Self {
        Self::new(record.header, record.content)
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[Post] - {}", self.header.title)
    }
}

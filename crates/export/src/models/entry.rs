use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{Kind, Post, Record, Setting};
use crate::error::Result;
use crate::xml::Element;

/// One typed record from the export feed.
#[derive(Debug, Clone)]
pub enum Entry {
    Template(Record),
    Page(Record),
    Post(Post),
    Comment(Record),
    Setting(Setting),
}
impl Entry {
    /// Build the variant matching `kind` from the entry's children.
    pub fn build(kind: Kind, element: &Element) -> Result<Self> {
        Ok(match kind {
            Kind::Template => Self::Template(Record::from_element(element)?),
            Kind::Page => Self::Page(Record::from_element(element)?),
            Kind::Post => Self::Post(Record::from_element(element)?.into()),
            Kind::Comment => Self::Comment(Record::from_element(element)?),
            Kind::Settings => Self::Setting(Setting::from(element)),
        })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Template(_) => Kind::Template,
            Self::Page(_) => Kind::Page,
            Self::Post(_) => Kind::Post,
            Self::Comment(_) => Kind::Comment,
            Self::Setting(_) => Kind::Settings,
        }
    }

    pub fn into_post(self) -> Option<Post> {
        match self {
            Self::Post(post) => Some(post),
            _ => None,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Template(record) => write!(f, "[Template] - {}", record.header.title),
            Self::Page(record) => write!(f, "[Page] - {}", record.header.title),
            Self::Post(post) => post.fmt(f),
            Self::Comment(record) => {
                let author = record.header.author.as_ref().map(|a| a.name.as_str()).unwrap_or_default();
                write!(f, "[Comment] - {}: \"{}\"", author, record.content)
            },
            Self::Setting(setting) => setting.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Header};

    #[test]
    fn test_comment_display_keeps_content_verbatim() {
        let mut header = Header::new("", "");
        header.author = Some(Author::new("Ada", "ada@example.com"));
        let comment = Entry::Comment(Record {
            header,
            content: "Say \"hi\"\nplease".to_string(),
        });
        assert_eq!(comment.to_string(), "[Comment] - Ada: \"Say \"hi\"\nplease\"");
    }
}

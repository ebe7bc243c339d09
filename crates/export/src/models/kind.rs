use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::consts::{KIND_TERM_PREFIX, SCHEME_ENTRY_KIND, SCHEME_POST_CATEGORY};
use crate::error::{Error, ErrorKind};

/// The kind of an export entry, taken from its discriminator category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Post,
    Page,
    Comment,
    Template,
    Settings,
}
impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Post => "post",
            Kind::Page => "page",
            Kind::Comment => "comment",
            Kind::Template => "template",
            Kind::Settings => "settings",
        }
    }

    /// Parse a full category term, e.g.
    /// `http://schemas.google.com/blogger/2008/kind#post`.
    pub fn from_term(term: &str) -> Result<Self, Error> {
        term.strip_prefix(KIND_TERM_PREFIX).unwrap_or(term).parse()
    }
}
impl FromStr for Kind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "post" => Self::Post,
            "page" => Self::Page,
            "comment" => Self::Comment,
            "template" => Self::Template,
            "settings" => Self::Settings,
            _ => exn::bail!(ErrorKind::UnknownKind(s.to_string())),
        })
    }
}
impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The closed vocabulary of category schemes found in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Discriminator category: says what kind of entry this is.
    EntryKind,
    /// User-facing post label.
    PostCategory,
}
impl FromStr for Scheme {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            SCHEME_ENTRY_KIND => Self::EntryKind,
            SCHEME_POST_CATEGORY => Self::PostCategory,
            _ => exn::bail!(ErrorKind::UnknownScheme(s.to_string())),
        })
    }
}

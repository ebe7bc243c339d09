use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::xml::Element;

/// The author embedded in an export entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Author {
    pub name: String,
    pub email: String,
}
impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl From<&Element> for Author {
    fn from(element: &Element) -> Self {
        let mut author = Self::default();
        for child in &element.children {
            match child.name.as_str() {
                "name" => author.name = child.text.clone(),
                "email" => author.email = child.text.clone(),
                // Profile URIs and avatar images.
                _ => {},
            }
        }
        author
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.name)
    }
}

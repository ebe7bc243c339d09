use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::consts::SETTING_ID_PREFIX_REGEX;
use crate::xml::Element;

/// A blog-wide setting. Settings don't share the common entry attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Setting {
    /// Setting name, e.g. `settings.BLOG_NAME`.
    pub name: String,
    pub description: String,
    pub value: String,
}

impl From<&Element> for Setting {
    fn from(element: &Element) -> Self {
        let mut setting = Self::default();
        for child in &element.children {
            match child.name.as_str() {
                "id" => setting.name = SETTING_ID_PREFIX_REGEX.replace(&child.text, "").into_owned(),
                "title" => setting.description = child.text.clone(),
                "content" => setting.value = child.text.clone(),
                _ => {},
            }
        }
        setting
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[Setting] - {}: {}  ({})", self.name, self.value, self.description)
    }
}

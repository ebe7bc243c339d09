use std::collections::BTreeMap;

use exn::OptionExt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::instrument;
use url::Url;

use super::{Author, Scheme};
use crate::error::{ErrorKind, Result};
use crate::xml::Element;

/// Attributes shared by every entry kind except settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub author: Option<Author>,
    /// User-facing labels, in document order.
    pub categories: Vec<String>,
    pub draft: bool,
    pub extended_properties: BTreeMap<String, String>,
    /// Public path of the entry: the alternate link without scheme, host or
    /// `.html` suffix. Empty when the entry has no alternate link.
    pub path: String,
    pub published: OffsetDateTime,
    pub updated: OffsetDateTime,
    pub title: String,
}
impl Header {
    /// A header with the given title and path, timestamped now.
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            title: title.into(),
            path: path.into(),
            ..Self::empty(now)
        }
    }

    fn empty(now: OffsetDateTime) -> Self {
        Self {
            author: None,
            categories: Vec::new(),
            draft: false,
            extended_properties: BTreeMap::new(),
            path: String::new(),
            published: now,
            updated: now,
            title: String::new(),
        }
    }
}

/// A parsed entry: its common attributes plus its raw content markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: Header,
    pub content: String,
}

impl Record {
    /// Walk the children of an `<entry>` and assign attributes by tag.
    #[instrument(level = "trace", skip_all)]
    pub(crate) fn from_element(element: &Element) -> Result<Self> {
        let now = OffsetDateTime::now_utc();
        let mut header = Header::empty(now);
        let mut content = String::new();
        for child in &element.children {
            match child.name.as_str() {
                "author" => header.author = Some(Author::from(child)),
                "category" => {
                    let scheme = child
                        .attribute("scheme")
                        .ok_or_raise(|| ErrorKind::MissingAttribute { element: "category", attribute: "scheme" })?;
                    // The entry kind was already consumed by the discriminator.
                    if scheme.parse::<Scheme>()? == Scheme::PostCategory {
                        let term = child
                            .attribute("term")
                            .ok_or_raise(|| ErrorKind::MissingAttribute { element: "category", attribute: "term" })?;
                        header.categories.push(term.to_string());
                    }
                },
                "content" => content = child.text.clone(),
                "control" => header.draft = is_draft(child),
                "extendedProperty" => {
                    if let (Some(name), Some(value)) = (child.attribute("name"), child.attribute("value")) {
                        header.extended_properties.insert(name.to_string(), value.to_string());
                    }
                },
                "link" => {
                    if child.attribute("rel") == Some("alternate")
                        && let Some(href) = child.attribute("href")
                    {
                        header.path = url_path(href);
                    }
                },
                "published" => header.published = timestamp(child, now),
                "updated" => header.updated = timestamp(child, now),
                "title" => header.title = child.text.clone(),
                "id" | "in-reply-to" | "thumbnail" | "total" => {},
                other => tracing::trace!(tag = other, "Ignoring unknown entry element"),
            }
        }
        Ok(Self { header, content })
    }
}

fn is_draft(control: &Element) -> bool {
    control.children_named("draft").any(|draft| draft.text.trim() == "yes")
}

/// Absent or unparseable timestamps deliberately fall back to "now".
fn timestamp(element: &Element, now: OffsetDateTime) -> OffsetDateTime {
    let Some(text) = element.text() else {
        return now;
    };
    match OffsetDateTime::parse(text.trim(), &Rfc3339) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(tag = %element.name, value = text, error = %e, "Unparseable timestamp; using current time");
            now
        },
    }
}

/// Strip scheme, host and the trailing `.html` from an entry link.
pub(crate) fn url_path(href: &str) -> String {
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.to_string(),
    };
    let path = path.trim_start_matches('/');
    path.strip_suffix(".html").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    fn category(scheme: &str, term: &str) -> Element {
        Element::new("category").with_attribute("scheme", scheme).with_attribute("term", term)
    }

    #[rstest]
    #[case("https://example.blogspot.com/2019/03/hello-world.html", "2019/03/hello-world")]
    #[case("http://example.blogspot.com/p/about.html", "p/about")]
    #[case("https://example.com/2019/03/no-suffix", "2019/03/no-suffix")]
    #[case("https://example.com/2019/03/post.html?m=1", "2019/03/post")]
    #[case("/2019/03/relative.html", "2019/03/relative")]
    fn test_url_path(#[case] href: &str, #[case] expected: &str) {
        assert_eq!(url_path(href), expected);
    }

    #[test]
    fn test_record_from_element() {
        let element = Element::new("entry")
            .with_child(Element::new("id").with_text("tag:blogger.com,1999:blog-1.post-2"))
            .with_child(Element::new("published").with_text("2019-03-10T12:34:56.789-07:00"))
            .with_child(Element::new("updated").with_text("2019-03-11T08:00:00.000-07:00"))
            .with_child(category("http://schemas.google.com/g/2005#kind", "http://schemas.google.com/blogger/2008/kind#post"))
            .with_child(category("http://www.blogger.com/atom/ns#", "rust"))
            .with_child(category("http://www.blogger.com/atom/ns#", "parsing"))
            .with_child(Element::new("title").with_text("Hello"))
            .with_child(Element::new("content").with_attribute("type", "html").with_text("<p>Hi</p>"))
            .with_child(Element::new("link").with_attribute("rel", "replies").with_attribute("href", "https://x/feeds"))
            .with_child(
                Element::new("link")
                    .with_attribute("rel", "alternate")
                    .with_attribute("href", "https://example.blogspot.com/2019/03/hello.html"),
            )
            .with_child(
                Element::new("extendedProperty")
                    .with_attribute("name", "OriginalAuthorName")
                    .with_attribute("value", "Ada"),
            )
            .with_child(Element::new("total").with_text("3"));
        let record = Record::from_element(&element).unwrap();
        assert_eq!(record.content, "<p>Hi</p>");
        assert_eq!(record.header.title, "Hello");
        assert_eq!(record.header.categories, vec!["rust", "parsing"]);
        assert_eq!(record.header.path, "2019/03/hello");
        assert_eq!(record.header.published, datetime!(2019-03-10 12:34:56.789 -7));
        assert_eq!(record.header.updated, datetime!(2019-03-11 08:00:00 -7));
        assert_eq!(record.header.extended_properties.get("OriginalAuthorName").map(String::as_str), Some("Ada"));
        assert!(!record.header.draft);
        assert!(record.header.author.is_none());
    }

    #[test]
    fn test_draft_control() {
        let element = Element::new("entry")
            .with_child(Element::new("control").with_child(Element::new("draft").with_text("yes")));
        assert!(Record::from_element(&element).unwrap().header.draft);
        let element = Element::new("entry")
            .with_child(Element::new("control").with_child(Element::new("draft").with_text("no")));
        assert!(!Record::from_element(&element).unwrap().header.draft);
    }

    #[test]
    fn test_timestamps_default_to_now() {
        let before = OffsetDateTime::now_utc();
        let element = Element::new("entry")
            .with_child(Element::new("published"))
            .with_child(Element::new("updated").with_text("yesterday-ish"));
        let header = Record::from_element(&element).unwrap().header;
        assert!(header.published >= before);
        assert_eq!(header.published, header.updated);
    }

    #[test]
    fn test_unknown_category_scheme_is_fatal() {
        let element = Element::new("entry").with_child(category("http://example.com/labels", "rust"));
        let err = Record::from_element(&element).unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownScheme(_)));
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let element = Element::new("entry")
            .with_child(Element::new("{urn:example}title").with_text("Wrong"))
            .with_child(Element::new("title").with_text("Right"));
        assert_eq!(Record::from_element(&element).unwrap().header.title, "Right");
    }
}

//! Entry discrimination and dispatch.

use exn::{OptionExt, ResultExt};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::{Entry, Kind, Scheme};
use crate::xml::{self, Element};

/// Parse a complete export document into typed entries, in document order.
#[instrument(skip(document), fields(xml_size = document.len(), entries))]
pub fn parse(document: &str) -> Result<Vec<Entry>> {
    let root = xml::parse(document)?;
    let entries = parse_feed(&root)?;
    tracing::Span::current().record("entries", entries.len());
    Ok(entries)
}

/// Parse every `<entry>` child of a `<feed>` element.
pub fn parse_feed(feed: &Element) -> Result<Vec<Entry>> {
    if feed.name != "feed" {
        exn::bail!(ErrorKind::NotAFeed(feed.name.clone()));
    }
    feed.children_named("entry")
        .enumerate()
        .map(|(index, entry)| parse_entry(entry).or_raise(|| entry_error(index, entry)))
        .collect()
}

/// Determine the kind of an entry and build the matching typed record.
pub fn parse_entry(element: &Element) -> Result<Entry> {
    let kind = entry_kind(element)?;
    Entry::build(kind, element)
}

/// Find the single discriminator category of an entry.
///
/// Every category's scheme is validated along the way: the scheme vocabulary
/// is closed, so an unknown one is an error rather than something to skip.
pub fn entry_kind(element: &Element) -> Result<Kind> {
    let mut terms = Vec::new();
    for category in element.children_named("category") {
        let scheme = category
            .attribute("scheme")
            .ok_or_raise(|| ErrorKind::MissingAttribute { element: "category", attribute: "scheme" })?;
        if scheme.parse::<Scheme>()? == Scheme::EntryKind {
            let term = category
                .attribute("term")
                .ok_or_raise(|| ErrorKind::MissingAttribute { element: "category", attribute: "term" })?;
            terms.push(term);
        }
    }
    match terms.as_slice() {
        [term] => Kind::from_term(term),
        [] => exn::bail!(ErrorKind::MissingKind),
        _ => exn::bail!(ErrorKind::AmbiguousKind(terms.iter().map(|t| t.to_string()).collect())),
    }
}

/// Wrap an entry failure with something a human can find in the export.
fn entry_error(index: usize, entry: &Element) -> ErrorKind {
    let id = entry.children_named("id").next().map(|id| id.text.clone()).unwrap_or_else(|| format!("#{index}"));
    ErrorKind::InvalidEntry(id)
}

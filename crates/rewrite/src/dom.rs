//! Small helpers for editing a parsed [`Html`] tree in place.
//!
//! Passes collect the ids of the nodes they want to change first and edit
//! afterwards, so no selection iterator is alive while the tree is mutated.

use ego_tree::NodeId;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use scraper::node::{Element, Text};
use scraper::{Html, Node, Selector};
use tendril::StrTendril;
use url::Url;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A new HTML element with the given attributes.
pub(crate) fn element<'a>(name: &str, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Element {
    let attributes = attributes
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
            value: StrTendril::from(value),
        })
        .collect();
    Element::new(QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(name)), attributes)
}

/// A new text node.
pub(crate) fn text(content: &str) -> Node {
    Node::Text(Text {
        text: StrTendril::from(content),
    })
}

/// Copy of `original` named `name`, with every attribute listed in `edits`
/// either replaced (`Some`) or removed (`None`).
pub(crate) fn rebuild<'a>(original: &'a Element, name: &str, edits: &[(&'a str, Option<&'a str>)]) -> Element {
    let mut attributes: Vec<(&str, &str)> =
        original.attrs().filter(|(attribute, _)| !edits.iter().any(|(edited, _)| edited == attribute)).collect();
    attributes.extend(edits.iter().filter_map(|(attribute, value)| value.map(|value| (*attribute, value))));
    element(name, attributes)
}

/// Ids of every element matching `selector`, in document order.
pub(crate) fn select_ids(html: &Html, selector: &Selector) -> Vec<NodeId> {
    html.select(selector).map(|element| element.id()).collect()
}

/// The element stored at `id`, if that node is an element.
pub(crate) fn element_at(html: &Html, id: NodeId) -> Option<&Element> {
    match html.tree.get(id)?.value() {
        Node::Element(element) => Some(element),
        _ => None,
    }
}

/// Id of the parent of `id`, when that parent is an element named `name`.
pub(crate) fn parent_named(html: &Html, id: NodeId, name: &str) -> Option<NodeId> {
    let parent = html.tree.get(id)?.parent()?;
    match parent.value() {
        Node::Element(element) if element.name() == name => Some(parent.id()),
        _ => None,
    }
}

/// Swap the element at `id` for `replacement`, keeping its children and
/// position.
pub(crate) fn replace_element(html: &mut Html, id: NodeId, replacement: Element) {
    if let Some(mut node) = html.tree.get_mut(id) {
        *node.value() = Node::Element(replacement);
    }
}

/// Put `replacement` (with `children` appended to it) where the node `id`
/// is, and drop the node along with its subtree.
///
/// Returns `false` when the node is no longer attached to the document.
pub(crate) fn substitute(
    html: &mut Html,
    id: NodeId,
    replacement: Element,
    children: impl IntoIterator<Item = Node>,
) -> bool {
    let Some(mut target) = html.tree.get_mut(id) else {
        return false;
    };
    if target.parent().is_none() {
        return false;
    }
    let mut inserted = target.insert_before(Node::Element(replacement));
    for child in children {
        inserted.append(child);
    }
    target.detach();
    true
}

/// Lowercase host of an absolute URL.
pub(crate) fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_ascii_lowercase)
}

/// Whether `url` is served from `host`, ignoring case.
pub(crate) fn has_host(url: &str, host: &str) -> bool {
    host_of(url).is_some_and(|actual| actual.eq_ignore_ascii_case(host))
}

/// Whether `url` is an absolute `http` or `https` URL.
pub(crate) fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fragment(source: &str) -> Html {
        Html::parse_fragment(source)
    }

    fn serialize(html: &Html) -> String {
        html.root_element().inner_html()
    }

    #[test]
    fn test_replace_element_keeps_children() {
        let mut html = fragment(r#"<p>a<span id="x">b<i>c</i></span>d</p>"#);
        let id = select_ids(&html, &Selector::parse("span").unwrap())[0];
        let replacement = rebuild(element_at(&html, id).unwrap(), "div", &[("id", None), ("class", Some("y"))]);
        replace_element(&mut html, id, replacement);
        assert_eq!(serialize(&html), r#"<p>a<div class="y">b<i>c</i></div>d</p>"#);
    }

    #[test]
    fn test_substitute_drops_subtree() {
        let mut html = fragment(r#"<p>a<a href="x"><img src="y"></a>b</p>"#);
        let id = select_ids(&html, &Selector::parse("a").unwrap())[0];
        assert!(substitute(&mut html, id, element("app-latex", []), [text("x^2")]));
        assert!(!substitute(&mut html, id, element("app-latex", []), [text("x^2")]));
        assert_eq!(serialize(&html), "<p>a<app-latex>x^2</app-latex>b</p>");
    }

    #[test]
    fn test_text_is_escaped_on_output() {
        let mut html = fragment("<p>x</p>");
        let id = select_ids(&html, &Selector::parse("p").unwrap())[0];
        substitute(&mut html, id, element("app-latex", []), [text("a<b & c")]);
        assert_eq!(serialize(&html), "<app-latex>a&lt;b &amp; c</app-latex>");
    }

    #[test]
    fn test_parent_named() {
        let html = fragment(r#"<a href="x"><img src="y"></a><p><img src="z"></p>"#);
        let images = select_ids(&html, &Selector::parse("img").unwrap());
        assert!(parent_named(&html, images[0], "a").is_some());
        assert!(parent_named(&html, images[1], "a").is_none());
    }

    #[rstest]
    #[case("https://I.Imgur.com/abc.jpg", Some("i.imgur.com"))]
    #[case("http://latex.codecogs.com/gif.latex?x", Some("latex.codecogs.com"))]
    #[case("images/abc.jpg", None)]
    #[case("", None)]
    fn test_host_of(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(host_of(url).as_deref(), expected);
    }

    #[rstest]
    #[case("https://example.com/a.png", true)]
    #[case("http://example.com/a.png", true)]
    #[case("data:image/png;base64,AAAA", false)]
    #[case("/images/a.png", false)]
    #[case("images/a.png", false)]
    fn test_is_web_url(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_web_url(url), expected);
    }
}

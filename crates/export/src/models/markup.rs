use scraper::Html;

/// Post content, either as the source string or as a parsed HTML tree.
///
/// The tree is built at most once. While a tree is held, the source string
/// is stale: [`commit`](Self::commit) must be called to serialize the tree
/// back before the content string can be read again.
#[derive(Debug, Clone)]
pub enum Markup {
    Source(String),
    Tree(Html),
}
impl Markup {
    /// The content string, or `None` while a parsed tree has not been
    /// committed.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Source(source) => Some(source),
            Self::Tree(_) => None,
        }
    }

    /// Mutable access to the parsed tree, parsing the source on first use.
    pub fn tree_mut(&mut self) -> &mut Html {
        if let Self::Source(source) = self {
            *self = Self::Tree(Html::parse_fragment(source));
        }
        match self {
            Self::Tree(tree) => tree,
            Self::Source(_) => unreachable!("markup was parsed above"),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Tree(_))
    }

    /// Serialize the tree back into the source string.
    ///
    /// A no-op when the markup was never parsed, so untouched content is
    /// kept byte-for-byte.
    pub fn commit(&mut self) -> &str {
        if let Self::Tree(tree) = self {
            *self = Self::Source(tree.root_element().inner_html());
        }
        match self {
            Self::Source(source) => source,
            Self::Tree(_) => unreachable!("markup was committed above"),
        }
    }
}
impl From<String> for Markup {
    fn from(source: String) -> Self {
        Self::Source(source)
    }
}
impl Default for Markup {
    fn default() -> Self {
        Self::Source(String::new())
    }
}

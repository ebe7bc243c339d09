use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Namespaces whose element names are reduced to their bare local name.
pub(crate) const KNOWN_NAMESPACES: [&str; 5] = [
    // Atom
    "http://www.w3.org/2005/Atom",
    // Google Data (settings, extended properties)
    "http://schemas.google.com/g/2005",
    // Atom threading (in-reply-to, total)
    "http://purl.org/syndication/thread/1.0",
    // Atom publishing control (draft flag)
    "http://purl.org/atom/app#",
    // Media RSS (thumbnails)
    "http://search.yahoo.com/mrss/",
];

pub(crate) const SCHEME_ENTRY_KIND: &str = "http://schemas.google.com/g/2005#kind";
pub(crate) const SCHEME_POST_CATEGORY: &str = "http://www.blogger.com/atom/ns#";
pub(crate) const KIND_TERM_PREFIX: &str = "http://schemas.google.com/blogger/2008/kind#";

// Setting ids look like "tag:blogger.com,1999:blog-1234567890.settings.BLOG_NAME".
regex!(SETTING_ID_PREFIX_REGEX, r"^tag:blogger\.com,1999:blog-\d+\.");

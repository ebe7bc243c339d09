use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

pub(crate) const DEFAULT_PHOTO_HOSTS: [&str; 1] = ["imgur.com"];
pub(crate) const DEFAULT_MATH_HOST: &str = "latex.codecogs.com";
pub(crate) const DEFAULT_MATH_LINK_HOST: &str = "www.codecogs.com";

pub(crate) const GIST_ELEMENT: &str = "app-gist-container";
pub(crate) const MATH_ELEMENT: &str = "app-latex";
pub(crate) const READMORE_ID: &str = "readmore";
pub(crate) const READMORE_CLASS: &str = "readmore";

/// Rendering directives that only mattered to the remote renderer.
pub(crate) const MATH_NOISE: [&str; 4] = [r"\bg_black", "&space;", r"\color{White}", r"\small"];
/// Commands that must be separated from whatever follows them.
pub(crate) const MATH_SPACED_COMMANDS: [&str; 2] = [r"\Delta", r"\rho"];

selector!(SCRIPT_SELECTOR, "script[src]");
regex!(GIST_SRC_REGEX, r"^https://gist\.github\.com/[^/]+/([0-9a-f]+)\.js$");
selector!(IMAGE_SELECTOR, "img[src]");
// Blogger encodes the rendition size as a path segment, e.g. `/s220/`.
regex!(SIZE_SEGMENT_REGEX, r"/s\d+/");
pub(crate) const FULL_SIZE_SEGMENT: &str = "/s1600/";
pub(crate) const FULL_SIZE_LINK_SEGMENT: &str = "/s1600-h/";
selector!(READMORE_SELECTOR, r#"[id="readmore"]"#);

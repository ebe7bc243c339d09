//! The "read more" marker Blogger inserts between a post's teaser and its
//! body.

use scraper::Html;

use crate::consts::{READMORE_CLASS, READMORE_SELECTOR};
use crate::dom::{element_at, rebuild, replace_element, select_ids};

/// Turn every `readmore` marker into `<div class="readmore">`, in place.
pub(crate) fn rewrite(html: &mut Html) -> usize {
    let mut replaced = 0;
    for id in select_ids(html, &READMORE_SELECTOR) {
        let Some(marker) = element_at(html, id) else {
            continue;
        };
        let replacement = rebuild(marker, "div", &[("id", None), ("class", Some(READMORE_CLASS))]);
        replace_element(html, id, replacement);
        replaced += 1;
    }
    replaced
}

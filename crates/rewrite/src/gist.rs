//! Code embeds: gist `<script>` tags become placeholder elements the site
//! renders itself.

use scraper::Html;

use crate::consts::{GIST_ELEMENT, GIST_SRC_REGEX, SCRIPT_SELECTOR};
use crate::dom::{element, element_at, replace_element, select_ids};

/// Replace every gist embed script, returning how many were replaced.
pub(crate) fn rewrite(html: &mut Html) -> usize {
    let mut replaced = 0;
    for id in select_ids(html, &SCRIPT_SELECTOR) {
        let Some(src) = element_at(html, id).and_then(|script| script.attr("src")) else {
            continue;
        };
        let Some(code) = GIST_SRC_REGEX.captures(src).and_then(|captures| captures.get(1)) else {
            continue;
        };
        let id_value = format!("gist-{}", code.as_str());
        let container = element(GIST_ELEMENT, [("id", id_value.as_str()), ("src", src)]);
        replace_element(html, id, container);
        tracing::debug!(gist = %id_value, "Replaced gist embed");
        replaced += 1;
    }
    replaced
}

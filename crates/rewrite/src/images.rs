//! Remote images: every image is copied into the asset cache and the markup
//! is pointed at the cached copy.

use blogmill_assets::AssetCache;
use exn::ResultExt;
use scraper::Html;

use crate::consts::{FULL_SIZE_LINK_SEGMENT, FULL_SIZE_SEGMENT, IMAGE_SELECTOR, SIZE_SEGMENT_REGEX};
use crate::dom::{element_at, has_host, is_web_url, parent_named, rebuild, replace_element, select_ids};
use crate::error::{ErrorKind, Result};
use crate::{FetchPolicy, Options, Report};

/// The full-size rendition of a Blogger image, and the spelling Blogger uses
/// when linking to it.
pub fn full_size(src: &str) -> (String, String) {
    (
        SIZE_SEGMENT_REGEX.replace_all(src, FULL_SIZE_SEGMENT).into_owned(),
        SIZE_SEGMENT_REGEX.replace_all(src, FULL_SIZE_LINK_SEGMENT).into_owned(),
    )
}

pub(crate) fn rewrite(html: &mut Html, cache: &AssetCache, options: &Options, report: &mut Report) -> Result<()> {
    for id in select_ids(html, &IMAGE_SELECTOR) {
        let Some(src) = element_at(html, id).and_then(|image| image.attr("src")) else {
            continue;
        };
        // Relative sources are either local already or unresolvable.
        if !is_web_url(src) {
            continue;
        }
        if has_host(src, &options.math_host) {
            continue;
        }
        let src = src.to_string();
        let (download, link_alternative) = full_size(&src);

        let asset = match cache.materialize(&src, &download) {
            Ok(asset) => asset,
            // Only download failures are skippable; a broken store is not.
            Err(err) if options.on_fetch_error == FetchPolicy::Skip && err.is_fetch() => {
                tracing::warn!(src = %src, error = %err, "Could not cache image, keeping the remote source");
                report.images_skipped += 1;
                continue;
            },
            Err(err) => return Err(err).or_raise(|| ErrorKind::Asset(src)),
        };
        match asset.fetched {
            true => report.images_fetched += 1,
            false => report.images_reused += 1,
        }

        if let Some(image) = element_at(html, id) {
            let replacement = rebuild(image, "img", &[("src", Some(asset.reference.as_str()))]);
            replace_element(html, id, replacement);
        }

        let Some(link) = parent_named(html, id, "a") else {
            continue;
        };
        let Some(anchor) = element_at(html, link) else {
            continue;
        };
        let links_to_image = anchor.attr("href").is_some_and(|href| {
            href == download
                || href == link_alternative
                || options.photo_hosts.iter().any(|photo| has_host(href, photo))
        });
        if links_to_image {
            let replacement = rebuild(anchor, "a", &[("href", Some(asset.reference.as_str()))]);
            replace_element(html, link, replacement);
        }
    }
    Ok(())
}

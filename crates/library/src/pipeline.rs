use std::fs;
use std::ops::AddAssign;

use blogmill_assets::{AssetCache, FetcherHandle, StoreHandle};
use blogmill_config::{Config, OnFetchError, RewriteConfig};
use blogmill_rewrite::{FetchPolicy, Options, Report, Rewriter};
use exn::ResultExt;

use crate::collection::Collection;
use crate::error::{ErrorKind, Result};
use crate::output;

/// Totals for a complete run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Published posts found in the export.
    pub posts: usize,
    /// Rows written to the summary.
    pub summarized: usize,
    /// Post documents written.
    pub written: usize,
    pub rewrite: Report,
}
impl AddAssign<Report> for RunReport {
    fn add_assign(&mut self, report: Report) {
        self.rewrite += report;
    }
}

/// Rewrite options for the configured hosts and fetch policy.
pub fn rewrite_options(config: &RewriteConfig) -> Options {
    Options {
        photo_hosts: config.photo_hosts.clone(),
        math_host: config.math_host.clone(),
        math_link_host: config.math_link_host.clone(),
        on_fetch_error: match config.on_fetch_error {
            OnFetchError::Abort => FetchPolicy::Abort,
            OnFetchError::Skip => FetchPolicy::Skip,
        },
    }
}

/// Convert the configured export into JSON documents, caching images in
/// `store` and downloading missing ones through `fetcher`.
///
/// Nothing is written until the export has been parsed and its post ids
/// checked for collisions.
#[tracing::instrument(skip_all, fields(export = %config.export.display()))]
pub fn run(config: &Config, store: StoreHandle, fetcher: FetcherHandle) -> Result<RunReport> {
    let document = fs::read_to_string(&config.export).or_raise(|| ErrorKind::Read(config.export.clone()))?;
    let entries = blogmill_export::parse(&document).or_raise(|| ErrorKind::Export)?;
    let mut collection = Collection::from_entries(entries)?;
    tracing::info!(posts = collection.len(), "Collected published posts");

    let data_dir = &config.output.data_dir;
    output::prepare(data_dir)?;

    let cache = AssetCache::with_prefix(store, fetcher, &config.output.image_prefix);
    let rewriter = Rewriter::new(cache, rewrite_options(&config.rewrite));
    let mut report = RunReport {
        posts: collection.len(),
        ..RunReport::default()
    };
    for post in collection.posts_mut() {
        tracing::info!(%post, "Processing");
        report += rewriter.rewrite(post).or_raise(|| ErrorKind::Rewrite(post.id().to_string()))?;
        post.commit();
    }

    report.summarized = output::write_summary(data_dir, collection.posts())?;
    for post in collection.posts() {
        output::write_post(data_dir, post)?;
        report.written += 1;
    }

    tracing::info!(
        posts = report.posts,
        written = report.written,
        images_fetched = report.rewrite.images_fetched,
        images_reused = report.rewrite.images_reused,
        images_skipped = report.rewrite.images_skipped,
        math = report.rewrite.math,
        embeds = report.rewrite.embeds,
        "Finished"
    );
    Ok(report)
}

//! Content rewrite passes for exported posts.
//!
//! A [`Rewriter`] runs four passes over a post's parsed markup, always in
//! the same order and always on the same tree:
//!
//! 1. gist embed scripts become `<app-gist-container>` placeholders,
//! 2. images served by the math renderer become `<app-latex>` elements,
//! 3. every other remote image is cached locally and re-pointed,
//! 4. `readmore` markers become `<div class="readmore">`.
//!
//! Math runs before images so equations are recognised by their original
//! remote URL. The caller commits the post afterwards.

mod consts;
mod dom;
pub mod error;
mod gist;
mod images;
mod math;
mod readmore;

use std::ops::AddAssign;

use blogmill_assets::AssetCache;
use blogmill_export::models::Post;

use crate::consts::{DEFAULT_MATH_HOST, DEFAULT_MATH_LINK_HOST, DEFAULT_PHOTO_HOSTS};
use crate::error::Result;
pub use crate::images::full_size;
pub use crate::math::clean_expression;

/// What to do when a remote image cannot be cached.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log a warning and keep the remote source in the markup.
    Skip,
}

/// Host names the passes use to recognise special content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Links to these hosts around an image are re-pointed at the cached copy.
    pub photo_hosts: Vec<String>,
    /// Images served from this host are rendered equations.
    pub math_host: String,
    /// Links to this host around an equation are dropped with it.
    pub math_link_host: String,
    pub on_fetch_error: FetchPolicy,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            photo_hosts: DEFAULT_PHOTO_HOSTS.iter().map(ToString::to_string).collect(),
            math_host: DEFAULT_MATH_HOST.to_string(),
            math_link_host: DEFAULT_MATH_LINK_HOST.to_string(),
            on_fetch_error: FetchPolicy::default(),
        }
    }
}

/// Counts of what the passes changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub embeds: usize,
    pub math: usize,
    pub images_fetched: usize,
    pub images_reused: usize,
    pub images_skipped: usize,
    pub read_more: usize,
}
impl AddAssign for Report {
    fn add_assign(&mut self, other: Self) {
        self.embeds += other.embeds;
        self.math += other.math;
        self.images_fetched += other.images_fetched;
        self.images_reused += other.images_reused;
        self.images_skipped += other.images_skipped;
        self.read_more += other.read_more;
    }
}

pub struct Rewriter {
    cache: AssetCache,
    options: Options,
}
impl Rewriter {
    pub fn new(cache: AssetCache, options: Options) -> Self {
        Self { cache, options }
    }

    /// Run every pass over the post's markup.
    ///
    /// The post is left holding its edited tree; call
    /// [`Post::commit`] to get the rewritten content back.
    ///
    /// # Errors
    ///
    /// Fails only when an image cannot be cached and the policy is
    /// [`FetchPolicy::Abort`]. Passes that already ran keep their edits.
    #[tracing::instrument(level = "debug", skip_all, fields(post = %post.id()))]
    pub fn rewrite(&self, post: &mut Post) -> Result<Report> {
        let html = post.markup_mut();
        let mut report = Report {
            embeds: gist::rewrite(html),
            math: math::rewrite(html, &self.options),
            ..Report::default()
        };
        images::rewrite(html, &self.cache, &self.options, &mut report)?;
        report.read_more = readmore::rewrite(html);
        tracing::debug!(?report, "Rewrote post");
        Ok(report)
    }
}

//! JSON documents written for the site: one summary of every post, and one
//! document per post.

use std::fs;
use std::path::{Path, PathBuf};

use blogmill_export::models::Post;
use exn::{OptionExt, ResultExt};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::{ErrorKind, Result};

pub const SUMMARY_FILE: &str = "summary.json";
pub const POSTS_DIR: &str = "posts";

/// One row of `summary.json`.
#[derive(Debug, Serialize)]
pub struct PostSummary<'a> {
    pub title: &'a str,
    pub id: &'a str,
    pub published: String,
    /// Length of the rewritten content, in characters.
    pub length: usize,
    pub categories: &'a [String],
}
impl<'a> PostSummary<'a> {
    pub fn new(post: &'a Post) -> Result<Self> {
        Ok(Self {
            title: post.title(),
            id: post.id(),
            published: timestamp(post.header.published)?,
            length: content(post)?.chars().count(),
            categories: &post.header.categories,
        })
    }
}

/// The contents of `posts/<id>.json`.
#[derive(Debug, Serialize)]
pub struct PostDocument<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub published: String,
    pub updated: String,
    pub draft: bool,
    pub categories: &'a [String],
}
impl<'a> PostDocument<'a> {
    pub fn new(post: &'a Post) -> Result<Self> {
        Ok(Self {
            id: post.id(),
            title: post.title(),
            content: content(post)?,
            published: timestamp(post.header.published)?,
            updated: timestamp(post.header.updated)?,
            draft: post.is_draft(),
            categories: &post.header.categories,
        })
    }
}

fn content(post: &Post) -> Result<&str> {
    post.content().ok_or_raise(|| ErrorKind::Uncommitted(post.id().to_string()))
}

fn timestamp(at: OffsetDateTime) -> Result<String> {
    at.format(&Rfc3339).or_raise(|| ErrorKind::Serialize)
}

/// Create the data directory and its `posts/` sub-directory.
pub fn prepare(data_dir: &Path) -> Result<()> {
    let posts = data_dir.join(POSTS_DIR);
    fs::create_dir_all(&posts).or_raise(|| ErrorKind::Write(posts))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_vec(value).or_raise(|| ErrorKind::Serialize)?;
    fs::write(&path, json).or_raise(|| ErrorKind::Write(path.clone()))?;
    tracing::debug!(path = %path.display(), "Wrote JSON document");
    Ok(())
}

/// Write `summary.json` for every post that has a path.
///
/// Returns the number of rows written.
pub fn write_summary(data_dir: &Path, posts: &[Post]) -> Result<usize> {
    let rows = posts
        .iter()
        .filter(|post| !post.header.path.is_empty())
        .map(PostSummary::new)
        .collect::<Result<Vec<_>>>()?;
    write_json(data_dir.join(SUMMARY_FILE), &rows)?;
    Ok(rows.len())
}

/// Write `posts/<id>.json` for a single post.
///
/// A post without a path has an empty id and lands in `posts/.json`.
pub fn write_post(data_dir: &Path, post: &Post) -> Result<()> {
    if post.id().is_empty() {
        tracing::warn!(title = post.title(), "Post has no path, writing it as posts/.json");
    }
    let path = data_dir.join(POSTS_DIR).join(format!("{}.json", post.id()));
    write_json(path, &PostDocument::new(post)?)
}

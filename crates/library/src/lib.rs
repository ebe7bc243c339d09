//! The blogmill pipeline.
//!
//! [`run`] reads a Blogger export, keeps its published posts, rewrites their
//! markup and writes the JSON documents the site is built from:
//!
//! - `<data dir>/summary.json`, one compact row per post,
//! - `<data dir>/posts/<id>.json`, one document per post.
//!
//! Images referenced by the posts end up in the asset store passed to
//! [`run`], named after their source URL so later runs reuse them.

mod collection;
pub mod error;
pub mod output;
mod pipeline;

pub use crate::collection::Collection;
pub use crate::pipeline::{RunReport, rewrite_options, run};

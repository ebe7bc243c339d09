//! Typed records from a Blogger export feed.
//!
//! A Blogger export is a single Atom feed whose entries mix posts, pages,
//! comments, templates and blog settings. Each entry declares its kind
//! through a discriminator `<category>`; [`parse`] reads the feed, checks
//! that discriminator and builds the matching [`Entry`](models::Entry)
//! variant.
//!
//! ```rust
//! use blogmill_export::models::Kind;
//! let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
//!   <entry>
//!     <category scheme="http://schemas.google.com/g/2005#kind"
//!               term="http://schemas.google.com/blogger/2008/kind#post"/>
//!     <title>Hello</title>
//!     <link rel="alternate" href="https://example.blogspot.com/2020/01/hello.html"/>
//!   </entry>
//! </feed>"#;
//! let entries = blogmill_export::parse(xml).unwrap();
//! assert_eq!(entries[0].kind(), Kind::Post);
//! assert_eq!(entries[0].to_string(), "[Post] - Hello");
//! ```

mod consts;
pub mod error;
pub mod models;
mod parse;
pub mod xml;

pub use crate::parse::{entry_kind, parse, parse_entry, parse_feed};

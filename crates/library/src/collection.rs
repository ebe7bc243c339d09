//! The set of posts that get published.

use std::collections::HashSet;

use blogmill_export::models::{Entry, Post};

use crate::error::{ErrorKind, Result};

/// Published posts in chronological order, with unique ids.
#[derive(Debug, Default)]
pub struct Collection {
    posts: Vec<Post>,
}
impl Collection {
    /// Keep the posts among `entries`, oldest first, without drafts.
    ///
    /// Posts published at the same instant keep their order from the
    /// export.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::DuplicateId`] when two published posts share an id,
    /// including two posts that both lack a path.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self> {
        let mut posts: Vec<Post> = entries.into_iter().filter_map(Entry::into_post).collect();
        posts.sort_by_key(|post| post.header.published);
        posts.retain(|post| !post.is_draft());

        let mut seen = HashSet::new();
        for post in &posts {
            if !seen.insert(post.id()) {
                exn::bail!(ErrorKind::DuplicateId(post.id().to_string()));
            }
        }
        Ok(Self { posts })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut [Post] {
        &mut self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogmill_export::models::{Header, Record};
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn post(path: &str, published: OffsetDateTime, draft: bool) -> Entry {
        let mut header = Header::new(path, path);
        header.published = published;
        header.draft = draft;
        Entry::Post(Post::new(header, ""))
    }

    fn page(path: &str) -> Entry {
        Entry::Page(Record {
            header: Header::new(path, path),
            content: String::new(),
        })
    }

    fn ids(collection: &Collection) -> Vec<&str> {
        collection.posts().iter().map(Post::id).collect()
    }

    #[test]
    fn test_posts_are_sorted_chronologically() {
        let collection = Collection::from_entries([
            post("2020/02/second", datetime!(2020-02-01 0:00 UTC), false),
            page("p/about"),
            post("2020/01/first", datetime!(2020-01-01 0:00 UTC), false),
            post("2020/03/third", datetime!(2020-03-01 0:00 UTC), false),
        ])
        .unwrap();
        assert_eq!(ids(&collection), ["first", "second", "third"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let at = datetime!(2020-01-01 0:00 UTC);
        let collection = Collection::from_entries([post("a/b", at, false), post("a/a", at, false)]).unwrap();
        assert_eq!(ids(&collection), ["b", "a"]);
    }

    #[test]
    fn test_drafts_are_dropped() {
        let collection = Collection::from_entries([
            post("2020/01/live", datetime!(2020-01-01 0:00 UTC), false),
            post("2020/01/draft", datetime!(2020-01-02 0:00 UTC), true),
        ])
        .unwrap();
        assert_eq!(ids(&collection), ["live"]);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let err = Collection::from_entries([
            post("2019/01/hello", datetime!(2019-01-01 0:00 UTC), false),
            post("2020/01/hello", datetime!(2020-01-01 0:00 UTC), false),
        ])
        .unwrap_err();
        assert!(matches!(&*err, ErrorKind::DuplicateId(id) if id == "hello"));
    }

    #[test]
    fn test_duplicate_draft_is_not_a_conflict() {
        let collection = Collection::from_entries([
            post("2019/01/hello", datetime!(2019-01-01 0:00 UTC), false),
            post("2020/01/hello", datetime!(2020-01-01 0:00 UTC), true),
        ])
        .unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_empty_ids_conflict() {
        let err = Collection::from_entries([
            post("", datetime!(2019-01-01 0:00 UTC), false),
            post("", datetime!(2020-01-01 0:00 UTC), false),
        ])
        .unwrap_err();
        assert!(matches!(&*err, ErrorKind::DuplicateId(id) if id.is_empty()));
    }

    #[test]
    fn test_single_empty_id_is_kept() {
        let collection = Collection::from_entries([
            post("", datetime!(2019-01-01 0:00 UTC), false),
            post("2020/01/named", datetime!(2020-01-01 0:00 UTC), false),
        ])
        .unwrap();
        assert_eq!(ids(&collection), ["", "named"]);
    }
}

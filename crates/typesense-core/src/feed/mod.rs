//! Feed assembly - merge, filter and order posts for a list view
//!
//! Fetching the raw sources is the caller's job; everything here is pure.

use std::cmp::Ordering;

use serde_json::Value;

use crate::entities::Post;
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Which posts a feed shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// Every post
    All,
    /// Posts by the requesting user; `None` when nobody is signed in
    Mine(Option<UserId>),
}

impl FeedScope {
    fn admits(&self, post: &Post) -> bool {
        match self {
            Self::All => true,
            Self::Mine(Some(user)) => post.is_authored_by(user),
            Self::Mine(None) => false,
        }
    }
}

/// Concatenate sources in order, apply the scope, sort newest first
///
/// The sort is stable: posts with equal timestamps keep their source order,
/// and posts without a readable timestamp go last. Duplicates are kept.
pub fn assemble<I>(scope: &FeedScope, sources: I) -> Vec<Post>
where
    I: IntoIterator<Item = Vec<Post>>,
{
    if scope == &FeedScope::Mine(None) {
        return Vec::new();
    }

    let mut keyed: Vec<_> = sources
        .into_iter()
        .flatten()
        .filter(|post| scope.admits(post))
        .map(|post| (post.created_instant(), post))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| newest_first(a.as_ref(), b.as_ref()));

    keyed.into_iter().map(|(_, post)| post).collect()
}

fn newest_first<T: Ord>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Decode raw stored records into posts
///
/// Records that do not decode are returned separately with their key so the
/// caller can report them; they never fail the whole batch.
pub fn decode_posts(records: Vec<(String, Value)>) -> (Vec<Post>, Vec<DomainError>) {
    let mut posts = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for (key, value) in records {
        match serde_json::from_value::<Post>(value) {
            Ok(post) => posts.push(post),
            Err(e) => rejected.push(DomainError::CorruptRecord {
                key,
                reason: e.to_string(),
            }),
        }
    }
    (posts, rejected)
}

//! Reaction set - per-post emoji buckets with one vote per user
//!
//! A bucket's count is never stored independently; it is the size of its
//! user set, and a bucket whose set becomes empty is removed.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value_objects::{Emoji, UserId};

/// Users who reacted to a post with one emoji
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionBucket<'a> {
    emoji: &'a Emoji,
    users: &'a BTreeSet<UserId>,
}

impl<'a> ReactionBucket<'a> {
    #[inline]
    pub fn emoji(&self) -> &'a Emoji {
        self.emoji
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.users.len()
    }

    pub fn users(&self) -> impl Iterator<Item = &'a UserId> {
        self.users.iter()
    }

    pub fn contains(&self, user: &UserId) -> bool {
        self.users.contains(user)
    }
}

/// What a toggle did to the acting user's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// All reaction buckets of one post, keyed by emoji
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSet {
    buckets: BTreeMap<Emoji, BTreeSet<UserId>>,
}

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: the set after `user` toggles `emoji`
    pub fn toggle(&self, emoji: &Emoji, user: &UserId) -> Self {
        let mut next = self.clone();
        next.toggle_in_place(emoji, user);
        next
    }

    /// Toggle `user`'s vote on `emoji`
    pub fn toggle_in_place(&mut self, emoji: &Emoji, user: &UserId) -> ToggleOutcome {
        match self.buckets.get_mut(emoji) {
            None => {
                self.buckets
                    .insert(emoji.clone(), BTreeSet::from([user.clone()]));
                ToggleOutcome::Added
            }
            Some(users) => {
                if users.remove(user) {
                    if users.is_empty() {
                        self.buckets.remove(emoji);
                    }
                    ToggleOutcome::Removed
                } else {
                    users.insert(user.clone());
                    ToggleOutcome::Added
                }
            }
        }
    }

    pub fn bucket(&self, emoji: &Emoji) -> Option<ReactionBucket<'_>> {
        self.buckets
            .get_key_value(emoji)
            .map(|(emoji, users)| ReactionBucket { emoji, users })
    }

    /// Buckets in emoji order
    pub fn buckets(&self) -> impl Iterator<Item = ReactionBucket<'_>> {
        self.buckets
            .iter()
            .map(|(emoji, users)| ReactionBucket { emoji, users })
    }

    pub fn has_reacted(&self, emoji: &Emoji, user: &UserId) -> bool {
        self.buckets
            .get(emoji)
            .is_some_and(|users| users.contains(user))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Sum of all bucket counts
    pub fn total(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }
}

// ----------------------------------------------------------------------------
// Storage representation
// ----------------------------------------------------------------------------

#[derive(Serialize)]
struct BucketOut<'a> {
    emoji: &'a Emoji,
    count: usize,
    users: &'a BTreeSet<UserId>,
}

/// Written as an array of `{emoji, count, users}` in emoji order
impl Serialize for ReactionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.buckets.iter().map(|(emoji, users)| BucketOut {
            emoji,
            count: users.len(),
            users,
        }))
    }
}

#[derive(Deserialize)]
struct BucketIn {
    emoji: String,
    #[serde(default)]
    users: Vec<String>,
}

#[derive(Deserialize)]
struct BucketBodyIn {
    #[serde(default)]
    users: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredReactions {
    List(Vec<BucketIn>),
    Map(BTreeMap<String, BucketBodyIn>),
}

/// Reads either the array layout or an emoji-keyed map
///
/// Stored counts are ignored and recomputed from the user lists; buckets
/// without users are dropped.
impl<'de> Deserialize<'de> for ReactionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(String, Vec<String>)> = match StoredReactions::deserialize(deserializer)? {
            StoredReactions::List(list) => list.into_iter().map(|b| (b.emoji, b.users)).collect(),
            StoredReactions::Map(map) => map.into_iter().map(|(e, b)| (e, b.users)).collect(),
        };

        let mut buckets: BTreeMap<Emoji, BTreeSet<UserId>> = BTreeMap::new();
        for (emoji, users) in entries {
            let emoji = Emoji::new(emoji).map_err(D::Error::custom)?;
            let users = users
                .into_iter()
                .map(UserId::new)
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(D::Error::custom)?;
            if users.is_empty() {
                continue;
            }
            buckets.entry(emoji).or_default().extend(users);
        }
        Ok(Self { buckets })
    }
}

//! Feed service
//!
//! Fetches every configured post namespace, then hands the raw sources to
//! the pure aggregator. A failed fetch degrades the whole round to an empty
//! feed that says why.

use futures::future::try_join_all;
use tracing::{error, instrument, warn};
use typesense_core::keys::{LEGACY_POST_PREFIX, POST_PREFIX};
use typesense_core::{assemble, decode_posts, FeedScope, Post};

use crate::dto::FeedResponse;

use super::context::ServiceContext;

pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Namespaces merged into a feed, primary first
    fn sources(&self) -> Vec<&'static str> {
        let mut prefixes = vec![POST_PREFIX];
        if self.ctx.settings().include_legacy_posts {
            prefixes.push(LEGACY_POST_PREFIX);
        }
        prefixes
    }

    /// Assemble the feed for `scope`
    #[instrument(skip(self))]
    pub async fn list(&self, scope: FeedScope) -> FeedResponse {
        if scope == FeedScope::Mine(None) {
            return FeedResponse::ok(Vec::new());
        }

        let store = self.ctx.store();
        let fetches = self
            .sources()
            .into_iter()
            .map(|prefix| store.scan_by_prefix(prefix));

        let raw = match try_join_all(fetches).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Feed fetch failed, returning degraded feed");
                return FeedResponse::degraded(e.to_string());
            }
        };

        let sources: Vec<Vec<Post>> = raw
            .into_iter()
            .map(|records| {
                let (posts, failures) = decode_posts(records);
                for failure in failures {
                    warn!(error = %failure, "Skipping unreadable post record");
                }
                posts
            })
            .collect();

        FeedResponse::ok(assemble(&scope, sources))
    }
}

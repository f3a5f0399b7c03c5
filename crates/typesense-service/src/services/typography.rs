//! Typography service
//!
//! Wraps the pure engine for previews. A preview that names a client goes
//! through that client's latest-wins gate: it waits the configured delay and
//! only answers with a result if no newer preview from the same client has
//! started in the meantime.

use tracing::{debug, instrument};
use typesense_core::{compute, EmotionState, TypographyResult};

use crate::dto::{PreviewRequest, PreviewResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TypographyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TypographyService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Derive spacing for already validated emotions
    pub fn derive(&self, emotions: &EmotionState) -> TypographyResult {
        compute(emotions)
    }

    /// Preview spacing for a draft
    #[instrument(skip(self, request), fields(client_id = ?request.client_id))]
    pub async fn preview(&self, request: PreviewRequest) -> ServiceResult<PreviewResponse> {
        let emotions = EmotionState::with_defaults(request.joy, request.surprise, request.anger)?;

        let Some(client_id) = request.client_id else {
            return Ok(PreviewResponse::computed(&self.derive(&emotions)));
        };

        let gate = self.ctx.preview_gate(&client_id);
        let ticket = gate.begin();

        let delay = self.ctx.settings().preview_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = self.derive(&emotions);
        let published = gate.publish(ticket, result.clone());
        drop(gate);
        self.ctx.release_preview_gate(&client_id);

        if published {
            Ok(PreviewResponse::computed(&result))
        } else {
            debug!(sequence = ticket.sequence(), "Preview superseded by a newer request");
            Ok(PreviewResponse::superseded())
        }
    }
}

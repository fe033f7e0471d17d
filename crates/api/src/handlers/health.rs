use axum::Json;

use crate::response::{Envelope, MessageResponse};

/// GET /health -- liveness probe, enveloped like every other response.
pub async fn health() -> Json<Envelope<MessageResponse>> {
    Json(Envelope::new(MessageResponse {
        message: "Cinelog API is running",
    }))
}

use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    routing::post,
    Form, Json, Router,
};
use serde::Serialize;
use tracing::{debug, info};
use jumanji_core::service::BOOKING_CONFIRMED_MESSAGE;
use jumanji_core::BookingSubmission;
use crate::error::AppError;
use crate::state::AppState;

/// Shown when the request body cannot be read at all.
pub const UNREADABLE_FORM_MESSAGE: &str = "Некорректные данные формы";

#[derive(Debug, Serialize)]
struct BookingResponse {
    message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/book", post(submit_booking))
}

/// Booking form body, accepted either as JSON or as a urlencoded HTML form.
pub struct BookingForm(pub BookingSubmission);

impl<S> FromRequest<S> for BookingForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| v.to_str().unwrap_or_default().to_string());

        // Without a content type the body is not parsed at all, so the
        // submission is simply empty.
        let Some(content_type) = content_type else {
            return Ok(BookingForm(BookingSubmission::default()));
        };

        let submission = if content_type.starts_with("application/x-www-form-urlencoded") {
            Form::<BookingSubmission>::from_request(req, state)
                .await
                .map(|Form(s)| s)
                .map_err(|e| unreadable(e.body_text()))?
        } else {
            Json::<BookingSubmission>::from_request(req, state)
                .await
                .map(|Json(s)| s)
                .map_err(|e| unreadable(e.body_text()))?
        };

        Ok(BookingForm(submission))
    }
}

fn unreadable(detail: String) -> AppError {
    debug!("Rejected booking body: {}", detail);
    AppError::ValidationError(UNREADABLE_FORM_MESSAGE.to_string())
}

async fn submit_booking(
    State(state): State<AppState>,
    BookingForm(submission): BookingForm,
) -> Result<Json<BookingResponse>, AppError> {
    let receipt = state.bookings.submit_booking(submission).await?;

    info!("Booking confirmed: {}", receipt.booking.id);

    Ok(Json(BookingResponse {
        message: BOOKING_CONFIRMED_MESSAGE.to_string(),
    }))
}

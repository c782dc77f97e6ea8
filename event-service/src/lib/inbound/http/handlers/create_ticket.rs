use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TicketData;
use crate::domain::ticket::models::CreateTicketCommand;
use crate::domain::user::errors::EmailError;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// Public contact form. No authentication; the submitter supplies their
/// own reply address.
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(body): Json<CreateTicketRequest>,
) -> Result<ApiSuccess<TicketData>, ApiError> {
    state
        .tickets
        .create_ticket(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref ticket| ApiSuccess::new(StatusCode::CREATED, ticket.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTicketRequest {
    name: String,
    email: String,
    subject: String,
    message: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateTicketRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl CreateTicketRequest {
    fn try_into_command(self) -> Result<CreateTicketCommand, ParseCreateTicketRequestError> {
        if self.name.trim().is_empty() {
            return Err(ParseCreateTicketRequestError::MissingField("name"));
        }
        if self.message.trim().is_empty() {
            return Err(ParseCreateTicketRequestError::MissingField("message"));
        }
        let email = EmailAddress::new(self.email)?;

        Ok(CreateTicketCommand {
            name: self.name,
            email: email.as_str().to_string(),
            subject: self.subject,
            message: self.message,
        })
    }
}

impl From<ParseCreateTicketRequestError> for ApiError {
    fn from(err: ParseCreateTicketRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

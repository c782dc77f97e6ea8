use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::login::SessionResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::errors::PasswordRuleError;
use crate::domain::session::models::Password;
use crate::domain::session::models::RegisterCommand;
use crate::domain::session::models::RegisterKind;
use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::ProfileError;
use crate::domain::user::models::DietaryRestrictions;
use crate::domain::user::models::EducationYear;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Gender;
use crate::domain::user::models::PreviousHackathons;
use crate::domain::user::models::Profile;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let (user, token) = state
        .auth
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        SessionResponseData {
            user: (&user).into(),
            token,
        },
    ))
}

/// HTTP request body for registration (raw JSON).
///
/// The `user` kind collects the full applicant form; the `staff` kind
/// only needs names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterRequest {
    kind: RegisterKind,
    email: String,
    password: String,
    confirm_password: String,
    #[serde(default)]
    agree: bool,
    first_name: String,
    last_name: String,
    age: Option<u8>,
    gender: Option<Gender>,
    school: Option<String>,
    year: Option<EducationYear>,
    major: Option<String>,
    hackathons: Option<PreviousHackathons>,
    dietary: Option<DietaryRestrictions>,
    allergies: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordRuleError),

    #[error("Passwords do not match")]
    ConfirmationMismatch,

    #[error("You must agree to the terms and conditions")]
    TermsNotAgreed,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid profile: {0}")]
    Profile(#[from] ProfileError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;

        if self.password != self.confirm_password {
            return Err(ParseRegisterRequestError::ConfirmationMismatch);
        }
        let password = Password::new(self.password)?;

        let info = match self.kind {
            RegisterKind::User => {
                if !self.agree {
                    return Err(ParseRegisterRequestError::TermsNotAgreed);
                }
                Profile::applicant(
                    self.first_name,
                    self.last_name,
                    self.age.ok_or(ParseRegisterRequestError::MissingField("age"))?,
                    self.gender
                        .ok_or(ParseRegisterRequestError::MissingField("gender"))?,
                    self.school
                        .ok_or(ParseRegisterRequestError::MissingField("school"))?,
                    self.year
                        .ok_or(ParseRegisterRequestError::MissingField("year"))?,
                    self.major,
                    self.hackathons
                        .ok_or(ParseRegisterRequestError::MissingField("hackathons"))?,
                    self.dietary
                        .ok_or(ParseRegisterRequestError::MissingField("dietary"))?,
                    self.allergies,
                )?
            }
            RegisterKind::Staff => Profile::staff(self.first_name, self.last_name),
        };

        Ok(RegisterCommand {
            kind: self.kind,
            email,
            password,
            info,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

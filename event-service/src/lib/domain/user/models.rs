use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::ProfileError;
use crate::domain::user::errors::RoleError;
use crate::domain::user::errors::UserStatusError;

/// User aggregate entity.
///
/// Represents an account on the platform. Accounts start with the `pending`
/// role and status and are never hard-deleted by this subsystem.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    /// Absent for accounts whose password has not been set yet.
    pub password_hash: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    /// Filled during registration; optional until then.
    pub info: Option<Profile>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role tier of an account.
///
/// Variant order is the privilege order: every tier satisfies gates for
/// lower tiers, and `Pending` satisfies no role gate at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pending,
    User,
    Staff,
    Admin,
}

impl Role {
    /// Whether this role passes a gate requiring at least `tier`.
    pub fn satisfies(&self, tier: Role) -> bool {
        *self >= tier && *self != Role::Pending
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pending => "pending",
            Role::User => "user",
            Role::Staff => "staff",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Role::Pending),
            "user" => Ok(Role::User),
            "staff" => Ok(Role::Staff),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

/// Application review status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Approved,
    Checked,
    Denied,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Approved => "approved",
            UserStatus::Checked => "checked",
            UserStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "approved" => Ok(UserStatus::Approved),
            "checked" => Ok(UserStatus::Checked),
            "denied" => Ok(UserStatus::Denied),
            other => Err(UserStatusError::Unknown(other.to_string())),
        }
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationYear {
    None,
    Highschool,
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
    Masters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviousHackathons {
    None,
    One,
    Few,
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietaryRestrictions {
    None,
    Vegan,
    Vegetarian,
    Kosher,
    #[serde(rename = "gluten-free")]
    Gluten,
}

/// Profile info filled during registration.
///
/// Staff accounts only carry names; applicant accounts carry the full form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<EducationYear>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackathons: Option<PreviousHackathons>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary: Option<DietaryRestrictions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
}

impl Profile {
    const MIN_AGE: u8 = 16;

    /// Full applicant profile, as collected by the registration form.
    ///
    /// # Errors
    /// * `Underage` - Applicant is younger than 16
    #[allow(clippy::too_many_arguments)]
    pub fn applicant(
        first_name: String,
        last_name: String,
        age: u8,
        gender: Gender,
        school: String,
        year: EducationYear,
        major: Option<String>,
        hackathons: PreviousHackathons,
        dietary: DietaryRestrictions,
        allergies: Option<String>,
    ) -> Result<Self, ProfileError> {
        if age < Self::MIN_AGE {
            return Err(ProfileError::Underage {
                min: Self::MIN_AGE,
                actual: age,
            });
        }
        Ok(Self {
            first_name,
            last_name,
            age: Some(age),
            gender: Some(gender),
            school: Some(school),
            year: Some(year),
            major,
            hackathons: Some(hackathons),
            dietary: Some(dietary),
            allergies,
        })
    }

    /// Minimal staff profile: names only.
    pub fn staff(first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            last_name,
            age: None,
            gender: None,
            school: None,
            year: None,
            major: None,
            hackathons: None,
            dietary: None,
            allergies: None,
        }
    }
}

/// Optional role/status filter for user listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

/// Command to update an existing user with optional validated fields.
///
/// Only provided fields will be updated. Role and status changes are
/// audit-logged against the acting user.
#[derive(Debug)]
pub struct UpdateUserCommand {
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    pub info: Option<Profile>,
}

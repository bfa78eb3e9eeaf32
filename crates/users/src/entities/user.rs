use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::validation::{validate_cedula, validate_email};
use crate::types::UserError;

/// Represents a user record in the admin portal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Monotonic primary key, assigned by the store
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    /// User email address, lowercased
    pub email: String,
    /// National identity number, doubles as the initial password
    pub cedula: String,
    /// Display name shown in the admin console
    pub display_name: String,
    /// User status
    pub status: UserStatus,
    /// User role
    pub role: UserRole,
    /// Day the record was created
    pub created_at: NaiveDate,
    /// Provenance of the record
    pub source: UserSource,
}

/// User status enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// User role enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Doctor,
    Secretary,
    Student,
    Coordinator,
}

/// Provenance tag distinguishing manually created users from bulk-imported ones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum UserSource {
    Manual,
    BulkUpload,
}

impl UserStatus {
    /// Flip between active and inactive
    pub fn toggled(self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            UserStatus::Inactive => UserStatus::Active,
        }
    }
}

impl From<&str> for UserStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "inactive" => UserStatus::Inactive,
            _ => UserStatus::Active,
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => "active".to_string(),
            UserStatus::Inactive => "inactive".to_string(),
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => UserRole::Admin,
            "doctor" | "profesor" => UserRole::Doctor,
            "secretary" => UserRole::Secretary,
            "coordinator" => UserRole::Coordinator,
            _ => UserRole::Student,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => "admin".to_string(),
            UserRole::Doctor => "doctor".to_string(),
            UserRole::Secretary => "secretary".to_string(),
            UserRole::Student => "student".to_string(),
            UserRole::Coordinator => "coordinator".to_string(),
        }
    }
}

impl From<UserSource> for String {
    fn from(source: UserSource) -> Self {
        match source {
            UserSource::Manual => "manual".to_string(),
            UserSource::BulkUpload => "bulk-upload".to_string(),
        }
    }
}

/// Request to create a user through manual entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// User email address
    pub email: String,
    /// National identity number (digits only, minimum 6)
    pub cedula: String,
    /// Display name; derived from the email when omitted
    pub display_name: Option<String>,
    /// Initial role (defaults to Student)
    pub role: Option<UserRole>,
}

/// Partial field update merged into an existing user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub cedula: Option<String>,
    pub display_name: Option<String>,
    pub status: Option<UserStatus>,
    pub role: Option<UserRole>,
}

impl User {
    /// Create a new user instance; the id is assigned by the store
    pub fn new(email: String, cedula: String, role: UserRole, source: UserSource) -> Self {
        let display_name = display_name_from_email(&email);
        Self {
            id: 0,
            public_id: cuid2::create_id(),
            email,
            cedula,
            display_name,
            status: UserStatus::Active,
            role,
            created_at: Utc::now().date_naive(),
            source,
        }
    }

    /// Check if user is an admin
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Check if user is active
    pub fn is_active(&self) -> bool {
        matches!(self.status, UserStatus::Active)
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &UserUpdate) {
        if let Some(ref email) = update.email {
            self.email = email.to_lowercase();
        }
        if let Some(ref cedula) = update.cedula {
            self.cedula = cedula.clone();
        }
        if let Some(ref display_name) = update.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }
}

impl NewUser {
    /// Validate the request before the store accepts it
    pub fn validate(&self) -> Result<(), UserError> {
        validate_email(&self.email)?;
        validate_cedula(&self.cedula)?;
        if let Some(ref display_name) = self.display_name {
            if display_name.trim().is_empty() {
                return Err(UserError::ValidationFailed(
                    "Display name cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Derive a display name from the local part of an email address.
///
/// The first character is uppercased and the rest is kept verbatim, so
/// `"jane.doe@udla.edu.ec"` becomes `"Jane.doe"`.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

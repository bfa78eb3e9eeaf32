//! # Odonto Users Crate
//!
//! User records and the in-memory user store for the odontology clinic's
//! administrative portal. The store owns the authoritative user collection
//! and exposes the only operations allowed to mutate it: manual creation,
//! bulk reconciliation, field updates, status toggling, and deletion.
//!
//! ## Architecture
//!
//! - **Entities**: Domain models (`User`, `UserStatus`, `UserRole`, `UserSource`)
//! - **Store**: The injected collection owner (`UserStore`, `BulkUserSink`)
//! - **Types**: Shared error types
//! - **Utils**: Internal validation helpers

pub mod entities;
pub mod store;
pub mod types;
pub mod utils;

pub use entities::{
    display_name_from_email, NewUser, User, UserRole, UserSource, UserStatus, UserUpdate,
};
pub use store::{BulkUserRecord, BulkUserSink, UserStats, UserStore};
pub use types::{UserError, UserResult};

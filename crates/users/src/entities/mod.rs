pub mod user;

pub use user::{
    display_name_from_email, NewUser, User, UserRole, UserSource, UserStatus, UserUpdate,
};

pub mod errors;

pub use errors::{UserError, UserResult};

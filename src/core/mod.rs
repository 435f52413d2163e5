pub mod form;
pub mod schema;
pub mod session;
pub mod submission;

pub use crate::domain::model::{Draft, FormStatus};
pub use crate::domain::ports::{IdentityProvider, Notifier, RecordStore};
pub use crate::utils::error::Result;

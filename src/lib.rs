pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::Cli;

pub use crate::adapters::{HttpNotifier, SupabaseClient};
pub use crate::config::PawsConfig;
pub use crate::core::form::{FormController, FormSignal, IntakeWizard, WizardStep};
pub use crate::core::submission::{IntakeService, SubmissionSettings};
pub use crate::utils::error::{IntakeError, Result};

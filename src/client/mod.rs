//! Browser-side half: dark mode toggle and the pet registration form.
//!
//! Page surfaces are plain types ([`theme::ClassList`], [`preview::ImagePreview`],
//! [`gallery::Gallery`]) and the outside world sits behind traits
//! ([`theme::PreferenceStore`], [`api::OwnerApi`], [`notifier::Notifier`]).

pub mod api;
pub mod config;
pub mod error;
pub mod file;
pub mod form;
pub mod gallery;
pub mod notifier;
pub mod preview;
pub mod registration;
pub mod theme;

pub use api::{HttpOwnerApi, OwnerApi};
pub use config::ClientConfig;
pub use error::{ClientError, PreferenceError};
pub use file::SelectedFile;
pub use registration::{RegistrationPage, SubmitOutcome};
pub use theme::{ThemeToggle, PreferenceStore};

//! Local services for the coach: the response catalog and classifier,
//! preference persistence, credential storage, export and text helpers.

pub mod catalog;
pub mod classifier;
pub mod credentials;
pub mod export;
pub mod intent;
pub mod preferences;
pub mod text;

pub use catalog::fallback_response;
pub use classifier::{classify, Category};
pub use preferences::PreferenceStore;

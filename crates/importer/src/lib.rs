pub mod error;
pub mod validator;

pub use error::{ImporterError, Result};
pub use validator::{CatalogValidator, ValidationReport};

pub mod amortization;
pub mod dscr;
pub mod error;
pub mod normalize;
pub mod types;

#[cfg(feature = "project")]
pub mod project;

pub use error::CoreError;
pub use types::*;

/// Standard result type for the fallible realty-finance operations
pub type CoreResult<T> = Result<T, CoreError>;

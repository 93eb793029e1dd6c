//! # Record Sources
//!
//! Loads option records from delimited text files for the batch pricer.
//!
//! ## Modules
//!
//! - [`file_source`]: CSV loaders for European and perpetual American records
//! - [`error`]: Loader errors
//!
//! ## File Schemas
//!
//! The first line is a header and is skipped; columns are read by position.
//!
//! | Family            | Columns                      |
//! |-------------------|------------------------------|
//! | European          | `id,type,T,K,S,r,sigma,b`    |
//! | AmericanPerpetual | `id,type,K,S,r,sigma,b`      |
//!
//! An empty `b` cell defaults the cost of carry to `r`.

pub mod error;
pub mod file_source;

pub use error::LoadError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::LoadError;
    pub use crate::file_source::{
        load_american, load_american_from_reader, load_european, load_european_from_reader,
    };
}

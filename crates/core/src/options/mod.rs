//! Parameter validation and normalization
//!
//! Every endpoint declares an [`OptionSchema`] describing the options it
//! understands. Caller input is run through [`resolve`] before it is turned
//! into a query string or request body, so unknown keys and malformed values
//! are rejected without touching the network.
//!
//! ```rust
//! use glapi_core::options::{OptionSchema, OptionSpec};
//! use glapi_core::params;
//!
//! let schema = OptionSchema::new()
//!     .option("sort", OptionSpec::new().one_of(["asc", "desc"]));
//!
//! assert!(schema.resolve(&params! { "sort" => "asc" }).is_ok());
//! assert!(schema.resolve(&params! { "sort" => "up" }).is_err());
//! ```

mod error;
mod schema;
mod value;

pub use error::OptionsError;
pub use schema::{
    resolve, AllowedValues, Normalizer, OptionSchema, OptionSpec, ResolvedParameters, Validator,
};
pub use value::{
    format_datetime, parse_datetime, query_pairs, to_json, OptionValue, Params, ValueType,
};

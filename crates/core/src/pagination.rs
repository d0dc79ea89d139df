//! Offset pagination options shared by every listing endpoint
//!
//! GitLab paginates collections with `page` and `per_page` query parameters.
//! Listing schemas start from [`paginated_schema`] and add their own filters.

use crate::options::{OptionSchema, OptionSpec, Validator, ValueType};

/// Largest page size the API honours
pub const MAX_PER_PAGE: i64 = 100;

/// Schema holding only the pagination options
pub fn paginated_schema() -> OptionSchema {
    OptionSchema::new()
        .option(
            "page",
            OptionSpec::new()
                .of_type(ValueType::Integer)
                .validated_by(Validator::AtLeast(1)),
        )
        .option(
            "per_page",
            OptionSpec::new()
                .of_type(ValueType::Integer)
                .validated_by(Validator::Between(1, MAX_PER_PAGE)),
        )
}

//! Group merge request endpoints

use crate::options::{Normalizer, OptionSchema, OptionSpec, OptionsError, Params, Validator, ValueType};
use crate::pagination::paginated_schema;
use crate::paths::{group_path, Id};
use crate::request::Request;

pub const STATE_ALL: &str = "all";
pub const STATE_MERGED: &str = "merged";
pub const STATE_OPENED: &str = "opened";
pub const STATE_CLOSED: &str = "closed";

/// Merge request `state` filter values
pub const STATES: [&str; 4] = [STATE_ALL, STATE_OPENED, STATE_MERGED, STATE_CLOSED];

/// Merge request `scope` filter values.
///
/// Underscored, unlike the issue listing which uses hyphens.
pub const SCOPES: [&str; 3] = ["created_by_me", "assigned_to_me", "all"];

/// Options accepted when listing merge requests
pub fn list_schema() -> OptionSchema {
    let datetime = || {
        OptionSpec::new()
            .of_type(ValueType::DateTime)
            .normalized_by(Normalizer::Iso8601)
    };

    paginated_schema()
        .option(
            "iids",
            OptionSpec::new()
                .of_type(ValueType::Array)
                .validated_by(Validator::AllIntegers),
        )
        .option("state", OptionSpec::new().one_of(STATES))
        .option(
            "order_by",
            OptionSpec::new().one_of(["created_at", "updated_at"]),
        )
        .option("sort", OptionSpec::new().one_of(["asc", "desc"]))
        .define("milestone")
        .option("view", OptionSpec::new().one_of(["simple"]))
        .define("labels")
        .option("created_after", datetime())
        .option("created_before", datetime())
        .option("updated_after", datetime())
        .option("updated_before", datetime())
        .option("scope", OptionSpec::new().one_of(SCOPES))
        .option("author_id", OptionSpec::new().of_type(ValueType::Integer))
        .option("assignee_id", OptionSpec::new().of_type(ValueType::Integer))
        .define("search")
        .define("source_branch")
        .define("target_branch")
}

/// List merge requests of a group.
pub fn all(group_id: &Id, params: &Params) -> Result<Request, OptionsError> {
    let resolved = list_schema().resolve(params)?;
    Ok(Request::get(
        group_path(group_id, "merge_requests"),
        resolved.into_params(),
    ))
}

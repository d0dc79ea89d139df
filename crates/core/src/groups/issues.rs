//! Group issue endpoints

use super::{body_param, id_value, single_param, NoteBody};
use crate::options::{OptionSchema, OptionSpec, OptionValue, OptionsError, Params, Validator, ValueType};
use crate::pagination::paginated_schema;
use crate::paths::{encode_path, group_path, Id};
use crate::request::Request;

/// Issue `state` filter values
pub const STATES: [&str; 2] = ["opened", "closed"];

/// Issue `scope` filter values.
///
/// Hyphenated, unlike the merge request listing which uses underscores.
/// Both spellings are kept as-is until the upstream API contract says which
/// one is right.
pub const SCOPES: [&str; 3] = ["created-by-me", "assigned-to-me", "all"];

/// Options accepted when listing issues
pub fn list_schema() -> OptionSchema {
    paginated_schema()
        .option("state", OptionSpec::new().one_of(STATES))
        .define("labels")
        .define("milestone")
        .option(
            "iids",
            OptionSpec::new()
                .of_type(ValueType::Array)
                .validated_by(Validator::AllIntegers),
        )
        .option("scope", OptionSpec::new().one_of(SCOPES))
        .option(
            "order_by",
            OptionSpec::new().one_of(["created_at", "updated_at"]),
        )
        .option("sort", OptionSpec::new().one_of(["asc", "desc"]))
        .define("search")
}

/// List issues of a group, or every visible issue when no group is given.
pub fn all(group_id: Option<&Id>, params: &Params) -> Result<Request, OptionsError> {
    let resolved = list_schema().resolve(params)?;
    let path = match group_id {
        Some(group_id) => group_path(group_id, "issues"),
        None => "issues".to_string(),
    };
    Ok(Request::get(path, resolved.into_params()))
}

pub fn show(group_id: &Id, issue_iid: &Id) -> Request {
    Request::get(issue_path(group_id, issue_iid, ""), Params::new())
}

/// Create an issue. The body is sent unvalidated.
pub fn create(group_id: &Id, params: Params) -> Request {
    Request::post(group_path(group_id, "issues"), params)
}

/// Update an issue. The body is sent unvalidated.
pub fn update(group_id: &Id, issue_iid: &Id, params: Params) -> Request {
    Request::put(issue_path(group_id, issue_iid, ""), params)
}

pub fn move_issue(group_id: &Id, issue_iid: &Id, to_group_id: &Id) -> Request {
    Request::post(
        issue_path(group_id, issue_iid, "/move"),
        single_param("to_group_id", id_value(to_group_id)),
    )
}

pub fn remove(group_id: &Id, issue_iid: &Id) -> Request {
    Request::delete(issue_path(group_id, issue_iid, ""), Params::new())
}

// =============================================================================
// Notes
// =============================================================================

pub fn show_comments(group_id: &Id, issue_iid: &Id) -> Request {
    Request::get(issue_path(group_id, issue_iid, "/notes"), Params::new())
}

pub fn show_comment(group_id: &Id, issue_iid: &Id, note_id: &Id) -> Request {
    Request::get(note_path(group_id, issue_iid, note_id), Params::new())
}

pub fn add_comment(group_id: &Id, issue_iid: &Id, body: NoteBody) -> Request {
    Request::post(issue_path(group_id, issue_iid, "/notes"), body.into_params())
}

pub fn update_comment(group_id: &Id, issue_iid: &Id, note_id: &Id, body: &str) -> Request {
    Request::put(note_path(group_id, issue_iid, note_id), body_param(body))
}

pub fn remove_comment(group_id: &Id, issue_iid: &Id, note_id: &Id) -> Request {
    Request::delete(note_path(group_id, issue_iid, note_id), Params::new())
}

// =============================================================================
// Discussions
// =============================================================================

pub fn show_discussions(group_id: &Id, issue_iid: &Id) -> Request {
    Request::get(issue_path(group_id, issue_iid, "/discussions"), Params::new())
}

pub fn show_discussion(group_id: &Id, issue_iid: &Id, discussion_id: &Id) -> Request {
    Request::get(
        discussion_path(group_id, issue_iid, discussion_id, ""),
        Params::new(),
    )
}

pub fn add_discussion(group_id: &Id, issue_iid: &Id, body: NoteBody) -> Request {
    Request::post(
        issue_path(group_id, issue_iid, "/discussions"),
        body.into_params(),
    )
}

pub fn add_discussion_note(
    group_id: &Id,
    issue_iid: &Id,
    discussion_id: &Id,
    body: NoteBody,
) -> Request {
    Request::post(
        discussion_path(group_id, issue_iid, discussion_id, "/notes"),
        body.into_params(),
    )
}

pub fn update_discussion_note(
    group_id: &Id,
    issue_iid: &Id,
    discussion_id: &Id,
    note_id: &Id,
    body: &str,
) -> Request {
    Request::put(
        discussion_note_path(group_id, issue_iid, discussion_id, note_id),
        body_param(body),
    )
}

pub fn remove_discussion_note(
    group_id: &Id,
    issue_iid: &Id,
    discussion_id: &Id,
    note_id: &Id,
) -> Request {
    Request::delete(
        discussion_note_path(group_id, issue_iid, discussion_id, note_id),
        Params::new(),
    )
}

// =============================================================================
// Time tracking
// =============================================================================

/// `duration` uses GitLab's human format, e.g. `3h30m`.
pub fn set_time_estimate(group_id: &Id, issue_iid: &Id, duration: &str) -> Request {
    Request::post(
        issue_path(group_id, issue_iid, "/time_estimate"),
        duration_param(duration),
    )
}

pub fn reset_time_estimate(group_id: &Id, issue_iid: &Id) -> Request {
    Request::post(
        issue_path(group_id, issue_iid, "/reset_time_estimate"),
        Params::new(),
    )
}

pub fn add_spent_time(group_id: &Id, issue_iid: &Id, duration: &str) -> Request {
    Request::post(
        issue_path(group_id, issue_iid, "/add_spent_time"),
        duration_param(duration),
    )
}

pub fn reset_spent_time(group_id: &Id, issue_iid: &Id) -> Request {
    Request::post(
        issue_path(group_id, issue_iid, "/reset_spent_time"),
        Params::new(),
    )
}

pub fn time_stats(group_id: &Id, issue_iid: &Id) -> Request {
    Request::get(issue_path(group_id, issue_iid, "/time_stats"), Params::new())
}

// =============================================================================
// Misc
// =============================================================================

pub fn award_emoji(group_id: &Id, issue_iid: &Id) -> Request {
    Request::get(issue_path(group_id, issue_iid, "/award_emoji"), Params::new())
}

pub fn closed_by_merge_requests(group_id: &Id, issue_iid: &Id) -> Request {
    Request::get(issue_path(group_id, issue_iid, "/closed_by"), Params::new())
}

fn issue_path(group_id: &Id, issue_iid: &Id, suffix: &str) -> String {
    group_path(
        group_id,
        &format!("issues/{}{}", encode_path(issue_iid.as_str()), suffix),
    )
}

fn note_path(group_id: &Id, issue_iid: &Id, note_id: &Id) -> String {
    issue_path(
        group_id,
        issue_iid,
        &format!("/notes/{}", encode_path(note_id.as_str())),
    )
}

fn discussion_path(group_id: &Id, issue_iid: &Id, discussion_id: &Id, suffix: &str) -> String {
    issue_path(
        group_id,
        issue_iid,
        &format!("/discussions/{}{}", encode_path(discussion_id.as_str()), suffix),
    )
}

fn discussion_note_path(
    group_id: &Id,
    issue_iid: &Id,
    discussion_id: &Id,
    note_id: &Id,
) -> String {
    discussion_path(
        group_id,
        issue_iid,
        discussion_id,
        &format!("/notes/{}", encode_path(note_id.as_str())),
    )
}

fn duration_param(duration: &str) -> Params {
    single_param("duration", OptionValue::from(duration))
}

use super::{connect, parse_timestamp, print_listing, print_value, set_opt, spinner};
use crate::prelude::{println, *};
use glapi_core::groups::NoteBody;
use glapi_core::options::{OptionValue, Params};
use glapi_core::paths::Id;

/// Issues module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "issues")]
#[command(about = "Group issue operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List issues of a group (or all visible issues without --group)
    List(ListOptions),
    /// Show a single issue
    Show(IssueRef),
    /// Create an issue
    Create(CreateOptions),
    /// Update an issue
    Update(UpdateOptions),
    /// Move an issue to another group
    Move(MoveOptions),
    /// Delete an issue
    Remove(IssueRef),
    /// List the notes of an issue
    Notes(IssueRef),
    /// Show a single note
    Note(NoteRef),
    /// Add a note to an issue
    Comment(CommentOptions),
    /// Edit a note
    EditComment(EditNoteOptions),
    /// Delete a note
    DeleteComment(NoteRef),
    /// List the discussions of an issue
    Discussions(IssueRef),
    /// Show a single discussion
    Discussion(DiscussionRef),
    /// Start a new discussion on an issue
    Discuss(CommentOptions),
    /// Reply to a discussion
    Reply(ReplyOptions),
    /// Edit a reply in a discussion
    EditReply(EditReplyOptions),
    /// Delete a reply from a discussion
    DeleteReply(DiscussionNoteRef),
    /// Set the time estimate (e.g. 3h30m)
    Estimate(DurationOptions),
    /// Reset the time estimate
    ResetEstimate(IssueRef),
    /// Add spent time (e.g. 1h)
    Spend(DurationOptions),
    /// Reset the spent time
    ResetSpent(IssueRef),
    /// Show time tracking stats
    TimeStats(IssueRef),
    /// List emoji reactions
    Emoji(IssueRef),
    /// List merge requests that close the issue
    ClosedBy(IssueRef),
}

/// Options for listing issues
#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Group id or full path; lists every visible issue when omitted
    #[clap(long, short = 'g')]
    pub group: Option<String>,

    /// opened or closed
    #[clap(long)]
    pub state: Option<String>,

    /// Comma-separated label names; issues must have all of them
    #[clap(long)]
    pub labels: Option<String>,

    /// Milestone title
    #[clap(long)]
    pub milestone: Option<String>,

    /// Only return the issues with these IIDs (can be repeated)
    #[clap(long = "iid", value_name = "IID")]
    pub iids: Vec<i64>,

    /// created-by-me, assigned-to-me or all
    #[clap(long)]
    pub scope: Option<String>,

    /// created_at or updated_at
    #[clap(long)]
    pub order_by: Option<String>,

    /// asc or desc
    #[clap(long)]
    pub sort: Option<String>,

    /// Search title and description
    #[clap(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<i64>,

    /// Results per page (1-100)
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// An issue within a group
#[derive(Debug, clap::Args, Clone)]
pub struct IssueRef {
    /// Group id or full path (e.g. "my-group/subgroup")
    #[clap(long, short = 'g')]
    pub group: String,

    /// Issue IID
    #[clap(value_name = "IID")]
    pub iid: u64,
}

#[derive(Debug, clap::Args, Clone)]
pub struct NoteRef {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Note id
    #[clap(long)]
    pub note: u64,
}

#[derive(Debug, clap::Args, Clone)]
pub struct DiscussionRef {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Discussion id
    #[clap(long)]
    pub discussion: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct DiscussionNoteRef {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Discussion id
    #[clap(long)]
    pub discussion: String,

    /// Note id
    #[clap(long)]
    pub note: u64,
}

#[derive(Debug, clap::Args, Clone)]
pub struct CreateOptions {
    /// Group id or full path
    #[clap(long, short = 'g')]
    pub group: String,

    /// Issue title
    #[clap(long, short = 't')]
    pub title: String,

    /// Issue description (markdown)
    #[clap(long, short = 'd')]
    pub description: Option<String>,

    /// Comma-separated label names
    #[clap(long)]
    pub labels: Option<String>,

    /// Mark the issue as confidential
    #[arg(long)]
    pub confidential: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct UpdateOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// New title
    #[clap(long, short = 't')]
    pub title: Option<String>,

    /// New description (markdown)
    #[clap(long, short = 'd')]
    pub description: Option<String>,

    /// Replace labels (comma-separated)
    #[clap(long)]
    pub labels: Option<String>,

    /// close or reopen
    #[clap(long)]
    pub state_event: Option<String>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct MoveOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Destination group id or full path
    #[clap(long)]
    pub to_group: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct CommentOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Note body (markdown)
    #[clap(long, short = 'b')]
    pub body: String,

    /// Backdate the note (admins and group owners only)
    #[clap(long, value_parser = parse_timestamp)]
    pub created_at: Option<chrono::DateTime<chrono::FixedOffset>>,
}

#[derive(Debug, clap::Args, Clone)]
pub struct EditNoteOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Note id
    #[clap(long)]
    pub note: u64,

    /// New note body
    #[clap(long, short = 'b')]
    pub body: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ReplyOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Discussion id
    #[clap(long)]
    pub discussion: String,

    /// Reply body (markdown)
    #[clap(long, short = 'b')]
    pub body: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct EditReplyOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Discussion id
    #[clap(long)]
    pub discussion: String,

    /// Note id
    #[clap(long)]
    pub note: u64,

    /// New reply body
    #[clap(long, short = 'b')]
    pub body: String,
}

#[derive(Debug, clap::Args, Clone)]
pub struct DurationOptions {
    #[clap(flatten)]
    pub issue: IssueRef,

    /// Duration in human format, e.g. 3h30m
    #[clap(value_name = "DURATION")]
    pub duration: String,
}

/// Translate list flags into API parameters
pub fn list_params(options: &ListOptions) -> Params {
    let mut params = Params::new();
    set_opt(&mut params, "state", options.state.clone());
    set_opt(&mut params, "labels", options.labels.clone());
    set_opt(&mut params, "milestone", options.milestone.clone());
    if !options.iids.is_empty() {
        params.insert("iids".to_string(), OptionValue::from(options.iids.clone()));
    }
    set_opt(&mut params, "scope", options.scope.clone());
    set_opt(&mut params, "order_by", options.order_by.clone());
    set_opt(&mut params, "sort", options.sort.clone());
    set_opt(&mut params, "search", options.search.clone());
    set_opt(&mut params, "page", options.page);
    set_opt(&mut params, "per_page", options.per_page);
    params
}

fn create_params(options: &CreateOptions) -> Params {
    let mut params = Params::new();
    params.insert("title".to_string(), options.title.clone().into());
    set_opt(&mut params, "description", options.description.clone());
    set_opt(&mut params, "labels", options.labels.clone());
    if options.confidential {
        params.insert("confidential".to_string(), true.into());
    }
    params
}

fn update_params(options: &UpdateOptions) -> Params {
    let mut params = Params::new();
    set_opt(&mut params, "title", options.title.clone());
    set_opt(&mut params, "description", options.description.clone());
    set_opt(&mut params, "labels", options.labels.clone());
    set_opt(&mut params, "state_event", options.state_event.clone());
    params
}

fn note_body(options: &CommentOptions) -> NoteBody {
    match options.created_at {
        Some(created_at) => {
            let mut params = Params::new();
            params.insert("body".to_string(), options.body.clone().into());
            params.insert("created_at".to_string(), created_at.into());
            NoteBody::Params(params)
        }
        None => NoteBody::Text(options.body.clone()),
    }
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running issues command...");
    }

    let gitlab = connect(&global)?;
    let api = gitlab.group_issues();

    let (json, listing) = match &app.command {
        Commands::List(options) => (options.json, true),
        _ => (true, false),
    };

    let spinner = spinner("Talking to GitLab...")?;
    let result = match app.command {
        Commands::List(options) => {
            let params = list_params(&options);
            api.all(options.group.map(Id::from), &params).await
        }
        Commands::Show(i) => api.show(i.group, i.iid).await,
        Commands::Create(options) => api.create(options.group.clone(), create_params(&options)).await,
        Commands::Update(options) => {
            let params = update_params(&options);
            if params.is_empty() {
                spinner.finish_and_clear();
                return Err(eyre!(
                    "At least one field must be provided for update (--title, --description, --labels or --state-event)"
                ));
            }
            api.update(options.issue.group, options.issue.iid, params)
                .await
        }
        Commands::Move(options) => {
            api.move_issue(options.issue.group, options.issue.iid, options.to_group)
                .await
        }
        Commands::Remove(i) => api.remove(i.group, i.iid).await,
        Commands::Notes(i) => api.show_comments(i.group, i.iid).await,
        Commands::Note(n) => api.show_comment(n.issue.group, n.issue.iid, n.note).await,
        Commands::Comment(options) => {
            let body = note_body(&options);
            api.add_comment(options.issue.group, options.issue.iid, body)
                .await
        }
        Commands::EditComment(options) => {
            api.update_comment(
                options.issue.group,
                options.issue.iid,
                options.note,
                &options.body,
            )
            .await
        }
        Commands::DeleteComment(n) => {
            api.remove_comment(n.issue.group, n.issue.iid, n.note)
                .await
        }
        Commands::Discussions(i) => api.show_discussions(i.group, i.iid).await,
        Commands::Discussion(d) => {
            api.show_discussion(d.issue.group, d.issue.iid, d.discussion)
                .await
        }
        Commands::Discuss(options) => {
            let body = note_body(&options);
            api.add_discussion(options.issue.group, options.issue.iid, body)
                .await
        }
        Commands::Reply(options) => {
            api.add_discussion_note(
                options.issue.group,
                options.issue.iid,
                options.discussion,
                options.body,
            )
            .await
        }
        Commands::EditReply(options) => {
            api.update_discussion_note(
                options.issue.group,
                options.issue.iid,
                options.discussion,
                options.note,
                &options.body,
            )
            .await
        }
        Commands::DeleteReply(n) => {
            api.remove_discussion_note(n.issue.group, n.issue.iid, n.discussion, n.note)
                .await
        }
        Commands::Estimate(options) => {
            api.set_time_estimate(options.issue.group, options.issue.iid, &options.duration)
                .await
        }
        Commands::ResetEstimate(i) => api.reset_time_estimate(i.group, i.iid).await,
        Commands::Spend(options) => {
            api.add_spent_time(options.issue.group, options.issue.iid, &options.duration)
                .await
        }
        Commands::ResetSpent(i) => api.reset_spent_time(i.group, i.iid).await,
        Commands::TimeStats(i) => api.time_stats(i.group, i.iid).await,
        Commands::Emoji(i) => api.award_emoji(i.group, i.iid).await,
        Commands::ClosedBy(i) => api.closed_by_merge_requests(i.group, i.iid).await,
    };
    spinner.finish_and_clear();

    let value = result?;
    if listing && !json {
        print_listing(&value, "issue")
    } else {
        print_value(&value)
    }
}

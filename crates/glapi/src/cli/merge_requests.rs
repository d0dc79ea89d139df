use super::{connect, parse_timestamp, print_listing, print_value, set_opt, spinner};
use crate::prelude::{println, *};
use chrono::{DateTime, FixedOffset};
use glapi_core::options::{OptionValue, Params};

/// Merge requests module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "mrs")]
#[command(about = "Group merge request operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List merge requests of a group
    List(ListOptions),
}

/// Options for listing merge requests
#[derive(Debug, clap::Args, Clone)]
#[command(after_help = "EXAMPLES:
  # Open merge requests targeting main:
  glapi mrs list -g my-group --state opened --target-branch main

  # Merge requests created during January 2018:
  glapi mrs list -g my-group --created-after 2018-01-01 --created-before 2018-01-31

NOTES:
  - Timestamps accept YYYY-MM-DD or RFC 3339; values without an offset are UTC
  - --scope uses underscores here (created_by_me), unlike issue listings")]
pub struct ListOptions {
    /// Group id or full path (e.g. "my-group/subgroup")
    #[clap(long, short = 'g')]
    pub group: String,

    /// Only return the merge requests with these IIDs (can be repeated)
    #[clap(long = "iid", value_name = "IID")]
    pub iids: Vec<i64>,

    /// all, opened, merged or closed
    #[clap(long)]
    pub state: Option<String>,

    /// created_at or updated_at
    #[clap(long)]
    pub order_by: Option<String>,

    /// asc or desc
    #[clap(long)]
    pub sort: Option<String>,

    /// Milestone title
    #[clap(long)]
    pub milestone: Option<String>,

    /// "simple" returns only iid, URL, title, description and basic state
    #[clap(long)]
    pub view: Option<String>,

    /// Comma-separated label names
    #[clap(long)]
    pub labels: Option<String>,

    /// Created on or after this time
    #[clap(long, value_parser = parse_timestamp)]
    pub created_after: Option<DateTime<FixedOffset>>,

    /// Created on or before this time
    #[clap(long, value_parser = parse_timestamp)]
    pub created_before: Option<DateTime<FixedOffset>>,

    /// Updated on or after this time
    #[clap(long, value_parser = parse_timestamp)]
    pub updated_after: Option<DateTime<FixedOffset>>,

    /// Updated on or before this time
    #[clap(long, value_parser = parse_timestamp)]
    pub updated_before: Option<DateTime<FixedOffset>>,

    /// created_by_me, assigned_to_me or all
    #[clap(long)]
    pub scope: Option<String>,

    /// Author user id
    #[clap(long)]
    pub author_id: Option<i64>,

    /// Assignee user id
    #[clap(long)]
    pub assignee_id: Option<i64>,

    /// Search title and description
    #[clap(long)]
    pub search: Option<String>,

    /// Source branch name
    #[clap(long)]
    pub source_branch: Option<String>,

    /// Target branch name
    #[clap(long)]
    pub target_branch: Option<String>,

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

/// Translate list flags into API parameters
pub fn list_params(options: &ListOptions) -> Params {
    let mut params = Params::new();
    if !options.iids.is_empty() {
        params.insert("iids".to_string(), OptionValue::from(options.iids.clone()));
    }
    set_opt(&mut params, "state", options.state.clone());
    set_opt(&mut params, "order_by", options.order_by.clone());
    set_opt(&mut params, "sort", options.sort.clone());
    set_opt(&mut params, "milestone", options.milestone.clone());
    set_opt(&mut params, "view", options.view.clone());
    set_opt(&mut params, "labels", options.labels.clone());
    set_opt(&mut params, "created_after", options.created_after);
    set_opt(&mut params, "created_before", options.created_before);
    set_opt(&mut params, "updated_after", options.updated_after);
    set_opt(&mut params, "updated_before", options.updated_before);
    set_opt(&mut params, "scope", options.scope.clone());
    set_opt(&mut params, "author_id", options.author_id);
    set_opt(&mut params, "assignee_id", options.assignee_id);
    set_opt(&mut params, "search", options.search.clone());
    set_opt(&mut params, "source_branch", options.source_branch.clone());
    set_opt(&mut params, "target_branch", options.target_branch.clone());
    set_opt(&mut params, "page", options.page);
    set_opt(&mut params, "per_page", options.per_page);
    params
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running merge requests command...");
    }

    match app.command {
        Commands::List(options) => list(options, &global).await,
    }
}

async fn list(options: ListOptions, global: &crate::Global) -> Result<()> {
    let gitlab = connect(global)?;
    let params = list_params(&options);

    let spinner = spinner(format!("Fetching merge requests of {}...", options.group))?;
    let result = gitlab
        .group_merge_requests()
        .all(options.group.clone(), &params)
        .await;
    spinner.finish_and_clear();

    let data = result?;
    if options.json {
        print_value(&data)
    } else {
        print_listing(&data, "merge request")
    }
}

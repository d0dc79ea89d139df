use crate::prelude::*;
use clap::Parser;

mod cli;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Query and manage GitLab group issues and merge requests"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// GitLab API base URL (defaults to https://gitlab.com/api/v4)
    #[clap(long, env = "GITLAB_URL", global = true)]
    base_url: Option<String>,

    /// Personal access token sent as PRIVATE-TOKEN
    #[clap(long, env = "GITLAB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "GLAPI_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Group issue operations
    Issues(crate::cli::issues::App),

    /// Group merge request operations
    #[command(name = "mrs")]
    MergeRequests(crate::cli::merge_requests::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Issues(sub_app) => crate::cli::issues::run(sub_app, app.global).await,
        SubCommands::MergeRequests(sub_app) => {
            crate::cli::merge_requests::run(sub_app, app.global).await
        }
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use release_maker::boundary::BoundaryWarning;
use release_maker::cli::{self, WorkflowArgs, WorkflowOutcome};
use release_maker::config::{self, Config};
use release_maker::domain::ReleaseType;
use release_maker::forge::{GitHubRepo, HttpForge};
use release_maker::release::ReleaseNotes;
use release_maker::vcs::GitCli;
use release_maker::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "release-maker",
    version,
    about = "Author release notes and changelogs from merged pull requests"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Log progress to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the notes of the next release without writing anything
    Preview {
        #[command(flatten)]
        release: ReleaseArgs,
    },

    /// Write the notes of the next release to <repo>-<version>.md
    #[command(alias = "build")]
    Notes {
        #[command(flatten)]
        release: ReleaseArgs,

        #[arg(long, default_value = ".", help = "Directory for the notes file")]
        output_dir: PathBuf,
    },

    /// Merge the notes into the changelog and open a release pull request
    #[command(alias = "make-release")]
    Changelog {
        #[command(flatten)]
        release: ReleaseArgs,

        #[arg(short, long, help = "Skip confirmation prompts")]
        force: bool,
    },
}

#[derive(clap::Args)]
struct ReleaseArgs {
    #[arg(long, help = "Repository as organization/repository")]
    repo: String,

    #[arg(
        long,
        alias = "release_type",
        value_enum,
        default_value_t = ReleaseType::Minor,
        help = "Version component to increment"
    )]
    release_type: ReleaseType,

    #[arg(long, help = "Markdown file placed under the release heading")]
    blurb_file: Option<PathBuf>,

    #[arg(long, help = "Title used in headings instead of the repository name")]
    project_title: Option<String>,

    #[arg(long, help = "Script run in the clone before the release commit")]
    pre_release_script: Option<PathBuf>,

    #[arg(long, help = "Forge token (defaults to the GH_TOKEN env var)")]
    gh_token: Option<String>,
}

impl ReleaseArgs {
    fn into_workflow_args(self) -> WorkflowArgs {
        WorkflowArgs {
            blurb_file: self.blurb_file,
            project_title: self.project_title,
            pre_release_script: self.pre_release_script,
            gh_token: self.gh_token,
            ..WorkflowArgs::new(self.repo, self.release_type)
        }
    }
}

fn main() {
    let args = Cli::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let (notes, outcome) = match args.command {
        Command::Preview { release } => {
            let args = release.into_workflow_args();
            let token = config.resolve_token(args.gh_token.as_deref());
            let repo = connect(&config, &args, token.as_deref())?;
            cli::preview(&repo, &config, &args)?
        }
        Command::Notes {
            release,
            output_dir,
        } => {
            let args = WorkflowArgs {
                output_dir,
                ..release.into_workflow_args()
            };
            let token = config.resolve_token(args.gh_token.as_deref());
            let repo = connect(&config, &args, token.as_deref())?;
            cli::write_notes(&repo, &config, &args)?
        }
        Command::Changelog { release, force } => {
            let args = WorkflowArgs {
                force,
                ..release.into_workflow_args()
            };
            let token = config.require_token(args.gh_token.as_deref())?;
            let repo = connect(&config, &args, Some(&token))?;
            ui::display_status(&format!("Preparing release of {}...", args.repo));
            cli::publish(&repo, &GitCli::new(), &config, &args, &token, |prompt| {
                ui::confirm_action(prompt)
            })?
        }
    };

    report(&config, &notes, outcome);
    Ok(())
}

/// Bind an HTTP forge client to the repository named in `args`
fn connect(
    config: &Config,
    args: &WorkflowArgs,
    token: Option<&str>,
) -> Result<GitHubRepo<HttpForge>> {
    let forge = HttpForge::new(token)?;
    Ok(GitHubRepo::new(forge, &args.repo, config)?)
}

fn report(config: &Config, notes: &ReleaseNotes, outcome: WorkflowOutcome) {
    for warning in cli::boundary_warnings(notes) {
        ui::display_boundary_warning(&warning);
    }
    ui::display_release_plan(
        notes.previous.tag.as_ref().map(|_| &notes.previous.version),
        &notes.version,
        notes.release_type.name(),
        &notes.counts,
        notes.pull_requests.len(),
    );

    match outcome {
        WorkflowOutcome::Previewed { markdown, .. } => ui::display_markdown(&markdown),
        WorkflowOutcome::NotesWritten { path, .. } => {
            ui::display_success(&format!("Saved release notes to {}", path.display()))
        }
        WorkflowOutcome::Published { pull_request, .. } => ui::display_success(&format!(
            "Release pull request #{} is ready: {}",
            pull_request.number, pull_request.html_url
        )),
        WorkflowOutcome::AlreadyPresent { version } => {
            ui::display_boundary_warning(&BoundaryWarning::VersionAlreadyPresent {
                version: version.to_string(),
                file: config.changelog_file.clone(),
            })
        }
        WorkflowOutcome::Cancelled { .. } => println!("Operation cancelled by user."),
    }
}

//! diffscribe - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use diffscribe::config::Config;
use diffscribe::confirm::{TerminalPrompter, UnknownInputPolicy};
use diffscribe::git::SystemGit;
use diffscribe::llm::ChatClient;
use diffscribe::publish::GhCli;
use diffscribe::workflow::{self, CommitOptions, PrOptions, WorkflowOutcome};
use diffscribe::WorkflowError;

/// Write commit messages and pull requests from your diff.
#[derive(Parser, Debug)]
#[command(name = "diffscribe")]
#[command(about = "Write commit messages and pull requests from your diff")]
#[command(version)]
struct Cli {
    /// Show debug logs (prompt sizes, git commands, HTTP calls)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stage all changes, generate a commit message, then commit and push
    Commit {
        /// What to do with a reply other than y/n (default: use it as the message)
        #[arg(long, value_enum)]
        on_unknown: Option<UnknownInputPolicy>,
    },

    /// Generate a pull request title and description, then open it with gh
    Pr {
        /// Branch the pull request merges into
        base: String,

        /// Extra instructions for the model (words are joined; put any words
        /// starting with '-' after `--`)
        instructions: Vec<String>,

        /// What to do with a reply other than y/n (default: abort). With
        /// `override` the reply becomes the title and the description,
        /// including any `Fixes:` trailer, is cleared
        #[arg(long, value_enum)]
        on_unknown: Option<UnknownInputPolicy>,

        /// Include lockfiles, manifests, and images in the diff
        #[arg(long)]
        include_all: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(WorkflowOutcome::Published(_)) | Ok(WorkflowOutcome::Aborted) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<WorkflowError>() {
            Some(WorkflowError::NoChanges(msg)) => {
                println!("{}", msg);
                ExitCode::SUCCESS
            }
            // Workflow errors already embed their cause in the message.
            Some(workflow_error) => {
                eprintln!("Error: {}", workflow_error);
                ExitCode::FAILURE
            }
            None => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> Result<WorkflowOutcome> {
    // A missing .env is fine; the variables may come from the shell.
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("Configuration error")?;
    let workdir = std::env::current_dir().context("Could not read the current directory")?;
    let vcs = SystemGit::new(&workdir);
    let backend = ChatClient::new(&config)?;
    let mut prompter = TerminalPrompter;

    match cli.command {
        Command::Commit { on_unknown } => {
            let options = CommitOptions {
                policy: on_unknown.unwrap_or(UnknownInputPolicy::Override),
                instructions: None,
            };
            let outcome =
                workflow::commit::run(&vcs, &backend, &mut prompter, &config, &workdir, &options)
                    .await?;

            match &outcome {
                WorkflowOutcome::Published(message) => {
                    println!("Generated and pushed commit message:\n{}", message)
                }
                WorkflowOutcome::Aborted => println!("Commit cancelled."),
            }
            Ok(outcome)
        }
        Command::Pr {
            base,
            instructions,
            on_unknown,
            include_all,
        } => {
            let joined = instructions.join(" ");
            let options = PrOptions {
                base,
                instructions: (!joined.trim().is_empty()).then_some(joined),
                policy: on_unknown.unwrap_or(UnknownInputPolicy::Abort),
                include_all,
            };
            let outcome = workflow::pr::run(
                &vcs,
                &GhCli,
                &backend,
                &mut prompter,
                &config,
                &workdir,
                &options,
            )
            .await?;

            match &outcome {
                WorkflowOutcome::Published(_) => println!("Pull request created successfully."),
                WorkflowOutcome::Aborted => println!("Pull request creation cancelled."),
            }
            Ok(outcome)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

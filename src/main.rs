//! gitadd CLI
//!
//! Pick which changed files should be staged, from an interactive list.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use gitadd::checkbox::{self, PromptError};
use gitadd::git::Git;
use gitadd::logging::install_tracing;
use gitadd::report::{format_outcome, format_plan};
use gitadd::stage::{NOTHING_TO_DO, checkbox_config, execute_with_progress, plan};
use gitadd::status::parse_porcelain;
use gitadd::types::{OutputFormat, StageOptions};

/// Exit status for an interrupted prompt, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(name = "gitadd")]
#[command(about = "Interactively choose which changed files to stage")]
#[command(version)]
struct Cli {
    /// Number of files visible at once
    #[arg(long, default_value_t = 20)]
    page_size: usize,

    /// Wrap around when moving past the first or last file
    #[arg(long = "loop")]
    loop_navigation: bool,

    /// Refuse to continue with nothing selected
    #[arg(long)]
    required: bool,

    /// Preview only, don't touch the index
    #[arg(long)]
    dry_run: bool,

    /// Output format for the plan or outcome
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Write logs here instead of stderr (logging needs RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run as if started in this directory
    #[arg(short = 'C', default_value = ".")]
    directory: PathBuf,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = install_tracing(cli.log_file.as_deref()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match cmd_stage(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(PromptError::Aborted) = e.downcast_ref::<PromptError>() {
                return ExitCode::from(EXIT_INTERRUPTED);
            }
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROGRESS
// ============================================================================

fn progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.set_message(msg.to_string());
    pb
}

// ============================================================================
// COMMAND HANDLER
// ============================================================================

async fn cmd_stage(cli: Cli) -> anyhow::Result<()> {
    let format: OutputFormat = cli.format.into();
    let git = Git::discover(&cli.directory)?;

    let output = git.status_porcelain().context("Could not read git status")?;
    let files = parse_porcelain(&output);
    debug!(count = files.len(), "changed files");

    if files.is_empty() {
        println!("{}", NOTHING_TO_DO);
        return Ok(());
    }

    let options = StageOptions {
        page_size: cli.page_size,
        loop_navigation: cli.loop_navigation,
        required: cli.required,
    };
    let selected = checkbox::prompt(checkbox_config(&files, &options)).await?;
    let plan = plan(&files, &selected);

    if cli.dry_run {
        print!("{}", format_plan(&plan, format));
        return Ok(());
    }

    let total = (plan.stage.len() + plan.unstage.len()) as u64;
    let pb = match format {
        OutputFormat::Human => progress_bar(total, "Updating index"),
        OutputFormat::Json => ProgressBar::hidden(),
    };
    let outcome = execute_with_progress(&plan, &git, |path| {
        pb.set_message(path.to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    match format {
        OutputFormat::Json => println!("{}", format_outcome(&outcome, format)),
        OutputFormat::Human => {
            if !outcome.failed.is_empty() {
                eprint!("{}", format_outcome(&outcome, format));
            }
            git.show_status()?;
        }
    }

    if !outcome.failed.is_empty() {
        bail!("{} path(s) could not be updated", outcome.failed.len());
    }
    Ok(())
}

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use monthlify::{
    cli,
    config::{self, Settings},
    curate::MonthKey,
    error, logging,
};

/// Pattern used by `delete` when none is given.
const DEFAULT_DELETE_PATTERN: &str = r"^(Monthly|Discover Weekly Archive).*";

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Print diagnostic logs
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Add liked songs of the current month to its monthly playlist
    Monthly,

    /// Archive Discover Weekly tracks into a cumulative archive playlist
    Weekly,

    /// Delete playlists whose names match a regex (dry run unless --execute)
    Delete(DeleteOptions),

    /// Create or update monthly playlists for past months from saved tracks
    Backfill(BackfillOptions),

    /// Show last monthly run and playlist naming
    Status,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    /// Regex searched anywhere in the playlist name
    #[clap(long, short, default_value = DEFAULT_DELETE_PATTERN)]
    pattern: String,

    /// Actually delete the matches instead of listing them
    #[clap(long)]
    execute: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct BackfillOptions {
    /// Lower bound month, YYYY-MM
    #[clap(long, conflicts_with = "months", required_unless_present = "months")]
    since: Option<MonthKey>,

    /// Backfill the last N months
    #[clap(long)]
    months: Option<u32>,

    /// Upper bound month, YYYY-MM (inclusive). Defaults to the current month
    #[clap(long)]
    until: Option<MonthKey>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = logging::init_logging(cli.verbose) {
        error!("{}", e);
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("{}", e),
    };

    match cli.command {
        Command::Auth => cli::auth(&settings).await,
        Command::Monthly => cli::monthly(&settings).await,
        Command::Weekly => cli::weekly(&settings).await,
        Command::Delete(opt) => cli::delete(&settings, &opt.pattern, !opt.execute).await,
        Command::Backfill(opt) => cli::backfill(&settings, opt.since, opt.months, opt.until).await,
        Command::Status => cli::status(&settings).await,
        Command::Completions(_) => {}
    }
}

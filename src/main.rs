use anyhow::{Context, Result};
use clap::Parser;
use pacroots::commands::{self, Config};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// pacroots - derive a minimal install manifest from the pacman database
///
/// Finds every installed package whose name no other package depends on,
/// and renders those "root" packages as an Ansible playbook.
///
/// Examples:
///   pacroots --db /var/lib/pacman/local roots
///   pacroots --db /var/lib/pacman/local --output site.yml watch
#[derive(Parser, Debug)]
#[command(author, version = env!("PACROOTS_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Package metadata database root (also via PACROOTS_DB)
    #[arg(long = "db", env = "PACROOTS_DB", value_name = "PATH", global = true)]
    pub db_root: Option<PathBuf>,

    /// Playbook output file (also via PACROOTS_OUTPUT)
    #[arg(
        long = "output",
        short = 'o',
        env = "PACROOTS_OUTPUT",
        value_name = "PATH",
        global = true
    )]
    pub output: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print every package record as JSON
    Records(RecordsArgs),

    /// Print the root packages as JSON
    Roots,

    /// Write the playbook once
    Playbook,

    /// Rewrite the playbook whenever a package is installed or removed
    Watch(WatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct RecordsArgs {
    /// Only print the first N records (0 prints all)
    #[arg(long, short = 'n', value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    /// Skip the rebuild at startup and wait for the first change
    #[arg(long)]
    pub no_initial: bool,

    /// Wait this long after a change and fold further changes into one rebuild
    #[arg(long, value_name = "MS", default_value_t = 0)]
    pub settle_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = pacroots::runtime::RealRuntime;
    let config = Config::new(cli.db_root, cli.output)?;

    match cli.command {
        Commands::Records(args) => {
            commands::records(&runtime, &config, args.limit, &mut io::stdout().lock())
                .context("Failed to list package records")?
        }
        Commands::Roots => {
            commands::roots(&runtime, &config, io::stdout().lock())
                .context("Failed to compute root packages")?;
        }
        Commands::Playbook => {
            commands::playbook(&runtime, &config).context("Failed to write playbook")?;
        }
        Commands::Watch(args) => commands::watch(
            &runtime,
            &config,
            !args.no_initial,
            Duration::from_millis(args.settle_ms),
        )
        .await
        .context("Watcher stopped")?,
    }
    Ok(())
}

//! bpm - mirror and edit pudb's saved breakpoints from the command line

use anyhow::Result;
use bp_cli::{cmd, config::Config, util};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mirror and edit the debugger's persisted breakpoints
#[derive(Parser)]
#[command(name = "bpm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the breakpoint store directory
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all breakpoints grouped by file
    Status {
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// List breakpoints for one file
    List {
        /// Source file
        file: PathBuf,
    },
    /// Toggle the breakpoint at file:line
    Toggle {
        /// Source file
        file: PathBuf,
        /// 1-based line number
        line: u32,
    },
    /// Place a breakpoint, optionally conditional
    Set {
        /// Source file
        file: PathBuf,
        /// 1-based line number
        line: u32,
        /// Condition expression evaluated before stopping
        #[arg(short, long)]
        condition: Option<String>,
    },
    /// Remove the breakpoint at file:line
    Unset {
        /// Source file
        file: PathBuf,
        /// 1-based line number
        line: u32,
    },
    /// Remove every breakpoint in one file
    Clear {
        /// Source file
        file: PathBuf,
    },
    /// Empty the whole breakpoint store
    Reset {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print the vim sign commands that render a file's breakpoints
    Signs {
        /// Source file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut registry = util::open_registry(cli.store_dir.as_deref(), &config)?;

    match cli.command {
        Commands::Status { json } => cmd::status::run(&registry, json),
        Commands::List { file } => cmd::list::run(&registry, &util::absolutize(&file)?),
        Commands::Toggle { file, line } => {
            cmd::toggle::run(&mut registry, &util::absolutize(&file)?, line)
        }
        Commands::Set {
            file,
            line,
            condition,
        } => cmd::set::run(
            &mut registry,
            &util::absolutize(&file)?,
            line,
            condition.as_deref(),
        ),
        Commands::Unset { file, line } => {
            cmd::unset::run(&mut registry, &util::absolutize(&file)?, line)
        }
        Commands::Clear { file } => cmd::clear::run(&mut registry, &util::absolutize(&file)?),
        Commands::Reset { yes } => cmd::reset::run(&mut registry, yes),
        Commands::Signs { file } => cmd::signs::run(
            &mut registry,
            &util::absolutize(&file)?,
            &config.signs,
        ),
    }
}

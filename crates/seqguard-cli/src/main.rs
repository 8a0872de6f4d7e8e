use clap::{Parser, Subcommand};

mod commands;
mod signal;

#[derive(Parser)]
#[command(
    name = "seqguard",
    about = "seqguard — primary key sequence overflow checks",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a snapshot once.
    ///
    /// Exits non-zero when a table is overflowed or will overflow within
    /// the horizon, unless --lenient is given.
    Analyze {
        /// Path to the JSON snapshot of models and rows
        #[arg(short, long)]
        snapshot: String,
        /// Path to seqguard.toml (default: ./seqguard.toml if present)
        #[arg(short, long)]
        config: Option<String>,
        /// Override [analysis].horizon_days
        #[arg(long)]
        horizon_days: Option<u64>,
        /// Signal breaches instead of failing
        #[arg(long)]
        lenient: bool,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Re-analyze a snapshot periodically until interrupted.
    Watch {
        #[arg(short, long)]
        snapshot: String,
        #[arg(short, long)]
        config: Option<String>,
        /// Interval between runs, e.g. 30s, 15m, 1h, 1d
        #[arg(short, long, default_value = "1h")]
        interval: String,
    },
    /// Generate a seqguard.toml scaffold
    Init {
        #[arg(short, long, default_value = ".")]
        path: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("seqguard=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            snapshot,
            config,
            horizon_days,
            lenient,
            format,
        } => commands::analyze::analyze(
            &snapshot,
            config.as_deref(),
            horizon_days,
            lenient,
            &format,
        ),
        Commands::Watch {
            snapshot,
            config,
            interval,
        } => commands::watch::watch(&snapshot, config.as_deref(), &interval),
        Commands::Init { path } => commands::init::init(&path),
    }
}

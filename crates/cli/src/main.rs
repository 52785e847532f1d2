mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nodectl",
    about = "Remote control for Bitcoin Core and LND nodes over Tor"
)]
struct Cli {
    /// SOCKS5 proxy for onion routing, e.g. socks5h://127.0.0.1:9050
    #[arg(long, global = true)]
    socks5: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// JSON file with node profiles; consulted when no explicit address is given
    #[arg(long, global = true)]
    nodes: Option<std::path::PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// LND REST commands.
    Lnd(commands::lnd::LndArgs),
    /// Bitcoin Core JSON-RPC commands.
    Core(commands::core::CoreArgs),
    /// Combined on-chain/off-chain balance summary.
    Balances(commands::balances::BalancesArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let globals = commands::common::Globals {
        socks5: cli.socks5,
        timeout: cli.timeout,
        nodes: cli.nodes,
    };
    let result = match cli.command {
        Commands::Lnd(args) => commands::lnd::run(&globals, args),
        Commands::Core(args) => commands::core::run(&globals, args),
        Commands::Balances(args) => commands::balances::run(&globals, args),
    };
    if let Err(err) = result {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

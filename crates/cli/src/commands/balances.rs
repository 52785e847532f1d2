use anyhow::Result;
use clap::Args;
use node_rpc::{load_balances, CoreRpc, LndRest};

use super::common::{print_json, Globals};

#[derive(Args)]
pub struct BalancesArgs {
    /// Core node address, host:port
    #[arg(long)]
    pub core_address: Option<String>,
    #[arg(long)]
    pub rpcuser: Option<String>,
    #[arg(long)]
    pub rpcpassword: Option<String>,
    /// Wallet to route wallet-scoped calls to (/wallet/<name>)
    #[arg(long)]
    pub wallet: Option<String>,
    /// LND node address; omit to fall back to the registry, or to skip
    /// the off-chain figure entirely
    #[arg(long)]
    pub lnd_address: Option<String>,
    #[arg(long)]
    pub macaroon: Option<String>,
}

pub fn run(globals: &Globals, args: BalancesArgs) -> Result<()> {
    let (address, user, pass) =
        globals.resolve_core(args.core_address, args.rpcuser, args.rpcpassword)?;
    let transport = globals.transport()?;
    let mut core = CoreRpc::new(&address, &user, &pass, transport.clone())?;
    if let Some(wallet) = args.wallet {
        core = core.with_wallet(&wallet);
    }

    let lnd_pair = if args.lnd_address.is_some() || args.macaroon.is_some() {
        Some(globals.resolve_lnd(args.lnd_address, args.macaroon)?)
    } else {
        globals.lightning_from_registry()?
    };
    let lnd = match &lnd_pair {
        Some((address, macaroon)) => Some(LndRest::new(address, macaroon, transport.clone())?),
        None => None,
    };

    let balances = load_balances(&core, lnd.as_ref())?;
    print_json(&balances)
}

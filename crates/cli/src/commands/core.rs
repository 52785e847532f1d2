use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use node_rpc::CoreRpc;
use serde_json::{json, Value};

use super::common::{print_json, Globals};

#[derive(Args)]
pub struct CoreArgs {
    /// Node address, host:port (an onion host for Tor-routed nodes)
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub rpcuser: Option<String>,
    #[arg(long)]
    pub rpcpassword: Option<String>,
    /// Wallet to route wallet-scoped calls to (/wallet/<name>)
    #[arg(long)]
    pub wallet: Option<String>,
    #[command(subcommand)]
    pub command: CoreSubcommand,
}

#[derive(Subcommand)]
pub enum CoreSubcommand {
    Getblockchaininfo,
    Getnetworkinfo,
    Getwalletinfo,
    Getbalances,
    Listunspent,
    Listtransactions {
        #[arg(long, default_value_t = 25)]
        count: u32,
    },
    Gettransaction {
        txid: String,
    },
    Getnewaddress,
    Sendrawtransaction {
        tx_hex: String,
    },
    Estimatesmartfee {
        #[arg(long, default_value_t = 6)]
        target: u32,
    },
    /// Raw passthrough: method name plus params as a JSON array.
    Call {
        method: String,
        #[arg(default_value = "[]")]
        params: String,
    },
}

pub fn run(globals: &Globals, args: CoreArgs) -> Result<()> {
    let (address, user, pass) = globals.resolve_core(args.address, args.rpcuser, args.rpcpassword)?;
    let mut core = CoreRpc::new(&address, &user, &pass, globals.transport()?)?;
    if let Some(wallet) = args.wallet {
        core = core.with_wallet(&wallet);
    }

    let value = match args.command {
        CoreSubcommand::Getblockchaininfo => core.call("getblockchaininfo", json!([]))?,
        CoreSubcommand::Getnetworkinfo => core.call("getnetworkinfo", json!([]))?,
        CoreSubcommand::Getwalletinfo => core.call("getwalletinfo", json!([]))?,
        CoreSubcommand::Getbalances => core.call("getbalances", json!([]))?,
        CoreSubcommand::Listunspent => core.call("listunspent", json!([]))?,
        CoreSubcommand::Listtransactions { count } => {
            core.call("listtransactions", json!(["*", count]))?
        }
        CoreSubcommand::Gettransaction { txid } => core.get_transaction(&txid, true)?,
        CoreSubcommand::Getnewaddress => core.call("getnewaddress", json!([]))?,
        CoreSubcommand::Sendrawtransaction { tx_hex } => {
            core.call("sendrawtransaction", json!([tx_hex]))?
        }
        CoreSubcommand::Estimatesmartfee { target } => {
            core.call("estimatesmartfee", json!([target]))?
        }
        CoreSubcommand::Call { method, params } => {
            let params: Value =
                serde_json::from_str(&params).context("params must be a JSON array")?;
            core.call(&method, params)?
        }
    };
    print_json(&value)
}

use anyhow::Result;
use clap::{Args, Subcommand};
use node_rpc::{LndCommand, LndRest};
use serde_json::{Map, Value};

use super::common::{print_json, Globals};

#[derive(Args)]
pub struct LndArgs {
    /// Node address, host[:port] (an onion host for Tor-routed nodes)
    #[arg(long)]
    pub address: Option<String>,
    /// Macaroon credential, hex encoded
    #[arg(long)]
    pub macaroon: Option<String>,
    #[command(subcommand)]
    pub command: LndSubcommand,
}

#[derive(Subcommand)]
pub enum LndSubcommand {
    /// Node identity, version and sync state.
    Getinfo,
    /// Create an invoice.
    Addinvoice {
        /// Invoice amount in satoshis
        #[arg(long)]
        sat: u64,
        #[arg(long)]
        memo: Option<String>,
    },
    /// Decode a payment request.
    Payreq { payment_request: String },
    /// List outgoing payments.
    Listpayments,
    /// On-chain balance held by LND's internal wallet.
    Walletbalance,
    /// Channel (off-chain) balance.
    Channelbalance,
}

pub fn run(globals: &Globals, args: LndArgs) -> Result<()> {
    let (address, macaroon) = globals.resolve_lnd(args.address, args.macaroon)?;
    let lnd = LndRest::new(&address, &macaroon, globals.transport()?)?;

    let command = match args.command {
        LndSubcommand::Getinfo => LndCommand::GetInfo,
        LndSubcommand::Addinvoice { sat, memo } => {
            let mut params = Map::new();
            params.insert("value".into(), Value::from(sat));
            if let Some(memo) = memo {
                params.insert("memo".into(), Value::from(memo));
            }
            LndCommand::AddInvoice(params)
        }
        LndSubcommand::Payreq { payment_request } => LndCommand::PayReq(payment_request),
        LndSubcommand::Listpayments => LndCommand::ListPayments,
        LndSubcommand::Walletbalance => LndCommand::WalletBalance,
        LndSubcommand::Channelbalance => LndCommand::ChannelBalance,
    };

    let document = lnd.execute(&command)?;
    print_json(&document)
}

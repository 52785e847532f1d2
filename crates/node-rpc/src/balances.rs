//! Combined balance summary, the way a wallet front-end renders it: Core
//! supplies the on-chain figure, LND (when configured) the channel
//! balance.

use serde::Serialize;

use crate::bitcoind::CoreRpc;
use crate::error::RpcError;
use crate::lnd::LndRest;
use crate::transport::HttpTransport;

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Balances {
    /// Trusted spendable on-chain balance, in BTC.
    pub onchain_btc: f64,
    /// Local channel balance, in satoshis.
    pub offchain_sat: u64,
}

/// A missing lightning node yields a zero off-chain balance, not an
/// error; a failing one surfaces its error.
pub fn load_balances<T: HttpTransport>(
    core: &CoreRpc<T>,
    lnd: Option<&LndRest<T>>,
) -> Result<Balances, RpcError> {
    let onchain = core.get_balances()?;
    let offchain_sat = match lnd {
        Some(client) => client.channel_balance()?.balance_sat(),
        None => 0,
    };
    Ok(Balances {
        onchain_btc: onchain.mine.trusted,
        offchain_sat,
    })
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use node_registry::{
    first_core_node, first_lightning_node, CredentialVault, NodeProfile, PlainVault,
};
use node_rpc::TorTransport;
use tracing::debug;

pub struct Globals {
    pub socks5: Option<String>,
    pub timeout: u64,
    pub nodes: Option<PathBuf>,
}

impl Globals {
    pub fn transport(&self) -> Result<TorTransport> {
        TorTransport::new(self.socks5.as_deref(), Duration::from_secs(self.timeout))
            .map_err(|e| anyhow!("transport: {e}"))
    }

    fn registry(&self) -> Result<Option<Vec<NodeProfile>>> {
        let Some(path) = self.nodes.as_ref() else {
            return Ok(None);
        };
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let nodes: Vec<NodeProfile> =
            serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
        debug!(count = nodes.len(), "loaded node registry");
        Ok(Some(nodes))
    }

    /// Explicit flags win; otherwise the first eligible lightning profile
    /// from the registry file supplies address + macaroon.
    pub fn resolve_lnd(
        &self,
        address: Option<String>,
        macaroon: Option<String>,
    ) -> Result<(String, String)> {
        if let (Some(address), Some(macaroon)) = (&address, &macaroon) {
            validate_macaroon(macaroon)?;
            return Ok((address.clone(), macaroon.clone()));
        }
        if address.is_some() || macaroon.is_some() {
            bail!("--address and --macaroon must be given together");
        }
        match self.lightning_from_registry()? {
            Some(pair) => Ok(pair),
            None => bail!(
                "no eligible node: pass --address/--macaroon or provide --nodes with a lightning profile"
            ),
        }
    }

    /// First eligible lightning profile from the registry file, if any.
    pub fn lightning_from_registry(&self) -> Result<Option<(String, String)>> {
        let Some(nodes) = self.registry()? else {
            return Ok(None);
        };
        let Some(profile) = first_lightning_node(&nodes) else {
            return Ok(None);
        };
        let macaroon = PlainVault
            .open(&profile.credential)
            .map_err(|e| anyhow!("open credential for {}: {e}", profile.id))?;
        validate_macaroon(&macaroon)?;
        Ok(Some((profile.address.clone(), macaroon.to_string())))
    }

    /// Explicit flags win; otherwise the first eligible Core profile from
    /// the registry file supplies address + `rpcuser:rpcpassword`.
    pub fn resolve_core(
        &self,
        address: Option<String>,
        rpcuser: Option<String>,
        rpcpassword: Option<String>,
    ) -> Result<(String, String, String)> {
        if let (Some(address), Some(user), Some(pass)) = (&address, &rpcuser, &rpcpassword) {
            return Ok((address.clone(), user.clone(), pass.clone()));
        }
        if address.is_some() || rpcuser.is_some() || rpcpassword.is_some() {
            bail!("--address, --rpcuser and --rpcpassword must be given together");
        }
        let nodes = self.registry()?.ok_or_else(|| {
            anyhow!("no eligible node: pass --address/--rpcuser/--rpcpassword or provide --nodes")
        })?;
        let profile = first_core_node(&nodes).ok_or_else(|| {
            anyhow!("no eligible node: registry has no core profile with a credential")
        })?;
        let plain = PlainVault
            .open(&profile.credential)
            .map_err(|e| anyhow!("open credential for {}: {e}", profile.id))?;
        let (user, pass) = plain.split_once(':').ok_or_else(|| {
            anyhow!(
                "core credential for {} must be rpcuser:rpcpassword",
                profile.id
            )
        })?;
        Ok((profile.address.clone(), user.to_string(), pass.to_string()))
    }
}

fn validate_macaroon(macaroon: &str) -> Result<()> {
    hex::decode(macaroon)
        .map(|_| ())
        .map_err(|e| anyhow!("macaroon must be hex: {e}"))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

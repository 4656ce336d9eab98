//! Asynchronous resolution of a server's preferred address.
//!
//! Only literal addresses are resolved. The lookup never consults DNS or a
//! service database.

use tokio::net::lookup_host;
use tracing::debug;

use super::error::ResolveError;
use crate::address::{Family, PreferredAddress, PreferredAddressPolicy, SocketAddress};

/// Resolve a literal `host` and `port`, keeping only results of `family`.
pub async fn resolve_numeric(
    host: &str,
    port: u16,
    family: Family,
) -> Result<SocketAddress, ResolveError> {
    if !SocketAddress::is_numeric_host(host) {
        return Err(ResolveError::NotNumeric(host.to_string()));
    }

    let mut candidates = lookup_host((host, port)).await?;
    candidates
        .find(|candidate| Family::of(candidate) == family)
        .map(SocketAddress::from)
        .ok_or(ResolveError::NoMatchingAddress)
}

/// Resolve the preferred address a server advertised.
///
/// Uses only the entry matching `local_family`. Any error means the client
/// stays on its current path.
pub async fn resolve_preferred_address(
    local_family: Family,
    record: &PreferredAddress,
    policy: PreferredAddressPolicy,
) -> Result<SocketAddress, ResolveError> {
    if policy == PreferredAddressPolicy::Ignore {
        return Err(ResolveError::Ignored);
    }

    let selected = record.select(local_family).ok_or(ResolveError::NotOffered)?;
    let host = selected.ip().to_string();

    let result = resolve_numeric(&host, selected.port(), local_family).await;
    match &result {
        Ok(addr) => debug!(%addr, "preferred address resolved"),
        Err(err) => debug!(%host, error = %err, "preferred address not usable"),
    }
    result
}

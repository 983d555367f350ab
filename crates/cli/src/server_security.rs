use anyhow::{Context as AnyhowContext, Result};
use std::net::SocketAddr;

pub(crate) async fn resolve_guarded_bind_addrs(
    bind: &str,
    public: bool,
) -> Result<Vec<SocketAddr>> {
    let addrs = resolve_bind_addrs(bind).await?;
    enforce_bind_guard_for_addrs(bind, &addrs, public)?;
    Ok(addrs)
}

async fn resolve_bind_addrs(bind: &str) -> Result<Vec<SocketAddr>> {
    // lookup_host so that "localhost:7700" works
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host(bind)
        .await
        .with_context(|| format!("Failed to resolve bind address: {bind}"))?
        .collect();

    if addrs.is_empty() {
        anyhow::bail!("Bind address resolved to zero socket addrs: {bind}")
    }
    Ok(addrs)
}

fn enforce_bind_guard_for_addrs(bind: &str, addrs: &[SocketAddr], public: bool) -> Result<()> {
    let any_non_loopback = addrs.iter().any(|addr| !addr.ip().is_loopback());
    if any_non_loopback && !public {
        anyhow::bail!(
            "Refusing to bind to non-loopback address without --public: {bind}. Pass --public to expose the Command API on the network."
        )
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_guard_requires_public_for_non_loopback() {
        resolve_guarded_bind_addrs("127.0.0.1:0", false)
            .await
            .unwrap();

        assert!(resolve_guarded_bind_addrs("0.0.0.0:0", false)
            .await
            .is_err());
        resolve_guarded_bind_addrs("0.0.0.0:0", true).await.unwrap();
    }

    #[test]
    fn guard_checks_every_resolved_address() {
        let addrs: Vec<SocketAddr> = vec![
            "127.0.0.1:7700".parse().unwrap(),
            "192.168.1.20:7700".parse().unwrap(),
        ];
        assert!(enforce_bind_guard_for_addrs("mixed", &addrs, false).is_err());
        assert!(enforce_bind_guard_for_addrs("mixed", &addrs, true).is_ok());
    }
}

use std::{net::SocketAddr, time::Duration};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Runtime configuration, resolved as defaults < env vars < CLI flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "evm-send-connector")]
#[command(about = "Transaction submission connector for Ethereum JSON-RPC nodes")]
#[command(version)]
pub struct Config {
    /// Address the JSON-RPC server listens on
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3030")]
    pub bind_addr: SocketAddr,

    /// Ethereum node JSON-RPC endpoint
    #[arg(
        long,
        env = "ETH_RPC_URL",
        default_value = "https://eth-mainnet.alchemyapi.io/v2/demo"
    )]
    pub rpc_url: String,

    /// Deadline for each outbound RPC call
    #[arg(long, env = "RPC_TIMEOUT_MS", default_value_t = 30_000)]
    pub rpc_timeout_ms: u64,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}

pub fn init_tracing(log_level: &str) {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_flags_override_defaults() {
        let config = Config::try_parse_from([
            "evm-send-connector",
            "--bind-addr",
            "0.0.0.0:9000",
            "--rpc-url",
            "http://localhost:8545",
            "--rpc-timeout-ms",
            "2500",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.rpc_timeout(), Duration::from_millis(2500));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_bad_bind_addr() {
        assert!(Config::try_parse_from(["evm-send-connector", "--bind-addr", "nowhere"]).is_err());
    }
}

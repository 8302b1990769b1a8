use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use alloy_primitives::Address;
use clap::Parser;
use preconfapi_server::{CalldataTransactionBuilder, PreconfApiServer, PreconfState};
use tracing::info;

#[derive(Debug, Parser)]
pub struct ServeCommand {
    /// http service address to listen on.
    #[clap(long, env = "PRECONFAPI_HTTP_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub http_addr: IpAddr,

    /// http service port to listen on.
    #[clap(long, env = "PRECONFAPI_HTTP_PORT", default_value_t = 9871)]
    pub http_port: u16,

    /// TaikoL1 contract address, the target of proposeBlock
    #[clap(long, env = "TAIKO_L1_ADDRESS")]
    pub taiko_l1_address: Address,

    /// gas limit set on the unsigned proposeBlock transaction
    #[clap(long, env = "PROPOSE_BLOCK_GAS_LIMIT", default_value_t = 3_000_000)]
    pub propose_block_gas_limit: u64,

    /// seconds a single build may take before the request fails
    #[clap(long, env = "PRECONFAPI_BUILD_TIMEOUT_SECS", default_value_t = 12)]
    pub build_timeout_secs: u64,
}

impl ServeCommand {
    pub async fn execute(&self) -> eyre::Result<()> {
        info!(
            taiko_l1_address = %self.taiko_l1_address,
            gas_limit = self.propose_block_gas_limit,
            "Starting preconf api"
        );

        let builder =
            CalldataTransactionBuilder::new(self.taiko_l1_address, self.propose_block_gas_limit);
        let state = PreconfState::new(builder, Duration::from_secs(self.build_timeout_secs));
        let server = PreconfApiServer::new(SocketAddr::new(self.http_addr, self.http_port));
        server.run(state).await?;

        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down...");
        Ok(())
    }
}

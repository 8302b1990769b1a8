use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use preconfapi_primitives::{encode_rlp_hex, BuildBlockRequest, BuildBlockResponse};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{
    error::{PreconfApiError, PreconfApiResult},
    tx_builder::BlockTransactionBuilder,
};

pub const ROOT: &str = "/";
pub const HEALTH: &str = "/healthz";
pub const BUILD_BLOCK: &str = "/block/build";

#[derive(Debug)]
pub struct PreconfState<B> {
    builder: B,
    /// Upper bound for a single builder call
    build_timeout: Duration,
}

impl<B: BlockTransactionBuilder> PreconfState<B> {
    pub const fn new(builder: B, build_timeout: Duration) -> Self {
        Self { builder, build_timeout }
    }

    /// Validates the request, hands the encoded tx list to the builder and
    /// returns the built transaction rlp encoded as hex.
    pub async fn build_block(
        &self,
        request: BuildBlockRequest,
    ) -> PreconfApiResult<BuildBlockResponse> {
        info!(
            items = request.signed_transactions.len(),
            l1_state_block_number = request.l1_state_block_number,
            timestamp = request.timestamp,
            "Received block build request"
        );

        let params = request
            .into_params()
            .inspect_err(|err| warn!(%err, "Rejected block build request"))?;
        info!(
            tx_count = params.tx_count,
            tx_list_len = params.tx_list.len(),
            "Decoded block transaction list"
        );

        let built = tokio::time::timeout(
            self.build_timeout,
            self.builder.build_unsigned(
                params.tx_list,
                params.l1_state_block_number,
                params.timestamp,
                params.coinbase,
                params.extra_data,
            ),
        )
        .await;
        let tx = match built {
            Ok(Ok(tx)) => tx,
            Ok(Err(err)) => {
                error!(?err, "Failed to build propose block transaction");
                return Err(PreconfApiError::Builder(err));
            }
            Err(_) => {
                error!(timeout = ?self.build_timeout, "Propose block transaction build timed out");
                return Err(PreconfApiError::BuilderTimeout(self.build_timeout));
            }
        };

        Ok(BuildBlockResponse { rlp_encoded_tx: encode_rlp_hex(&tx) })
    }
}

pub fn router<B: BlockTransactionBuilder>(state: Arc<PreconfState<B>>) -> Router {
    Router::new()
        .route(ROOT, get(health_check))
        .route(HEALTH, get(health_check))
        .route(BUILD_BLOCK, get(build_block::<B>).post(build_block::<B>))
        .with_state(state)
}

pub struct PreconfApiServer {
    /// The address to bind the server to
    addr: SocketAddr,
}

impl PreconfApiServer {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds the listener and serves in the background. Returns the bound
    /// address, which differs from the configured one when port 0 is used.
    pub async fn run<B: BlockTransactionBuilder>(
        self,
        state: PreconfState<B>,
    ) -> eyre::Result<SocketAddr> {
        let app = router(Arc::new(state));

        info!("Starting preconf api server...");
        let listener = TcpListener::bind(&self.addr).await?;
        let local_addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                error!(?err, "preconf api server error");
            }
        });

        info!("Started preconf api server on http://{local_addr}");
        Ok(local_addr)
    }
}

async fn build_block<B: BlockTransactionBuilder>(
    State(state): State<Arc<PreconfState<B>>>,
    payload: Result<Json<BuildBlockRequest>, JsonRejection>,
) -> PreconfApiResult<Json<BuildBlockResponse>> {
    let Json(request) =
        payload.inspect_err(|err| warn!(%err, "Rejected malformed block build request"))?;
    Ok(Json(state.build_block(request).await?))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "OK"}))
}

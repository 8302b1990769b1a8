use std::{
    io::Read,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use alloy_primitives::{address, Address, Bytes, B256};
use alloy_rlp::Decodable;
use alloy_sol_types::{SolCall, SolValue};
use flate2::read::ZlibDecoder;
use preconfapi_primitives::{
    decode_tx_list, encode_util::hex_decode, BuildBlockRequest, BuildBlockResponse,
    UnsignedLegacyTransaction,
};
use preconfapi_server::{
    tx_builder::{proposeBlockCall, BlockParams},
    BlockTransactionBuilder, CalldataTransactionBuilder, ErrorMessage, PreconfApiServer,
    PreconfState, BUILD_BLOCK,
};
use reqwest::{StatusCode, Url};
use tokio::sync::Notify;

const TAIKO_L1: Address = address!("79fcdef22feed20eddacbb2587640e45491b757f");
const EIP1559_TX: &str = "0xb87202f86f0102843b9aca0085029e7822d68298f094d9e1459a7a482635700cbc20bbaf52d495ab9c9680841b55ba3ac080a0c199674fcb29f353693dd779c017823b954b3c69dffa3cd6b2a6ff7888798039a028ca912de909e7e6cdef9cdcaf24c54dd8c1032946dfa1d85c206b32a9064fe8";

async fn spawn_server() -> eyre::Result<Url> {
    spawn_server_with(CalldataTransactionBuilder::new(TAIKO_L1, 3_000_000), Duration::from_secs(5))
        .await
}

async fn spawn_server_with<B: BlockTransactionBuilder>(
    builder: B,
    build_timeout: Duration,
) -> eyre::Result<Url> {
    let state = PreconfState::new(builder, build_timeout);
    let server = PreconfApiServer::new(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0));
    let addr = server.run(state).await?;
    Ok(Url::parse(&format!("http://{addr}"))?.join(BUILD_BLOCK)?)
}

fn request(signed_transactions: Vec<String>) -> BuildBlockRequest {
    BuildBlockRequest {
        l1_state_block_number: 20_000_000,
        timestamp: 1_717_000_000,
        signed_transactions,
        coinbase: "0x0000000000000000000000000000000000000001".to_string(),
        extra_data: "preconf".to_string(),
    }
}

#[tokio::test]
async fn test_build_block_returns_propose_block_tx() -> eyre::Result<()> {
    let endpoint = spawn_server().await?;

    let response = reqwest::Client::new()
        .post(endpoint)
        .json(&request(vec![EIP1559_TX.to_string()]))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let response: BuildBlockResponse = response.json().await?;

    let raw = hex_decode(&response.rlp_encoded_tx)?;
    let tx = UnsignedLegacyTransaction::decode(&mut raw.as_slice())?;
    assert_eq!(tx.to, TAIKO_L1);
    assert_eq!(tx.gas_limit, 3_000_000);

    let call = proposeBlockCall::abi_decode(&tx.input, true)?;
    let params = <BlockParams as SolValue>::abi_decode(&call._params, true)?;
    assert_eq!(params.anchorBlockId, 20_000_000);
    assert_eq!(params.timestamp, 1_717_000_000);
    assert_eq!(params.coinbase, address!("0000000000000000000000000000000000000001"));
    assert_eq!(&params.extraData[..7], b"preconf");

    let mut tx_list = Vec::new();
    ZlibDecoder::new(&call._txList[..]).read_to_end(&mut tx_list)?;
    let txs = decode_tx_list(&tx_list)?;
    assert_eq!(txs.len(), 1);
    assert!(txs[0].is_eip1559());
    Ok(())
}

#[tokio::test]
async fn test_build_block_rejects_invalid_transaction() -> eyre::Result<()> {
    let endpoint = spawn_server().await?;

    let response = reqwest::Client::new()
        .post(endpoint)
        .json(&request(vec![EIP1559_TX.to_string(), "0x1234".to_string()]))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorMessage = response.json().await?;
    assert_eq!(error.code, 422);
    assert!(error.message.contains("index 1"));
    Ok(())
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Never finishes a build on its own; flags when its build future is dropped.
#[derive(Clone, Default)]
struct StallingBuilder {
    started: Arc<Notify>,
    dropped: Arc<AtomicBool>,
}

impl BlockTransactionBuilder for StallingBuilder {
    type Transaction = UnsignedLegacyTransaction;

    async fn build_unsigned(
        &self,
        _tx_list: Bytes,
        _l1_state_block_number: u32,
        _timestamp: u64,
        _coinbase: Address,
        _extra_data: B256,
    ) -> eyre::Result<UnsignedLegacyTransaction> {
        let _guard = SetOnDrop(self.dropped.clone());
        self.started.notify_one();
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(UnsignedLegacyTransaction::default())
    }
}

#[tokio::test]
async fn test_client_disconnect_cancels_build() -> eyre::Result<()> {
    let builder = StallingBuilder::default();
    let endpoint = spawn_server_with(builder.clone(), Duration::from_secs(60)).await?;

    let client = tokio::spawn(async move {
        reqwest::Client::new().post(endpoint).json(&request(vec![])).send().await
    });
    tokio::time::timeout(Duration::from_secs(5), builder.started.notified()).await?;
    assert!(!builder.dropped.load(Ordering::SeqCst));

    client.abort();
    tokio::time::timeout(Duration::from_secs(5), async {
        while !builder.dropped.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;
    Ok(())
}

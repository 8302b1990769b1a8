use std::{future::Future, io::Write};

use alloy_primitives::{Address, Bytes, B256};
use alloy_rlp::Encodable;
use alloy_sol_types::{sol, SolCall, SolValue};
use flate2::{write::ZlibEncoder, Compression};
use preconfapi_primitives::UnsignedLegacyTransaction;
use tracing::debug;

sol! {
    #[derive(Debug, PartialEq)]
    struct BlockParams {
        address assignedProver;
        address coinbase;
        bytes32 extraData;
        bytes32 parentMetaHash;
        uint64 anchorBlockId;
        uint64 timestamp;
        uint32 blobTxListOffset;
        uint32 blobTxListLength;
        uint8 blobIndex;
    }

    function proposeBlock(bytes _params, bytes _txList);
}

/// Turns an rlp encoded transaction list into an unsigned transaction that
/// proposes it as a block.
pub trait BlockTransactionBuilder: Send + Sync + 'static {
    type Transaction: Encodable + Send;

    fn build_unsigned(
        &self,
        tx_list: Bytes,
        l1_state_block_number: u32,
        timestamp: u64,
        coinbase: Address,
        extra_data: B256,
    ) -> impl Future<Output = eyre::Result<Self::Transaction>> + Send;
}

/// Builds `proposeBlock` calls that carry the compressed transaction list in
/// calldata.
#[derive(Debug, Clone)]
pub struct CalldataTransactionBuilder {
    taiko_l1_address: Address,
    gas_limit: u64,
}

impl CalldataTransactionBuilder {
    pub const fn new(taiko_l1_address: Address, gas_limit: u64) -> Self {
        Self { taiko_l1_address, gas_limit }
    }

    fn build(
        &self,
        tx_list: &[u8],
        l1_state_block_number: u32,
        timestamp: u64,
        coinbase: Address,
        extra_data: B256,
    ) -> eyre::Result<UnsignedLegacyTransaction> {
        let compressed = compress(tx_list)?;
        debug!(raw = tx_list.len(), compressed = compressed.len(), "compressed tx list");

        let params = BlockParams {
            assignedProver: Address::ZERO,
            coinbase,
            extraData: extra_data,
            parentMetaHash: B256::ZERO,
            anchorBlockId: u64::from(l1_state_block_number),
            timestamp,
            blobTxListOffset: 0,
            blobTxListLength: 0,
            blobIndex: 0,
        };
        let call = proposeBlockCall {
            _params: SolValue::abi_encode(&params).into(),
            _txList: compressed.into(),
        };

        Ok(UnsignedLegacyTransaction::call(
            self.taiko_l1_address,
            self.gas_limit,
            SolCall::abi_encode(&call).into(),
        ))
    }
}

impl BlockTransactionBuilder for CalldataTransactionBuilder {
    type Transaction = UnsignedLegacyTransaction;

    async fn build_unsigned(
        &self,
        tx_list: Bytes,
        l1_state_block_number: u32,
        timestamp: u64,
        coinbase: Address,
        extra_data: B256,
    ) -> eyre::Result<UnsignedLegacyTransaction> {
        self.build(&tx_list, l1_state_block_number, timestamp, coinbase, extra_data)
    }
}

fn compress(data: &[u8]) -> eyre::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

use std::str::FromStr;

use alloy_primitives::{hex::FromHexError, Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    encode_util::string_to_bytes32,
    tx_list::{decode_signed_transactions, encode_tx_list, TxListError},
};

/// Body of a block build request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildBlockRequest {
    /// L1 block the proposal anchors to
    pub l1_state_block_number: u32,
    pub timestamp: u64,
    /// Hex encoded signed transactions, `0x` prefix optional
    pub signed_transactions: Vec<String>,
    /// Hex encoded fee recipient, `0x` prefix optional
    pub coinbase: String,
    pub extra_data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildBlockResponse {
    /// Rlp encoded unsigned transaction, hex without prefix
    pub rlp_encoded_tx: String,
}

/// Normalized inputs handed to the transaction builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildBlockParams {
    /// Rlp encoded transaction list
    pub tx_list: Bytes,
    pub tx_count: usize,
    pub l1_state_block_number: u32,
    pub timestamp: u64,
    pub coinbase: Address,
    pub extra_data: B256,
}

#[derive(Debug, Error)]
pub enum BuildBlockRequestError {
    #[error(transparent)]
    TxList(#[from] TxListError),

    #[error("invalid coinbase address {coinbase:?}: {source}")]
    InvalidCoinbase { coinbase: String, source: FromHexError },
}

impl BuildBlockRequest {
    /// Decodes and re-encodes the transactions, then normalizes coinbase and
    /// extra data. Transactions are checked before the coinbase.
    pub fn into_params(self) -> Result<BuildBlockParams, BuildBlockRequestError> {
        let txs = decode_signed_transactions(&self.signed_transactions)?;
        let tx_list = encode_tx_list(&txs);
        let coinbase = Address::from_str(&self.coinbase).map_err(|source| {
            BuildBlockRequestError::InvalidCoinbase { coinbase: self.coinbase.clone(), source }
        })?;
        Ok(BuildBlockParams {
            tx_list,
            tx_count: txs.len(),
            l1_state_block_number: self.l1_state_block_number,
            timestamp: self.timestamp,
            coinbase,
            extra_data: string_to_bytes32(&self.extra_data),
        })
    }
}

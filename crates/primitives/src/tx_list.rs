use alloy_consensus::TxEnvelope;
use alloy_eips::eip2718::{Decodable2718, Eip2718Error, Eip2718Result};
use alloy_primitives::Bytes;
use alloy_rlp::{Decodable, Encodable, EMPTY_STRING_CODE};
use thiserror::Error;

use crate::encode_util::{hex_decode, hex_encode};

#[derive(Debug, Error)]
pub enum TxListError {
    #[error("invalid hex encoding for transaction at index {index}: {source}")]
    InvalidHexEncoding { index: usize, source: hex::FromHexError },

    #[error("malformed transaction at index {index}: {reason}")]
    MalformedTransaction { index: usize, reason: Eip2718Error },

    #[error("malformed transaction list: {0}")]
    MalformedList(#[from] alloy_rlp::Error),
}

pub type TxListResult<T> = Result<T, TxListError>;

/// Decodes hex encoded signed transactions, keeping their order.
///
/// Stops at the first item that fails and reports its index; no partial list
/// is ever returned.
pub fn decode_signed_transactions<S: AsRef<str>>(items: &[S]) -> TxListResult<Vec<TxEnvelope>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let raw = hex_decode(item.as_ref())
                .map_err(|source| TxListError::InvalidHexEncoding { index, source })?;
            decode_transaction(&raw)
                .map_err(|reason| TxListError::MalformedTransaction { index, reason })
        })
        .collect()
}

/// Decodes exactly one rlp encoded transaction from `raw`.
///
/// Legacy transactions are rlp lists, typed transactions are their eip-2718
/// envelope wrapped in an rlp string. A bare envelope (`type || payload`) is
/// not an rlp item and is rejected, as are trailing bytes.
pub fn decode_transaction(raw: &[u8]) -> Eip2718Result<TxEnvelope> {
    match raw.first() {
        None => return Err(alloy_rlp::Error::InputTooShort.into()),
        Some(&ty) if ty < EMPTY_STRING_CODE => {
            return Err(alloy_rlp::Error::Custom("typed transaction is not rlp encoded").into())
        }
        Some(_) => {}
    }
    let mut buf = raw;
    let tx = TxEnvelope::network_decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(alloy_rlp::Error::UnexpectedLength.into());
    }
    Ok(tx)
}

/// Rlp list of the transactions in their network form.
pub fn encode_tx_list(txs: &[TxEnvelope]) -> Bytes {
    let mut out = Vec::new();
    alloy_rlp::encode_list(txs, &mut out);
    out.into()
}

pub fn decode_tx_list(raw: &[u8]) -> TxListResult<Vec<TxEnvelope>> {
    let mut buf = raw;
    let txs = Vec::<TxEnvelope>::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(alloy_rlp::Error::UnexpectedLength.into());
    }
    Ok(txs)
}

/// Rlp encodes `value` and renders it as lowercase hex without a prefix.
pub fn encode_rlp_hex<T: Encodable + ?Sized>(value: &T) -> String {
    hex_encode(alloy_rlp::encode(value))
}

mod build_block;
pub mod encode_util;
pub mod tx_list;
mod unsigned_tx;

pub use build_block::{
    BuildBlockParams, BuildBlockRequest, BuildBlockRequestError, BuildBlockResponse,
};
pub use tx_list::{
    decode_signed_transactions, decode_transaction, decode_tx_list, encode_rlp_hex,
    encode_tx_list, TxListError,
};
pub use unsigned_tx::UnsignedLegacyTransaction;

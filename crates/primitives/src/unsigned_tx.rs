use alloy_primitives::{Address, Bytes, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

/// Unsigned legacy transaction, rlp encoded with all nine legacy fields.
///
/// The signature values are left at zero so the encoding can be read by any
/// legacy transaction decoder; the caller fills in nonce and gas price before
/// signing.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, RlpEncodable, RlpDecodable,
)]
pub struct UnsignedLegacyTransaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    pub input: Bytes,
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

impl UnsignedLegacyTransaction {
    pub fn call(to: Address, gas_limit: u64, input: Bytes) -> Self {
        Self { to, gas_limit, input, ..Default::default() }
    }
}

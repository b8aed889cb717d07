//! Transaction intents executed by a smart account

use crate::utils::{as_checksum_addr, deserialize_u256_lenient};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// A call the smart account should perform
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Target of the call
    #[serde(serialize_with = "as_checksum_addr")]
    pub to: Address,
    /// Native value sent along (in wei)
    #[serde(default)]
    pub value: U256,
    /// Call data (empty for a plain transfer)
    #[serde(default)]
    pub data: Bytes,
}

impl Transaction {
    pub fn new(to: Address) -> Self {
        Self { to, ..Default::default() }
    }

    /// Sets the value of the transaction
    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Sets the call data of the transaction
    pub fn data(mut self, data: Bytes) -> Self {
        self.data = data;
        self
    }
}

/// EIP-1559 fee values for a user operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasFeeValues {
    #[serde(deserialize_with = "deserialize_u256_lenient")]
    pub max_fee_per_gas: U256,
    #[serde(deserialize_with = "deserialize_u256_lenient")]
    pub max_priority_fee_per_gas: U256,
}

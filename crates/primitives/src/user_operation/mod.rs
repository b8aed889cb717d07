//! Basic transaction type for account abstraction (ERC-4337)

mod field;
mod hash;
mod partial;

use crate::{
    get_address,
    utils::{as_checksum_addr, deserialize_u256_lenient},
};
use derive_more::{AsRef, Deref};
use ethers::{
    abi::AbiEncode,
    contract::{EthAbiCodec, EthAbiType},
    types::{Address, Bytes, Log, TransactionReceipt, H256, U256, U64},
    utils::keccak256,
};
pub use field::UserOperationField;
pub use hash::UserOperationHash;
pub use partial::UserOperationPartial;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// Errors raised while assembling a user operation from its optional parts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserOperationError {
    /// A field required by the caller has not been set
    #[error("user operation field {0} is missing")]
    MissingField(UserOperationField),
}

/// User operation with hash
#[derive(AsRef, Deref, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOperation {
    /// Hash of the user operation
    pub hash: UserOperationHash,

    /// Raw user operation
    #[deref]
    #[as_ref]
    pub user_operation: UserOperationSigned,
}

impl UserOperation {
    pub fn from_user_operation_signed(
        hash: UserOperationHash,
        user_operation: UserOperationSigned,
    ) -> Self {
        Self { hash, user_operation }
    }
}

impl From<UserOperation> for UserOperationSigned {
    fn from(value: UserOperation) -> Self {
        value.user_operation
    }
}

/// User operation (entry point v0.6 layout)
#[derive(
    Default,
    Clone,
    Debug,
    Ord,
    PartialOrd,
    PartialEq,
    Eq,
    EthAbiCodec,
    EthAbiType,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationSigned {
    /// Sender of the user operation (the smart account)
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,

    /// Nonce (anti replay protection)
    pub nonce: U256,

    /// Init code for the account (needed if account not yet deployed and needs to be created)
    pub init_code: Bytes,

    /// The data that is passed to the sender during the main execution call
    pub call_data: Bytes,

    /// The amount of gas to allocate for the main execution call
    pub call_gas_limit: U256,

    /// The amount of gas to allocate for the verification step
    pub verification_gas_limit: U256,

    /// The amount of gas to pay bundler to compensate for the pre-verification execution and
    /// calldata
    pub pre_verification_gas: U256,

    /// Maximum fee per gas (similar to EIP-1559)
    pub max_fee_per_gas: U256,

    /// Maximum priority fee per gas (similar to EIP-1559)
    pub max_priority_fee_per_gas: U256,

    /// Address of paymaster sponsoring the user operation, followed by extra data to send to the
    /// paymaster (can be empty)
    pub paymaster_and_data: Bytes,

    /// Data passed to the account along with the nonce during the verification step
    pub signature: Bytes,
}

/// User operation without signature (helper for packing user operation)
#[derive(EthAbiCodec, EthAbiType)]
struct UserOperationNoSignature {
    pub sender: Address,
    pub nonce: U256,
    pub init_code: H256,
    pub call_data: H256,
    pub call_gas_limit: U256,
    pub verification_gas_limit: U256,
    pub pre_verification_gas: U256,
    pub max_fee_per_gas: U256,
    pub max_priority_fee_per_gas: U256,
    pub paymaster_and_data: H256,
}

impl From<&UserOperationSigned> for UserOperationNoSignature {
    fn from(value: &UserOperationSigned) -> Self {
        Self {
            sender: value.sender,
            nonce: value.nonce,
            init_code: keccak256(value.init_code.deref()).into(),
            call_data: keccak256(value.call_data.deref()).into(),
            call_gas_limit: value.call_gas_limit,
            verification_gas_limit: value.verification_gas_limit,
            pre_verification_gas: value.pre_verification_gas,
            max_fee_per_gas: value.max_fee_per_gas,
            max_priority_fee_per_gas: value.max_priority_fee_per_gas,
            paymaster_and_data: keccak256(value.paymaster_and_data.deref()).into(),
        }
    }
}

impl UserOperationSigned {
    /// Packs the user operation into bytes
    pub fn pack(&self) -> Bytes {
        self.clone().encode().into()
    }

    /// Packs the user operation without signature to bytes (used for calculating the hash)
    pub fn pack_without_signature(&self) -> Bytes {
        UserOperationNoSignature::from(self).encode().into()
    }

    /// Calculates the hash of the user operation the way entry point v0.6 does
    pub fn hash(&self, entry_point: &Address, chain_id: u64) -> UserOperationHash {
        H256::from_slice(
            keccak256(
                [
                    keccak256(self.pack_without_signature().deref()).to_vec(),
                    entry_point.encode(),
                    U256::from(chain_id).encode(),
                ]
                .concat(),
            )
            .as_slice(),
        )
        .into()
    }

    /// Attaches the hash to the user operation
    pub fn with_hash(self, entry_point: &Address, chain_id: u64) -> UserOperation {
        let hash = self.hash(entry_point, chain_id);
        UserOperation::from_user_operation_signed(hash, self)
    }

    // Builder pattern helpers

    /// Sets the sender of the user operation
    pub fn sender(mut self, sender: Address) -> Self {
        self.sender = sender;
        self
    }

    /// Sets the nonce of the user operation
    pub fn nonce(mut self, nonce: U256) -> Self {
        self.nonce = nonce;
        self
    }

    /// Sets the init code of the user operation
    pub fn init_code(mut self, init_code: Bytes) -> Self {
        self.init_code = init_code;
        self
    }

    /// Sets the call data of the user operation
    pub fn call_data(mut self, call_data: Bytes) -> Self {
        self.call_data = call_data;
        self
    }

    /// Sets the call gas limit of the user operation
    pub fn call_gas_limit(mut self, call_gas_limit: U256) -> Self {
        self.call_gas_limit = call_gas_limit;
        self
    }

    /// Sets the verification gas limit of the user operation
    pub fn verification_gas_limit(mut self, verification_gas_limit: U256) -> Self {
        self.verification_gas_limit = verification_gas_limit;
        self
    }

    /// Sets the pre-verification gas of the user operation
    pub fn pre_verification_gas(mut self, pre_verification_gas: U256) -> Self {
        self.pre_verification_gas = pre_verification_gas;
        self
    }

    /// Sets the max fee per gas of the user operation
    pub fn max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.max_fee_per_gas = max_fee_per_gas;
        self
    }

    /// Sets the max priority fee per gas of the user operation
    pub fn max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: U256) -> Self {
        self.max_priority_fee_per_gas = max_priority_fee_per_gas;
        self
    }

    /// Sets the paymaster and data of the user operation
    pub fn paymaster_and_data(mut self, paymaster_and_data: Bytes) -> Self {
        self.paymaster_and_data = paymaster_and_data;
        self
    }

    /// Sets the signature of the user operation
    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = signature;
        self
    }

    /// Gets the entities (optionally if present) involved in the user operation
    pub fn get_entities(&self) -> (Address, Option<Address>, Option<Address>) {
        let sender = self.sender;
        let factory = get_address(&self.init_code);
        let paymaster = get_address(&self.paymaster_and_data);
        (sender, factory, paymaster)
    }
}

/// Receipt of the user operation (returned from the RPC endpoint eth_getUserOperationReceipt)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationReceipt {
    #[serde(rename = "userOpHash")]
    pub user_operation_hash: UserOperationHash,
    #[serde(serialize_with = "as_checksum_addr")]
    pub sender: Address,
    pub nonce: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster: Option<Address>,
    pub actual_gas_cost: U256,
    pub actual_gas_used: U256,
    pub success: bool,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(rename = "receipt")]
    pub tx_receipt: TransactionReceipt,
}

/// Struct that is returned from the RPC endpoint eth_getUserOperationByHash
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationByHash {
    pub user_operation: UserOperationSigned,
    #[serde(serialize_with = "as_checksum_addr")]
    pub entry_point: Address,
    pub transaction_hash: H256,
    pub block_hash: H256,
    pub block_number: U64,
}

/// Gas estimations for user operation (returned from the RPC endpoint eth_estimateUserOperationGas)
///
/// Bundlers disagree on the encoding of these numbers, so hex strings, decimal strings and plain
/// JSON numbers are all accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationGasEstimation {
    #[serde(deserialize_with = "deserialize_u256_lenient")]
    pub pre_verification_gas: U256,
    #[serde(deserialize_with = "deserialize_u256_lenient")]
    pub verification_gas_limit: U256,
    #[serde(deserialize_with = "deserialize_u256_lenient")]
    pub call_gas_limit: U256,
}

use std::time::Duration;
use thiserror::Error;
use vireo_contracts::{EntryPointError, FactoryError};
use vireo_primitives::{UserOperationError, UserOperationHash};
use vireo_rpc::RpcError;

/// Smart account errors
#[derive(Debug, Error)]
pub enum SmartAccountError {
    /// Incomplete user operation
    #[error(transparent)]
    UserOperation(#[from] UserOperationError),

    /// Provider (JSON-RPC node) error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// Entry point call error
    #[error(transparent)]
    EntryPoint(#[from] EntryPointError),

    /// Smart account factory call error
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// Bundler or paymaster error
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Signing with the validation module failed
    #[error("signer error: {inner}")]
    Signer {
        /// The inner error message
        inner: String,
    },

    /// The account, bundler and paymaster disagree on the chain or the entry point
    #[error("invalid configuration: {inner}")]
    Config {
        /// The inner error message
        inner: String,
    },

    /// `build_user_op` was called without transactions
    #[error("no transactions to execute")]
    NoTransactions,

    /// Sponsorship requested from an account created without a paymaster
    #[error("paymaster service data given but the account has no paymaster")]
    NoPaymaster,

    /// The bundler had no receipt for the user operation before the deadline
    #[error("no receipt for user operation {hash} after {timeout:?}")]
    ReceiptTimeout {
        /// The user operation hash
        hash: UserOperationHash,
        /// How long the receipt was polled for
        timeout: Duration,
    },
}

impl SmartAccountError {
    pub fn provider<E: ToString>(err: E) -> Self {
        Self::Provider { inner: err.to_string() }
    }

    pub fn signer<E: ToString>(err: E) -> Self {
        Self::Signer { inner: err.to_string() }
    }
}

use ethers::types::Address;
use jsonrpsee::core::ClientError;
use thiserror::Error;

/// Errors of the bundler and paymaster clients
#[derive(Debug, Error)]
pub enum RpcError {
    /// The endpoint URL could not be turned into a client
    #[error("invalid endpoint {url}: {inner}")]
    InvalidEndpoint {
        /// The endpoint URL
        url: String,
        /// The inner error message
        inner: String,
    },

    /// The call failed (transport error or JSON-RPC error object)
    #[error("{method} failed: {source}")]
    Call {
        /// The JSON-RPC method
        method: &'static str,
        /// The client error
        #[source]
        source: ClientError,
    },

    /// The bundler does not accept user operations for the entry point
    #[error("entry point {0:?} is not supported by the bundler")]
    UnsupportedEntryPoint(Address),
}

impl RpcError {
    pub fn call(method: &'static str) -> impl FnOnce(ClientError) -> Self {
        move |source| Self::Call { method, source }
    }

    /// JSON-RPC error code returned by the remote side, if the call reached it
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Call { source: ClientError::Call(err), .. } => Some(err.code()),
            _ => None,
        }
    }
}

use crate::gen::FailedOp;
use ethers::{
    abi::AbiDecode,
    contract::{ContractError, EthError},
    providers::Middleware,
    types::Bytes,
};
use thiserror::Error;

/// Entry point errors
#[derive(Debug, Error, Clone)]
pub enum EntryPointError {
    /// Failed user operation error
    #[error("{0}")]
    FailedOp(FailedOp),

    /// execution reverted
    #[error("execution reverted: {0}")]
    ExecutionReverted(String),

    /// Provider error
    #[error("provider error: {inner}")]
    Provider {
        /// The inner error message
        inner: String,
    },

    /// ABI error
    #[error("abi error: {inner}")]
    ABI {
        /// The inner error message
        inner: String,
    },

    /// Data decoding error
    #[error("decode error: {inner}")]
    Decode {
        /// The inner error message
        inner: String,
    },

    /// Any other error
    #[error("other error: {inner}")]
    Other {
        /// The inner error message
        inner: String,
    },
}

impl EntryPointError {
    pub fn from_contract_error<M: Middleware>(err: ContractError<M>) -> Self {
        match err {
            ContractError::Revert(data) => decode_revert_error(data),
            ContractError::DecodingError(e) => Self::Decode { inner: e.to_string() },
            ContractError::AbiError(e) => Self::ABI { inner: e.to_string() },
            ContractError::MiddlewareError { e } => Self::Provider { inner: e.to_string() },
            ContractError::ProviderError { e } => Self::Provider { inner: e.to_string() },
            _ => Self::Other { inner: err.to_string() },
        }
    }
}

/// Smart account factory errors
#[derive(Debug, Error, Clone)]
pub enum FactoryError {
    /// A factory view call failed
    #[error("factory call {function} failed: {inner}")]
    Call {
        /// The called function
        function: String,
        /// The inner error message
        inner: String,
    },
}

// ethers-rs could not handle `require (true, "reason")` or `revert("test failed")` well in this
// case revert with `require` error would ends up with error event signature `0x08c379a0`
// we need to handle it manually
pub fn decode_revert_string(data: Bytes) -> Option<String> {
    if data.len() < 4 {
        return None;
    }
    let (error_sig, reason) = data.split_at(4);
    if error_sig == [0x08, 0xc3, 0x79, 0xa0] {
        <String as AbiDecode>::decode(reason).ok()
    } else {
        None
    }
}

fn decode_revert_error(data: Bytes) -> EntryPointError {
    if let Some(op) = FailedOp::decode_with_selector(data.as_ref()) {
        return EntryPointError::FailedOp(op);
    }
    match decode_revert_string(data.clone()) {
        Some(reason) => EntryPointError::ExecutionReverted(reason),
        None => EntryPointError::Decode {
            inner: format!("revert data {data} is neither FailedOp nor a revert string"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::{encode, Token};
    use std::str::FromStr;

    #[test]
    fn decode_require_reason() -> eyre::Result<()> {
        let data = Bytes::from_str("0x08c379a00000000000000000000000000000000000000000000000000000000000000020000000000000000000000000000000000000000000000000000000000000001841413934206761732076616c756573206f766572666c6f770000000000000000")?;
        assert_eq!(decode_revert_string(data.clone()), Some("AA94 gas values overflow".into()));
        assert!(matches!(
            decode_revert_error(data),
            EntryPointError::ExecutionReverted(reason) if reason == "AA94 gas values overflow"
        ));
        Ok(())
    }

    #[test]
    fn decode_failed_op() {
        let mut data = FailedOp::selector().to_vec();
        data.extend(encode(&[
            Token::Uint(0.into()),
            Token::String("AA21 didn't pay prefund".into()),
        ]));

        match decode_revert_error(data.into()) {
            EntryPointError::FailedOp(op) => {
                assert_eq!(op.op_index, 0.into());
                assert_eq!(op.reason, "AA21 didn't pay prefund");
            }
            err => panic!("unexpected error {err:?}"),
        }
    }

    #[test]
    fn short_revert_data() {
        assert_eq!(decode_revert_string(Bytes::from_static(&[0x08, 0xc3])), None);
        assert!(matches!(
            decode_revert_error(Bytes::from_static(&[0x08, 0xc3])),
            EntryPointError::Decode { .. }
        ));
    }
}

//! Account abstraction (ERC-4337) primitive types
//!
//! This crate contains the primitive types shared by the smart account client: user operations,
//! transaction intents, paymaster sponsorship types, the signing wallet and helper functions.

pub mod chain;
pub mod constants;
pub mod paymaster;
pub mod provider;
mod transaction;
mod user_operation;
mod utils;
mod wallet;

pub use paymaster::{PaymasterAndDataResponse, PaymasterMode, PaymasterServiceData};
pub use transaction::{GasFeeValues, Transaction};
pub use user_operation::{
    UserOperation, UserOperationByHash, UserOperationError, UserOperationField,
    UserOperationGasEstimation, UserOperationHash, UserOperationPartial, UserOperationReceipt,
    UserOperationSigned,
};
pub use utils::{get_address, parse_u256_str};
pub use wallet::Wallet;

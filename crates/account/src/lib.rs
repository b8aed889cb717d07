//! Account abstraction (ERC-4337) smart account client
//!
//! Builds user operations for a smart account, gets them estimated by a bundler and sponsored by
//! a paymaster, signs them through a validation module and follows them until inclusion.

mod account;
mod config;
mod error;
mod module;
mod response;

pub use account::SmartAccount;
pub use config::{BuildUserOpOptions, SmartAccountConfig};
pub use error::SmartAccountError;
pub use module::{EcdsaOwnershipModule, ValidationModule};
pub use response::UserOpResponse;
pub use vireo_contracts::calls::encode_module_signature;

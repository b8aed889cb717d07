//! JSON-RPC clients of the services a smart account talks to: the bundler (`eth_*` user
//! operation methods) and the paymaster (`pm_sponsorUserOperation`).

mod bundler;
mod bundler_api;
mod error;
#[cfg(feature = "test-utils")]
pub mod mock;
mod paymaster;
mod paymaster_api;

pub use bundler::Bundler;
pub use bundler_api::{BundlerApiClient, BundlerApiServer};
pub use error::RpcError;
pub use paymaster::Paymaster;
pub use paymaster_api::{PaymasterApiClient, PaymasterApiServer};

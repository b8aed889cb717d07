//! Account abstraction (ERC-4337) contract interfaces
//!
//! On-chain reads go through ethers `abigen!` bindings (entry point, smart account factory), call
//! data that is only ever sent inside a user operation is encoded with `alloy-sol-types`.

pub mod calls;
pub mod entry_point;
mod error;
pub mod factory;
mod gen;
mod utils;

pub use entry_point::EntryPoint;
pub use error::{decode_revert_string, EntryPointError, FactoryError};
pub use factory::{pack_init_code, SmartAccountFactory};
pub use gen::FailedOp;

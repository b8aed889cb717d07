//! Smart account demonstration flows: transfer, token creation, module enablement and a user
//! operation signed for another validation module.

pub mod cli;
pub mod utils;

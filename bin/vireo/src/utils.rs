use ethers::{
    types::{Address, U256},
    utils::parse_ether,
};
use std::str::FromStr;
use vireo_primitives::PaymasterMode;

/// Parses address from string
pub fn parse_address(s: &str) -> Result<Address, String> {
    Address::from_str(s).map_err(|_| format!("String {s} is not a valid address"))
}

/// Parses U256 from string
pub fn parse_u256(s: &str) -> Result<U256, String> {
    U256::from_str_radix(s, 10).map_err(|_| format!("String {s} is not a valid U256"))
}

/// Parses an amount of ether (e.g. `0.01`) into wei
pub fn parse_ether_value(s: &str) -> Result<U256, String> {
    parse_ether(s).map_err(|_| format!("String {s} is not a valid ether amount"))
}

/// Parses PaymasterMode from string
pub fn parse_paymaster_mode(s: &str) -> Result<PaymasterMode, String> {
    PaymasterMode::from_str(s).map_err(|_| format!("String {s} is not a valid PaymasterMode"))
}

pub fn validate_private_key(hex_string: &str) -> Result<String, String> {
    let key = hex_string.trim().trim_start_matches("0x");

    if key.chars().count() != 64 {
        return Err("private key must be 32 hex encoded bytes".into());
    }

    if !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("private key is not a valid hexadecimal string".into());
    }

    Ok(String::from(key))
}

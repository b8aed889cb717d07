//! Misc utils

use ethers::{
    types::{Address, U256},
    utils::to_checksum,
};
use serde::{Deserialize, Deserializer};

/// Converts address to checksum address
pub fn as_checksum_addr<S>(val: &Address, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&to_checksum(val, None))
}

/// Converts Option address to checksum
pub fn as_checksum_addr_opt<S>(val: &Option<Address>, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if let Some(addr) = val {
        s.serialize_str(&to_checksum(addr, None))
    } else {
        s.serialize_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    fn into_u256(self) -> Result<U256, String> {
        match self {
            NumberOrString::Number(n) => n.as_u64().map(U256::from).ok_or_else(|| {
                format!("JSON number {n} is not an unsigned 64-bit integer, send it as a string")
            }),
            NumberOrString::String(s) => parse_u256_str(&s),
        }
    }
}

/// Parses U256 from a `0x`-prefixed hex string or a decimal string
pub fn parse_u256_str(s: &str) -> Result<U256, String> {
    let s = s.trim();
    let res = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => U256::from_str_radix(hex, 16).ok(),
        None => U256::from_dec_str(s).ok(),
    };
    res.ok_or_else(|| format!("String {s} is not a valid U256"))
}

/// Deserializes U256 from a JSON number, a hex string or a decimal string
pub fn deserialize_u256_lenient<'de, D>(d: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(d)?.into_u256().map_err(serde::de::Error::custom)
}

/// Same as [deserialize_u256_lenient](deserialize_u256_lenient) for optional values
pub fn deserialize_u256_lenient_opt<'de, D>(d: D) -> Result<Option<U256>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(d)?
        .map(NumberOrString::into_u256)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// If possible, parses address from the first 20 bytes
pub fn get_address(buf: &[u8]) -> Option<Address> {
    if buf.len() >= 20 {
        Some(Address::from_slice(&buf[0..20]))
    } else {
        None
    }
}

//! Paymaster sponsorship types (`pm_sponsorUserOperation`)

use crate::{
    constants::smart_account,
    utils::{as_checksum_addr, deserialize_u256_lenient_opt},
};
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How the paymaster covers the gas of a user operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymasterMode {
    /// Gas is paid by the dapp's paymaster deposit
    Sponsored,
    /// Gas is paid by the account in an ERC-20 token
    Erc20,
}

/// Smart account implementation details the paymaster checks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartAccountInfo {
    pub name: String,
    pub version: String,
}

impl Default for SmartAccountInfo {
    fn default() -> Self {
        Self { name: smart_account::NAME.into(), version: smart_account::VERSION.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorshipInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_data: Option<serde_json::Value>,
    pub smart_account_info: SmartAccountInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    #[serde(serialize_with = "as_checksum_addr")]
    pub fee_token_address: Address,
}

/// Second parameter of `pm_sponsorUserOperation`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorUserOperationDataAndMode {
    pub mode: PaymasterMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculate_gas_limits: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsorship_info: Option<SponsorshipInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_info: Option<TokenInfo>,
}

/// Result of `pm_sponsorUserOperation`
///
/// The gas limits are only present when the paymaster was asked to calculate them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymasterAndDataResponse {
    pub paymaster_and_data: Bytes,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_u256_lenient_opt"
    )]
    pub pre_verification_gas: Option<U256>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_u256_lenient_opt"
    )]
    pub verification_gas_limit: Option<U256>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_u256_lenient_opt"
    )]
    pub call_gas_limit: Option<U256>,
}

/// What the caller wants from the paymaster when building a user operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymasterServiceData {
    pub mode: PaymasterMode,
    /// Token used to pay gas in [PaymasterMode::Erc20] mode
    pub fee_token_address: Option<Address>,
    /// Let the paymaster fill in the gas limits (no bundler estimation needed)
    pub calculate_gas_limits: bool,
    pub expiry_duration: Option<u64>,
    pub webhook_data: Option<serde_json::Value>,
}

impl PaymasterServiceData {
    pub fn sponsored() -> Self {
        Self {
            mode: PaymasterMode::Sponsored,
            fee_token_address: None,
            calculate_gas_limits: true,
            expiry_duration: None,
            webhook_data: None,
        }
    }

    pub fn erc20(fee_token_address: Address) -> Self {
        Self {
            mode: PaymasterMode::Erc20,
            fee_token_address: Some(fee_token_address),
            calculate_gas_limits: true,
            expiry_duration: None,
            webhook_data: None,
        }
    }

    /// Builds the request sent along with the user operation
    pub fn to_request(&self) -> SponsorUserOperationDataAndMode {
        SponsorUserOperationDataAndMode {
            mode: self.mode,
            calculate_gas_limits: Some(self.calculate_gas_limits),
            expiry_duration: self.expiry_duration,
            sponsorship_info: match self.mode {
                PaymasterMode::Sponsored => Some(SponsorshipInfo {
                    webhook_data: self.webhook_data.clone(),
                    smart_account_info: SmartAccountInfo::default(),
                }),
                PaymasterMode::Erc20 => None,
            },
            token_info: self
                .fee_token_address
                .map(|fee_token_address| TokenInfo { fee_token_address }),
        }
    }
}

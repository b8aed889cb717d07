use crate::utils::{parse_address, parse_paymaster_mode, parse_u256, validate_private_key};
use alloy_chains::Chain;
use clap::Parser;
use ethers::{
    providers::{Http, Provider},
    types::{Address, U256},
};
use std::{sync::Arc, time::Duration};
use tracing::warn;
use vireo_account::{EcdsaOwnershipModule, SmartAccount, SmartAccountConfig};
use vireo_primitives::{
    chain::ChainExt,
    constants::{entry_point, modules, receipt, services, smart_account},
    provider::create_http_provider,
    PaymasterMode, PaymasterServiceData, Wallet,
};
use vireo_rpc::{Bundler, Paymaster};

pub type Account = SmartAccount<Provider<Http>, EcdsaOwnershipModule>;

/// Smart account CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct AccountArgs {
    /// Private key of the account owner.
    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true, value_parser = validate_private_key)]
    pub private_key: String,

    /// Ethereum execution client RPC endpoint.
    #[clap(long, env = "ETH_CLIENT_ADDRESS", default_value = services::ETH_CLIENT_ADDRESS)]
    pub eth_client_address: String,

    /// Bundler RPC endpoint.
    #[clap(long, env = "BUNDLER_URL", default_value = services::BUNDLER_URL)]
    pub bundler_url: String,

    /// Paymaster RPC endpoint.
    #[clap(long, env = "PAYMASTER_URL", default_value = services::PAYMASTER_URL)]
    pub paymaster_url: String,

    /// Chain the account lives on.
    #[clap(long, env = "CHAIN_ID", default_value_t = 80001)]
    pub chain_id: u64,

    /// Entry point the user operations are sent to.
    #[clap(long, default_value = entry_point::ADDRESS, value_parser = parse_address)]
    pub entry_point: Address,

    /// Factory deploying the smart account.
    #[clap(long = "account.factory", default_value = smart_account::FACTORY_ADDRESS, value_parser = parse_address)]
    pub account_factory: Address,

    /// Index of the account for the owner.
    #[clap(long = "account.index", default_value = "0", value_parser = parse_u256)]
    pub account_index: U256,

    /// Known smart account address (skips the counterfactual address lookup).
    #[clap(long = "account.address", value_parser = parse_address)]
    pub account_address: Option<Address>,

    /// Validation module owning the account.
    #[clap(long, default_value = modules::ECDSA_OWNERSHIP_MODULE, value_parser = parse_address)]
    pub validation_module: Address,

    /// Interval between two receipt polls (in milliseconds).
    #[clap(long, default_value_t = receipt::POLL_INTERVAL)]
    pub poll_interval: u64,

    /// Time after which waiting for a receipt gives up (in milliseconds).
    #[clap(long, default_value_t = receipt::TIMEOUT)]
    pub receipt_timeout: u64,
}

impl AccountArgs {
    pub fn config(&self) -> SmartAccountConfig {
        let config = SmartAccountConfig::new(self.chain_id, self.entry_point, self.account_factory)
            .index(self.account_index)
            .poll_interval(Duration::from_millis(self.poll_interval))
            .receipt_timeout(Duration::from_millis(self.receipt_timeout));
        match self.account_address {
            Some(address) => config.account_address(address),
            None => config,
        }
    }

    /// Connects to the execution client, bundler and paymaster and creates the smart account
    pub async fn create_account(&self) -> eyre::Result<Account> {
        if !Chain::from_id(self.chain_id).is_supported() {
            warn!("No smart account deployments known on chain {}", self.chain_id);
        }

        let eth_client = Arc::new(create_http_provider(&self.eth_client_address).await?);
        let owner = Wallet::from_private_key(&self.private_key, self.chain_id)?;
        let module = EcdsaOwnershipModule::new(owner, self.validation_module)?;
        let bundler = Bundler::new(&self.bundler_url, self.entry_point, self.chain_id)?;
        let paymaster = Paymaster::new(&self.paymaster_url)?;

        Ok(SmartAccount::create(self.config(), eth_client, bundler, Some(paymaster), module)?)
    }
}

/// Paymaster CLI args
#[derive(Debug, Clone, Parser, PartialEq)]
pub struct PaymasterArgs {
    /// How the paymaster covers the gas.
    #[clap(long = "paymaster.mode", default_value = "sponsored", value_parser = parse_paymaster_mode)]
    pub paymaster_mode: PaymasterMode,

    /// Token the gas is paid with (ERC20 mode).
    #[clap(long = "paymaster.fee-token", value_parser = parse_address, required_if_eq("paymaster_mode", "erc20"))]
    pub fee_token_address: Option<Address>,
}

impl PaymasterArgs {
    pub fn service_data(&self) -> eyre::Result<PaymasterServiceData> {
        match (self.paymaster_mode, self.fee_token_address) {
            (PaymasterMode::Sponsored, _) => Ok(PaymasterServiceData::sponsored()),
            (PaymasterMode::Erc20, Some(token)) => Ok(PaymasterServiceData::erc20(token)),
            (PaymasterMode::Erc20, None) => Err(eyre::eyre!("ERC20 mode needs a fee token")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn account_args_defaults() {
        let args = vec!["accountargs", "--private-key", KEY];
        let args = AccountArgs::try_parse_from(args).unwrap();

        assert_eq!(args.private_key, KEY.trim_start_matches("0x"));
        assert_eq!(args.chain_id, 80001);
        assert_eq!(args.entry_point, Address::from_str(entry_point::ADDRESS).unwrap());
        assert_eq!(
            args.account_factory,
            Address::from_str(smart_account::FACTORY_ADDRESS).unwrap()
        );
        assert_eq!(
            args.validation_module,
            Address::from_str(modules::ECDSA_OWNERSHIP_MODULE).unwrap()
        );
        assert_eq!(args.account_index, U256::zero());
        assert_eq!(args.account_address, None);

        let config = args.config();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.receipt_timeout, Duration::from_secs(120));
        assert_eq!(config.account_address, None);
    }

    #[test]
    fn account_args_overrides() {
        let args = vec![
            "accountargs",
            "--private-key",
            KEY,
            "--chain-id",
            "11155111",
            "--account.index",
            "3",
            "--account.address",
            "0x9c5754De1443984659E1b3a8d1931D83475ba29C",
            "--poll-interval",
            "100",
        ];
        let args = AccountArgs::try_parse_from(args).unwrap();

        let config = args.config();
        assert_eq!(config.chain_id, 11155111);
        assert_eq!(config.index, 3.into());
        assert_eq!(
            config.account_address,
            Some(Address::from_str("0x9c5754De1443984659E1b3a8d1931D83475ba29C").unwrap())
        );
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn account_args_reject_bad_key() {
        let args = vec!["accountargs", "--private-key", "0x1234"];
        assert!(AccountArgs::try_parse_from(args).is_err());
    }

    #[test]
    fn paymaster_args() {
        let args = PaymasterArgs::try_parse_from(vec!["paymasterargs"]).unwrap();
        assert_eq!(args.service_data().unwrap(), PaymasterServiceData::sponsored());

        let token = "0xdA5289fCAAF71d52a80A254da614a192b693e977";
        let args = PaymasterArgs::try_parse_from(vec![
            "paymasterargs",
            "--paymaster.mode",
            "erc20",
            "--paymaster.fee-token",
            token,
        ])
        .unwrap();
        assert_eq!(
            args.service_data().unwrap(),
            PaymasterServiceData::erc20(Address::from_str(token).unwrap())
        );

        assert!(PaymasterArgs::try_parse_from(vec!["paymasterargs", "--paymaster.mode", "erc20"])
            .is_err());
    }
}

use super::args::{Account, AccountArgs, PaymasterArgs};
use crate::utils::{parse_address, parse_ether_value, validate_private_key};
use alloy_chains::Chain;
use clap::Parser;
use ethers::types::{Address, Bytes, U256};
use tracing::{error, info};
use vireo_account::{encode_module_signature, BuildUserOpOptions, UserOpResponse};
use vireo_contracts::calls::{encode_enable_module, encode_get_erc20_instance};
use vireo_primitives::{chain::ChainExt, Transaction, UserOperationField, Wallet};

const TRANSFER_TO: &str = "0x4276653514F9206c2cB371DF4D530f6fEe0EDE17";
const TOKEN_FACTORY: &str = "0x1b2b09AbAF2C77cD07541ae958Ea31c00665d65f";
const NEW_MODULE: &str = "0x006a6Bea048809c6417487B4636ea8C1A3ed559C";

/// Waits for the receipt and logs where the transaction can be found
async fn report(response: UserOpResponse, chain_id: u64) -> eyre::Result<()> {
    let receipt = response.wait().await?;
    let tx_hash = receipt.tx_receipt.transaction_hash;
    match Chain::from_id(chain_id).tx_explorer_url(&tx_hash) {
        Some(url) => info!("Transaction details: {url}"),
        None => info!("Transaction details: {tx_hash:?}"),
    }
    Ok(())
}

/// Builds a sponsored user operation for `tx`, signs it with the owner and sends it
async fn send_sponsored(
    account: &Account,
    tx: Transaction,
    paymaster: &PaymasterArgs,
) -> eyre::Result<UserOpResponse> {
    let options = BuildUserOpOptions {
        paymaster_service_data: Some(paymaster.service_data()?),
        ..Default::default()
    };
    let uo = account.build_user_op(&[tx], options).await?;
    info!("Partial user operation: {uo:?}");
    Ok(account.send_user_op(uo).await?)
}

/// Print the smart account address
#[derive(Debug, Parser)]
pub struct AddressCommand {
    #[clap(flatten)]
    account: AccountArgs,
}

impl AddressCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        let account = self.account.create_account().await?;
        let address = account.get_account_address().await?;
        info!("Smart account address: {address:?}");
        info!("Deployed: {}", account.is_account_deployed().await?);
        info!("Entry point deposit: {}", account.get_deposit().await?);
        Ok(())
    }
}

/// Send native currency from the smart account (no paymaster)
#[derive(Debug, Parser)]
pub struct TransferCommand {
    #[clap(flatten)]
    account: AccountArgs,

    /// Recipient of the transfer.
    #[clap(long, default_value = TRANSFER_TO, value_parser = parse_address)]
    to: Address,

    /// Amount in ether.
    #[clap(long, default_value = "0.01", value_parser = parse_ether_value)]
    value: U256,
}

impl TransferCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        info!("Creating smart account");
        let account = self.account.create_account().await?;

        let tx = Transaction::new(self.to).value(self.value);
        let uo = account.build_user_op(&[tx], BuildUserOpOptions::default()).await?;
        let response = account.send_user_op(uo.paymaster_and_data(Bytes::default())).await?;

        report(response, self.account.chain_id).await
    }
}

/// Deploy an ERC-20 token through the token factory (sponsored)
#[derive(Debug, Parser)]
pub struct CreateTokenCommand {
    #[clap(flatten)]
    account: AccountArgs,

    #[clap(flatten)]
    paymaster: PaymasterArgs,

    /// Token factory.
    #[clap(long, default_value = TOKEN_FACTORY, value_parser = parse_address)]
    factory: Address,

    /// Token name.
    #[clap(long, default_value = "Test01")]
    name: String,

    /// Token symbol.
    #[clap(long, default_value = "TST")]
    symbol: String,
}

impl CreateTokenCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        if let Err(err) = self.create_token().await {
            error!("error received {err:?}");
        }
        Ok(())
    }

    async fn create_token(&self) -> eyre::Result<()> {
        let account = self.account.create_account().await?;

        let tx = Transaction::new(self.factory)
            .data(encode_get_erc20_instance(&self.name, &self.symbol));
        info!("Transaction: {tx:?}");

        let response = send_sponsored(&account, tx, &self.paymaster).await?;
        report(response, self.account.chain_id).await
    }
}

/// Enable a validation module on the smart account (sponsored)
#[derive(Debug, Parser)]
pub struct EnableModuleCommand {
    #[clap(flatten)]
    account: AccountArgs,

    #[clap(flatten)]
    paymaster: PaymasterArgs,

    /// Module to enable.
    #[clap(long, default_value = NEW_MODULE, value_parser = parse_address)]
    module: Address,
}

impl EnableModuleCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        if let Err(err) = self.enable_module().await {
            error!("error received {err:?}");
        }
        Ok(())
    }

    async fn enable_module(&self) -> eyre::Result<()> {
        let account = self.account.create_account().await?;
        let address = account.get_account_address().await?;

        let tx = Transaction::new(address).data(encode_enable_module(self.module));
        let response = send_sponsored(&account, tx, &self.paymaster).await?;
        report(response, self.account.chain_id).await
    }
}

/// Deploy an ERC-20 token with a user operation signed for another validation module
#[derive(Debug, Parser)]
pub struct UseNewModuleCommand {
    #[clap(flatten)]
    account: AccountArgs,

    #[clap(flatten)]
    paymaster: PaymasterArgs,

    /// Private key signing for the new module.
    #[clap(long, env = "PRIVATE_KEY_A3", hide_env_values = true, value_parser = validate_private_key)]
    module_private_key: String,

    /// Module validating the signature.
    #[clap(long, default_value = NEW_MODULE, value_parser = parse_address)]
    module: Address,

    /// Token factory.
    #[clap(long, default_value = TOKEN_FACTORY, value_parser = parse_address)]
    factory: Address,

    /// Token name.
    #[clap(long, default_value = "Test02")]
    name: String,

    /// Token symbol.
    #[clap(long, default_value = "VTR")]
    symbol: String,
}

impl UseNewModuleCommand {
    /// Execute the command
    pub async fn execute(self) -> eyre::Result<()> {
        if let Err(err) = self.use_new_module().await {
            error!("error received {err:?}");
        }
        Ok(())
    }

    async fn use_new_module(&self) -> eyre::Result<()> {
        let account = self.account.create_account().await?;
        let signer = Wallet::from_private_key(&self.module_private_key, self.account.chain_id)?;

        let tx = Transaction::new(self.factory)
            .data(encode_get_erc20_instance(&self.name, &self.symbol));
        let options = BuildUserOpOptions {
            paymaster_service_data: Some(self.paymaster.service_data()?),
            ..Default::default()
        };
        let mut uo = account.build_user_op(&[tx], options).await?;
        info!("Partial user operation: {uo:?}");

        uo.signature = None;
        account.validate_user_op(&uo, &UserOperationField::REQUIRED_FOR_HASH)?;
        let uo_hash = account.get_user_op_hash(&uo)?;

        let signature = signer.sign_user_operation_hash(&uo_hash).await?;
        info!("ECDSA signature: {signature}");
        let signature = encode_module_signature(&signature.to_vec(), self.module);
        info!("ECDSA signature with module address: {signature}");

        let response = account.send_signed_user_op(uo.signature(signature)).await?;
        report(response, self.account.chain_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const SECOND_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[test]
    fn transfer_defaults() {
        let command =
            TransferCommand::try_parse_from(vec!["transfer", "--private-key", KEY]).unwrap();
        assert_eq!(command.to, Address::from_str(TRANSFER_TO).unwrap());
        assert_eq!(command.value, U256::exp10(16));
    }

    #[test]
    fn create_token_defaults() {
        let command =
            CreateTokenCommand::try_parse_from(vec!["create-token", "--private-key", KEY]).unwrap();
        assert_eq!(command.factory, Address::from_str(TOKEN_FACTORY).unwrap());
        assert_eq!((command.name.as_str(), command.symbol.as_str()), ("Test01", "TST"));
    }

    #[test]
    fn use_new_module_defaults() {
        let command = UseNewModuleCommand::try_parse_from(vec![
            "use-new-module",
            "--private-key",
            KEY,
            "--module-private-key",
            SECOND_KEY,
        ])
        .unwrap();
        assert_eq!(command.module, Address::from_str(NEW_MODULE).unwrap());
        assert_eq!((command.name.as_str(), command.symbol.as_str()), ("Test02", "VTR"));
    }

    // nothing listens on port 1
    const UNREACHABLE: &str = "http://127.0.0.1:1";

    #[tokio::test]
    async fn sponsored_flows_log_errors() {
        let endpoints = ["--eth-client-address", UNREACHABLE, "--bundler-url", UNREACHABLE];

        let mut args = vec!["create-token", "--private-key", KEY];
        args.extend(endpoints);
        assert!(CreateTokenCommand::try_parse_from(args).unwrap().execute().await.is_ok());

        let mut args = vec!["enable-module", "--private-key", KEY];
        args.extend(endpoints);
        assert!(EnableModuleCommand::try_parse_from(args).unwrap().execute().await.is_ok());

        let mut args =
            vec!["use-new-module", "--private-key", KEY, "--module-private-key", SECOND_KEY];
        args.extend(endpoints);
        assert!(UseNewModuleCommand::try_parse_from(args).unwrap().execute().await.is_ok());
    }

    #[tokio::test]
    async fn transfer_and_address_propagate_errors() {
        let endpoints = ["--eth-client-address", UNREACHABLE];

        let mut args = vec!["transfer", "--private-key", KEY];
        args.extend(endpoints);
        assert!(TransferCommand::try_parse_from(args).unwrap().execute().await.is_err());

        let mut args = vec!["address", "--private-key", KEY];
        args.extend(endpoints);
        assert!(AddressCommand::try_parse_from(args).unwrap().execute().await.is_err());
    }
}

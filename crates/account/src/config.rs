use ethers::types::{Address, U256};
use std::time::Duration;
use vireo_primitives::{
    constants::{receipt, smart_account},
    GasFeeValues, PaymasterServiceData,
};

/// Smart account settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmartAccountConfig {
    pub chain_id: u64,
    pub entry_point: Address,
    /// Factory deploying the account proxy
    pub factory: Address,
    /// Index of the account among the ones the owner can deploy through the factory
    pub index: U256,
    /// Known account address, skips the counterfactual address lookup
    pub account_address: Option<Address>,
    /// Interval between two receipt polls
    pub poll_interval: Duration,
    /// Time after which waiting for a receipt gives up
    pub receipt_timeout: Duration,
}

impl SmartAccountConfig {
    pub fn new(chain_id: u64, entry_point: Address, factory: Address) -> Self {
        Self {
            chain_id,
            entry_point,
            factory,
            index: smart_account::DEFAULT_INDEX.into(),
            account_address: None,
            poll_interval: Duration::from_millis(receipt::POLL_INTERVAL),
            receipt_timeout: Duration::from_millis(receipt::TIMEOUT),
        }
    }

    pub fn index(mut self, index: U256) -> Self {
        self.index = index;
        self
    }

    pub fn account_address(mut self, account_address: Address) -> Self {
        self.account_address = Some(account_address);
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn receipt_timeout(mut self, receipt_timeout: Duration) -> Self {
        self.receipt_timeout = receipt_timeout;
        self
    }
}

/// Options of [SmartAccount::build_user_op](crate::SmartAccount::build_user_op)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildUserOpOptions {
    /// Ask the paymaster to sponsor the user operation
    pub paymaster_service_data: Option<PaymasterServiceData>,
    /// Fees to use instead of the bundler's
    pub gas_fee_values: Option<GasFeeValues>,
    /// Leave the gas limits unset unless the paymaster provides them
    pub skip_bundler_gas_estimation: bool,
}

impl BuildUserOpOptions {
    pub fn sponsored() -> Self {
        Self { paymaster_service_data: Some(PaymasterServiceData::sponsored()), ..Default::default() }
    }
}

use crate::{
    config::{BuildUserOpOptions, SmartAccountConfig},
    error::SmartAccountError,
    module::ValidationModule,
    response::UserOpResponse,
};
use ethers::{
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};
use vireo_contracts::{calls, EntryPoint, SmartAccountFactory};
use vireo_primitives::{
    constants::smart_account, GasFeeValues, PaymasterServiceData, Transaction,
    UserOperationField, UserOperationHash, UserOperationPartial, UserOperationSigned,
};
use vireo_rpc::{Bundler, Paymaster};

/// Smart account (v2) driven through a bundler and, optionally, a paymaster
pub struct SmartAccount<M: Middleware + 'static, V: ValidationModule> {
    config: SmartAccountConfig,
    eth_client: Arc<M>,
    entry_point: EntryPoint<M>,
    factory: SmartAccountFactory<M>,
    bundler: Bundler,
    paymaster: Option<Paymaster>,
    module: V,
    account_address: RwLock<Option<Address>>,
}

impl<M: Middleware + 'static, V: ValidationModule> SmartAccount<M, V> {
    /// Creates the smart account client
    ///
    /// The bundler must be bound to the same chain and entry point as the account.
    pub fn create(
        config: SmartAccountConfig,
        eth_client: Arc<M>,
        bundler: Bundler,
        paymaster: Option<Paymaster>,
        module: V,
    ) -> Result<Self, SmartAccountError> {
        if bundler.chain_id() != config.chain_id {
            return Err(SmartAccountError::Config {
                inner: format!(
                    "bundler chain id {} differs from account chain id {}",
                    bundler.chain_id(),
                    config.chain_id
                ),
            });
        }
        if bundler.entry_point() != config.entry_point {
            return Err(SmartAccountError::Config {
                inner: format!(
                    "bundler entry point {:?} differs from account entry point {:?}",
                    bundler.entry_point(),
                    config.entry_point
                ),
            });
        }

        let entry_point = EntryPoint::new(eth_client.clone(), config.entry_point);
        let factory = SmartAccountFactory::new(eth_client.clone(), config.factory);
        let account_address = RwLock::new(config.account_address);

        Ok(Self {
            config,
            eth_client,
            entry_point,
            factory,
            bundler,
            paymaster,
            module,
            account_address,
        })
    }

    pub fn config(&self) -> &SmartAccountConfig {
        &self.config
    }

    pub fn bundler(&self) -> &Bundler {
        &self.bundler
    }

    pub fn module(&self) -> &V {
        &self.module
    }

    /// Address of the account (counterfactual until deployed), looked up once
    pub async fn get_account_address(&self) -> Result<Address, SmartAccountError> {
        if let Some(address) = *self.account_address.read() {
            return Ok(address);
        }

        let address = self
            .factory
            .counterfactual_address(self.module.address(), self.module.init_data(), self.config.index)
            .await?;
        info!("Smart account address: {address:?}");
        *self.account_address.write() = Some(address);
        Ok(address)
    }

    pub async fn is_account_deployed(&self) -> Result<bool, SmartAccountError> {
        let address = self.get_account_address().await?;
        let code =
            self.eth_client.get_code(address, None).await.map_err(SmartAccountError::provider)?;
        Ok(!code.is_empty())
    }

    /// Next nonce of the account in the default nonce sequence
    pub async fn get_nonce(&self) -> Result<U256, SmartAccountError> {
        let address = self.get_account_address().await?;
        Ok(self.entry_point.get_nonce(&address, smart_account::DEFAULT_NONCE_KEY.into()).await?)
    }

    /// Deposit of the account at the entry point (pays for unsponsored user operations)
    pub async fn get_deposit(&self) -> Result<U256, SmartAccountError> {
        let address = self.get_account_address().await?;
        Ok(self.entry_point.balance_of(&address).await?)
    }

    /// Init code deploying the account, empty once it is deployed
    pub async fn get_init_code(&self) -> Result<Bytes, SmartAccountError> {
        if self.is_account_deployed().await? {
            return Ok(Bytes::default());
        }
        Ok(self.factory.init_code(self.module.address(), self.module.init_data(), self.config.index))
    }

    pub fn encode_execute(&self, tx: &Transaction) -> Bytes {
        calls::encode_execute(tx)
    }

    pub fn encode_execute_batch(&self, txs: &[Transaction]) -> Bytes {
        calls::encode_execute_batch(txs)
    }

    /// Builds a user operation executing `txs`
    ///
    /// The result carries a dummy signature of the active module and, if requested, the
    /// paymaster's `paymasterAndData`. Gas limits come from the paymaster when it calculates them,
    /// otherwise from the bundler.
    pub async fn build_user_op(
        &self,
        txs: &[Transaction],
        options: BuildUserOpOptions,
    ) -> Result<UserOperationPartial, SmartAccountError> {
        let call_data = match txs {
            [] => return Err(SmartAccountError::NoTransactions),
            [tx] => self.encode_execute(tx),
            txs => self.encode_execute_batch(txs),
        };

        let sender = self.get_account_address().await?;
        let nonce = self.get_nonce().await?;
        let init_code = self.get_init_code().await?;
        let fees = match options.gas_fee_values {
            Some(fees) => fees,
            None => self.gas_fee_values().await?,
        };

        let mut uo = UserOperationPartial {
            sender: Some(sender),
            nonce: Some(nonce),
            init_code: Some(init_code),
            call_data: Some(call_data),
            max_fee_per_gas: Some(fees.max_fee_per_gas),
            max_priority_fee_per_gas: Some(fees.max_priority_fee_per_gas),
            paymaster_and_data: Some(Bytes::default()),
            signature: Some(self.dummy_signature()),
            ..Default::default()
        };

        let sponsorship = options.paymaster_service_data.as_ref();
        let mut sponsored = false;

        if let Some(data) = sponsorship.filter(|data| data.calculate_gas_limits) {
            self.sponsor(&mut uo, data).await?;
            sponsored = has_gas_limits(&uo) || options.skip_bundler_gas_estimation;
            if !sponsored {
                // paymasterAndData is signed over the gas limits, it is requested again below
                warn!("Paymaster returned no gas limits, estimating them with the bundler");
                uo.paymaster_and_data = Some(Bytes::default());
            }
        }
        if !has_gas_limits(&uo) && !options.skip_bundler_gas_estimation {
            let estimation = self.bundler.estimate_user_op_gas(&uo).await?;
            uo.call_gas_limit = Some(estimation.call_gas_limit);
            uo.verification_gas_limit = Some(estimation.verification_gas_limit);
            uo.pre_verification_gas = Some(estimation.pre_verification_gas);
        }
        if let Some(data) = sponsorship.filter(|_| !sponsored) {
            self.sponsor(&mut uo, data).await?;
        }

        debug!("Built user operation {uo:?}");
        Ok(uo)
    }

    /// Checks that every field in `required` is set
    pub fn validate_user_op(
        &self,
        uo: &UserOperationPartial,
        required: &[UserOperationField],
    ) -> Result<(), SmartAccountError> {
        Ok(uo.validate(required)?)
    }

    /// Hash of the user operation for the account's entry point and chain
    pub fn get_user_op_hash(
        &self,
        uo: &UserOperationPartial,
    ) -> Result<UserOperationHash, SmartAccountError> {
        Ok(uo.hash(&self.config.entry_point, self.config.chain_id)?)
    }

    /// Signs the user operation with the active validation module
    pub async fn sign_user_op(
        &self,
        uo: UserOperationPartial,
    ) -> Result<UserOperationSigned, SmartAccountError> {
        self.validate_user_op(&uo, &UserOperationField::REQUIRED_FOR_HASH)?;
        let uo_hash = self.get_user_op_hash(&uo)?;
        let signature = self.module.sign_user_op_hash(&uo_hash).await?;
        let signature = calls::encode_module_signature(&signature, self.module.address());
        Ok(UserOperationSigned::try_from(uo.signature(signature))?)
    }

    /// Signs the user operation with the active validation module and sends it to the bundler
    pub async fn send_user_op(
        &self,
        uo: UserOperationPartial,
    ) -> Result<UserOpResponse, SmartAccountError> {
        let uo = self.sign_user_op(uo).await?;
        self.send(&uo).await
    }

    /// Sends a user operation that already carries its final signature
    pub async fn send_signed_user_op(
        &self,
        uo: UserOperationPartial,
    ) -> Result<UserOpResponse, SmartAccountError> {
        self.validate_user_op(&uo, &UserOperationField::ALL)?;
        let uo = UserOperationSigned::try_from(uo)?;
        self.send(&uo).await
    }

    async fn send(&self, uo: &UserOperationSigned) -> Result<UserOpResponse, SmartAccountError> {
        let user_op_hash = self.bundler.send_user_op(uo).await?;
        info!("User operation {user_op_hash} sent from {:?}", uo.sender);
        Ok(UserOpResponse::new(
            user_op_hash,
            self.bundler.clone(),
            self.config.poll_interval,
            self.config.receipt_timeout,
        ))
    }

    fn dummy_signature(&self) -> Bytes {
        calls::encode_module_signature(&self.module.dummy_signature(), self.module.address())
    }

    /// Fee values from the bundler, or the provider's EIP-1559 estimate if the bundler has none
    async fn gas_fee_values(&self) -> Result<GasFeeValues, SmartAccountError> {
        match self.bundler.get_gas_fee_values().await {
            Ok(fees) => Ok(fees),
            Err(err) => {
                warn!("Bundler gas fee values unavailable ({err}), estimating with the provider");
                let (max_fee_per_gas, max_priority_fee_per_gas) = self
                    .eth_client
                    .estimate_eip1559_fees(None)
                    .await
                    .map_err(SmartAccountError::provider)?;
                Ok(GasFeeValues { max_fee_per_gas, max_priority_fee_per_gas })
            }
        }
    }

    async fn sponsor(
        &self,
        uo: &mut UserOperationPartial,
        data: &PaymasterServiceData,
    ) -> Result<(), SmartAccountError> {
        let paymaster = self.paymaster.as_ref().ok_or(SmartAccountError::NoPaymaster)?;
        let response = paymaster.get_paymaster_and_data(uo, data).await?;

        uo.paymaster_and_data = Some(response.paymaster_and_data);
        if let (Some(call_gas_limit), Some(verification_gas_limit), Some(pre_verification_gas)) = (
            response.call_gas_limit,
            response.verification_gas_limit,
            response.pre_verification_gas,
        ) {
            uo.call_gas_limit = Some(call_gas_limit);
            uo.verification_gas_limit = Some(verification_gas_limit);
            uo.pre_verification_gas = Some(pre_verification_gas);
        }
        Ok(())
    }
}

fn has_gas_limits(uo: &UserOperationPartial) -> bool {
    uo.call_gas_limit.is_some() &&
        uo.verification_gas_limit.is_some() &&
        uo.pre_verification_gas.is_some()
}

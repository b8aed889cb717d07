pub use super::{error::EntryPointError, gen::EntryPointAPI};
use ethers::{
    providers::Middleware,
    types::{Address, U256},
};
use std::sync::Arc;
use tracing::trace;
use vireo_primitives::{UserOperationHash, UserOperationSigned};

#[derive(Clone)]
pub struct EntryPoint<M: Middleware + 'static> {
    eth_client: Arc<M>,
    address: Address,
    entry_point_api: EntryPointAPI<M>,
}

impl<M: Middleware + 'static> EntryPoint<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        let entry_point_api = EntryPointAPI::new(address, eth_client.clone());
        Self { eth_client, address, entry_point_api }
    }

    pub fn entry_point_api(&self) -> &EntryPointAPI<M> {
        &self.entry_point_api
    }

    pub fn eth_client(&self) -> Arc<M> {
        self.eth_client.clone()
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Next nonce of `address` in the nonce sequence `key`
    pub async fn get_nonce(&self, address: &Address, key: U256) -> Result<U256, EntryPointError> {
        let nonce = self
            .entry_point_api
            .get_nonce(*address, key)
            .call()
            .await
            .map_err(EntryPointError::from_contract_error)?;
        trace!("Nonce of {address:?} (key {key}) is {nonce}");
        Ok(nonce)
    }

    /// Deposit of `address` held by the entry point
    pub async fn balance_of(&self, address: &Address) -> Result<U256, EntryPointError> {
        self.entry_point_api
            .balance_of(*address)
            .call()
            .await
            .map_err(EntryPointError::from_contract_error)
    }

    /// User operation hash as computed on chain
    pub async fn get_user_op_hash<U: Into<UserOperationSigned>>(
        &self,
        uo: U,
    ) -> Result<UserOperationHash, EntryPointError> {
        let uo: UserOperationSigned = uo.into();
        self.entry_point_api
            .get_user_op_hash(uo.into())
            .call()
            .await
            .map(UserOperationHash::from)
            .map_err(EntryPointError::from_contract_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::AbiEncode,
        providers::{MockProvider, Provider},
        types::Bytes,
    };

    fn entry_point(mock: MockProvider) -> EntryPoint<Provider<MockProvider>> {
        EntryPoint::new(
            Arc::new(Provider::new(mock)),
            "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap(),
        )
    }

    #[tokio::test]
    async fn get_nonce_decodes_call_result() -> eyre::Result<()> {
        let mock = MockProvider::new();
        mock.push::<Bytes, _>(Bytes::from(U256::from(42).encode()))?;
        let ep = entry_point(mock.clone());

        let nonce = ep.get_nonce(&Address::repeat_byte(1), U256::zero()).await?;
        assert_eq!(nonce, U256::from(42));
        Ok(())
    }

    #[tokio::test]
    async fn get_nonce_reports_provider_error() {
        // no response queued
        let ep = entry_point(MockProvider::new());
        let err = ep.get_nonce(&Address::repeat_byte(1), U256::zero()).await.unwrap_err();
        assert!(matches!(err, EntryPointError::Provider { .. }), "{err:?}");
    }
}

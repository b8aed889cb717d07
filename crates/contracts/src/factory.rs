pub use super::gen::SmartAccountFactoryAPI;
use super::{error::FactoryError, gen::smart_account_factory_api::DeployCounterFactualAccountCall};
use ethers::{
    abi::AbiEncode,
    providers::Middleware,
    types::{Address, Bytes, U256},
};
use std::sync::Arc;

/// Init code deploying a smart account through `factory`: the factory address followed by the
/// `deployCounterFactualAccount` call data
pub fn pack_init_code(
    factory: Address,
    module: Address,
    module_setup_data: Bytes,
    index: U256,
) -> Bytes {
    let call = DeployCounterFactualAccountCall {
        module_setup_contract: module,
        module_setup_data,
        index,
    };
    [factory.as_bytes().to_vec(), call.encode()].concat().into()
}

/// Smart account proxy factory
#[derive(Clone)]
pub struct SmartAccountFactory<M: Middleware + 'static> {
    address: Address,
    factory_api: SmartAccountFactoryAPI<M>,
}

impl<M: Middleware + 'static> SmartAccountFactory<M> {
    pub fn new(eth_client: Arc<M>, address: Address) -> Self {
        Self { address, factory_api: SmartAccountFactoryAPI::new(address, eth_client) }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Address the account will have once deployed with the given module setup and index
    pub async fn counterfactual_address(
        &self,
        module: Address,
        module_setup_data: Bytes,
        index: U256,
    ) -> Result<Address, FactoryError> {
        self.factory_api
            .get_address_for_counter_factual_account(module, module_setup_data, index)
            .call()
            .await
            .map_err(|e| FactoryError::Call {
                function: "getAddressForCounterFactualAccount".into(),
                inner: e.to_string(),
            })
    }

    /// See [pack_init_code](pack_init_code)
    pub fn init_code(&self, module: Address, module_setup_data: Bytes, index: U256) -> Bytes {
        pack_init_code(self.address, module, module_setup_data, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        providers::{MockProvider, Provider},
        utils::id,
    };

    #[test]
    fn init_code_starts_with_factory_and_selector() {
        let factory: Address = "0x000000a56Aaca3e9a4C479ea6b6CD0DbcB6634F5".parse().unwrap();
        let module: Address = "0x0000001c5b32F37F5beA87BDD5374eB2aC54eA8e".parse().unwrap();
        let init_code = pack_init_code(factory, module, Bytes::from_static(&[0xaa]), U256::zero());

        assert_eq!(&init_code[..20], factory.as_bytes());
        assert_eq!(&init_code[20..24], &id("deployCounterFactualAccount(address,bytes,uint256)")[..]);
        // selector + 3 head words + length word + one padded data word
        assert_eq!(init_code.len(), 20 + 4 + 32 * 5);
    }

    #[tokio::test]
    async fn counterfactual_address_from_view_call() -> eyre::Result<()> {
        let account = Address::repeat_byte(0x42);
        let mock = MockProvider::new();
        mock.push::<Bytes, _>(Bytes::from(account.encode()))?;
        let factory = SmartAccountFactory::new(
            Arc::new(Provider::new(mock)),
            "0x000000a56Aaca3e9a4C479ea6b6CD0DbcB6634F5".parse()?,
        );

        let address = factory
            .counterfactual_address(Address::repeat_byte(1), Bytes::default(), U256::zero())
            .await?;
        assert_eq!(address, account);
        Ok(())
    }
}

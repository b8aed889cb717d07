use crate::{bundler_api::BundlerApiClient, error::RpcError};
use ethers::types::Address;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::fmt;
use tracing::{debug, trace};
use vireo_primitives::{
    GasFeeValues, UserOperationByHash, UserOperationGasEstimation, UserOperationHash,
    UserOperationPartial, UserOperationReceipt, UserOperationSigned,
};

/// Client of a bundler bound to one entry point
#[derive(Clone)]
pub struct Bundler {
    client: HttpClient,
    url: String,
    entry_point: Address,
    chain_id: u64,
}

impl fmt::Debug for Bundler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bundler")
            .field("url", &self.url)
            .field("entry_point", &self.entry_point)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl Bundler {
    pub fn new(url: &str, entry_point: Address, chain_id: u64) -> Result<Self, RpcError> {
        let client = HttpClientBuilder::default().build(url).map_err(|err| {
            RpcError::InvalidEndpoint { url: url.to_string(), inner: err.to_string() }
        })?;
        Ok(Self { client, url: url.to_string(), entry_point, chain_id })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn entry_point(&self) -> Address {
        self.entry_point
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Chain ID reported by the bundler
    pub async fn remote_chain_id(&self) -> Result<u64, RpcError> {
        let chain_id =
            self.client.chain_id().await.map_err(RpcError::call("eth_chainId"))?;
        Ok(chain_id.as_u64())
    }

    pub async fn supported_entry_points(&self) -> Result<Vec<Address>, RpcError> {
        let entry_points = self
            .client
            .supported_entry_points()
            .await
            .map_err(RpcError::call("eth_supportedEntryPoints"))?;
        Ok(entry_points.iter().filter_map(|ep| ep.parse::<Address>().ok()).collect())
    }

    /// Fails with [RpcError::UnsupportedEntryPoint] if the bundler does not list the entry point
    /// this client was created for.
    pub async fn check_entry_point_supported(&self) -> Result<(), RpcError> {
        if self.supported_entry_points().await?.contains(&self.entry_point) {
            Ok(())
        } else {
            Err(RpcError::UnsupportedEntryPoint(self.entry_point))
        }
    }

    pub async fn estimate_user_op_gas(
        &self,
        uo: &UserOperationPartial,
    ) -> Result<UserOperationGasEstimation, RpcError> {
        trace!("Estimating gas of user operation {uo:?}");
        let estimation = self
            .client
            .estimate_user_operation_gas(uo.clone(), self.entry_point)
            .await
            .map_err(RpcError::call("eth_estimateUserOperationGas"))?;
        debug!("Bundler gas estimation: {estimation:?}");
        Ok(estimation)
    }

    pub async fn send_user_op(
        &self,
        uo: &UserOperationSigned,
    ) -> Result<UserOperationHash, RpcError> {
        trace!("Sending user operation {uo:?} to {:?}", self.entry_point);
        let uo_hash = self
            .client
            .send_user_operation(uo.clone(), self.entry_point)
            .await
            .map_err(RpcError::call("eth_sendUserOperation"))?;
        debug!("User operation {uo_hash} accepted by the bundler");
        Ok(uo_hash)
    }

    pub async fn get_user_op_receipt(
        &self,
        uo_hash: &UserOperationHash,
    ) -> Result<Option<UserOperationReceipt>, RpcError> {
        self.client
            .get_user_operation_receipt(*uo_hash)
            .await
            .map_err(RpcError::call("eth_getUserOperationReceipt"))
    }

    pub async fn get_user_op_by_hash(
        &self,
        uo_hash: &UserOperationHash,
    ) -> Result<Option<UserOperationByHash>, RpcError> {
        self.client
            .get_user_operation_by_hash(*uo_hash)
            .await
            .map_err(RpcError::call("eth_getUserOperationByHash"))
    }

    pub async fn get_gas_fee_values(&self) -> Result<GasFeeValues, RpcError> {
        self.client.get_gas_fee_values().await.map_err(RpcError::call("biconomy_getGasFeeValues"))
    }
}

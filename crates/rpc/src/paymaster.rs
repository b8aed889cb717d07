use crate::{error::RpcError, paymaster_api::PaymasterApiClient};
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::fmt;
use tracing::debug;
use vireo_primitives::{PaymasterAndDataResponse, PaymasterServiceData, UserOperationPartial};

/// Client of a sponsoring paymaster service
#[derive(Clone)]
pub struct Paymaster {
    client: HttpClient,
    url: String,
}

impl fmt::Debug for Paymaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paymaster").field("url", &self.url).finish()
    }
}

impl Paymaster {
    pub fn new(url: &str) -> Result<Self, RpcError> {
        let client = HttpClientBuilder::default().build(url).map_err(|err| {
            RpcError::InvalidEndpoint { url: url.to_string(), inner: err.to_string() }
        })?;
        Ok(Self { client, url: url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Requests `paymasterAndData` for the user operation
    ///
    /// The user operation must carry a (dummy) signature and, unless the paymaster computes them,
    /// its gas limits.
    pub async fn get_paymaster_and_data(
        &self,
        uo: &UserOperationPartial,
        service_data: &PaymasterServiceData,
    ) -> Result<PaymasterAndDataResponse, RpcError> {
        let response = self
            .client
            .sponsor_user_operation(uo.clone(), service_data.to_request())
            .await
            .map_err(RpcError::call("pm_sponsorUserOperation"))?;
        debug!("Paymaster ({}) response: {response:?}", service_data.mode);
        Ok(response)
    }
}

use ethers::types::{Address, U64};
use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use vireo_primitives::{
    GasFeeValues, UserOperationByHash, UserOperationGasEstimation, UserOperationHash,
    UserOperationPartial, UserOperationReceipt, UserOperationSigned,
};

/// The bundler RPC methods a smart account relies on
#[rpc(client, server)]
pub trait BundlerApi {
    /// Retrieve the current [EIP-155](https://eips.ethereum.org/EIPS/eip-155) chain ID.
    #[method(name = "eth_chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    /// Get the supported entry points for user operations.
    #[method(name = "eth_supportedEntryPoints")]
    async fn supported_entry_points(&self) -> RpcResult<Vec<String>>;

    /// Send a signed user operation.
    ///
    /// # Arguments
    /// * `user_operation: UserOperationSigned` - The user operation to be sent.
    /// * `entry_point: Address` - The address of the entry point.
    ///
    /// # Returns
    /// * `RpcResult<UserOperationHash>` - The hash of the sent user operation.
    #[method(name = "eth_sendUserOperation")]
    async fn send_user_operation(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash>;

    /// Estimate the gas limits of a (dummy signed) user operation.
    #[method(name = "eth_estimateUserOperationGas")]
    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationPartial,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation>;

    /// Retrieve the receipt of a user operation, `None` while it is not included.
    #[method(name = "eth_getUserOperationReceipt")]
    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>>;

    /// Retrieve a user operation by its hash.
    #[method(name = "eth_getUserOperationByHash")]
    async fn get_user_operation_by_hash(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationByHash>>;

    /// Fee values the bundler expects for the next user operation.
    #[method(name = "biconomy_getGasFeeValues")]
    async fn get_gas_fee_values(&self) -> RpcResult<GasFeeValues>;
}

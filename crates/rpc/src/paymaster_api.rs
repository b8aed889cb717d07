use jsonrpsee::{core::RpcResult, proc_macros::rpc};
use vireo_primitives::{
    paymaster::SponsorUserOperationDataAndMode, PaymasterAndDataResponse, UserOperationPartial,
};

/// The paymaster RPC methods
#[rpc(client, server)]
pub trait PaymasterApi {
    /// Ask the paymaster to sponsor a user operation.
    ///
    /// # Arguments
    /// * `user_operation: UserOperationPartial` - The (dummy signed) user operation.
    /// * `data: SponsorUserOperationDataAndMode` - The sponsorship mode and options.
    ///
    /// # Returns
    /// * `RpcResult<PaymasterAndDataResponse>` - `paymasterAndData` and, when requested, the gas
    ///   limits matching it.
    #[method(name = "pm_sponsorUserOperation")]
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperationPartial,
        data: SponsorUserOperationDataAndMode,
    ) -> RpcResult<PaymasterAndDataResponse>;
}

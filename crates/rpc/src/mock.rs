//! In-process bundler and paymaster for tests

use crate::{bundler_api::BundlerApiServer, paymaster_api::PaymasterApiServer};
use async_trait::async_trait;
use ethers::types::{Address, Bytes, TransactionReceipt, H256, U256, U64};
use jsonrpsee::{
    core::RpcResult,
    server::{Server, ServerHandle},
    types::ErrorObjectOwned,
    RpcModule,
};
use parking_lot::{Mutex, MutexGuard};
use std::{str::FromStr, sync::Arc};
use vireo_primitives::{
    constants::entry_point, paymaster::SponsorUserOperationDataAndMode, GasFeeValues,
    PaymasterAndDataResponse, UserOperation, UserOperationByHash, UserOperationGasEstimation,
    UserOperationHash, UserOperationPartial, UserOperationReceipt, UserOperationSigned,
};

/// Error code used for rejected user operations
pub const REJECTED_CODE: i32 = -32500;

/// Paymaster address the mock puts at the front of `paymasterAndData`
pub const MOCK_PAYMASTER: &str = "0x00000f79B7FaF42EEBAdbA19aCc07cD08Af44789";

#[derive(Debug)]
pub struct MockState {
    pub chain_id: u64,
    pub entry_points: Vec<Address>,
    pub gas_estimation: UserOperationGasEstimation,
    pub gas_fee_values: GasFeeValues,
    pub paymaster_response: PaymasterAndDataResponse,
    /// Number of `eth_getUserOperationReceipt` calls answered with `null` before the receipt
    pub pending_receipt_polls: usize,
    pub reject_send: Option<String>,
    pub reject_sponsorship: Option<String>,
    /// Answer `biconomy_getGasFeeValues` with an error
    pub reject_gas_fee_values: bool,
    pub estimated: Vec<UserOperationPartial>,
    pub sponsored: Vec<(UserOperationPartial, SponsorUserOperationDataAndMode)>,
    pub sent: Vec<UserOperation>,
    pub receipt_polls: usize,
}

impl Default for MockState {
    fn default() -> Self {
        let mut paymaster_and_data = Address::from_str(MOCK_PAYMASTER)
            .map(|addr| addr.as_bytes().to_vec())
            .unwrap_or_default();
        paymaster_and_data.extend_from_slice(&[0xab; 45]);

        Self {
            chain_id: 80001,
            entry_points: Address::from_str(entry_point::ADDRESS).into_iter().collect(),
            gas_estimation: UserOperationGasEstimation {
                pre_verification_gas: 48_588.into(),
                verification_gas_limit: 100_000.into(),
                call_gas_limit: 33_100.into(),
            },
            gas_fee_values: GasFeeValues {
                max_fee_per_gas: 1_695_000_030u64.into(),
                max_priority_fee_per_gas: 1_695_000_000u64.into(),
            },
            paymaster_response: PaymasterAndDataResponse {
                paymaster_and_data: paymaster_and_data.into(),
                pre_verification_gas: Some(50_000.into()),
                verification_gas_limit: Some(150_000.into()),
                call_gas_limit: Some(40_000.into()),
            },
            pending_receipt_polls: 0,
            reject_send: None,
            reject_sponsorship: None,
            reject_gas_fee_values: false,
            estimated: vec![],
            sponsored: vec![],
            sent: vec![],
            receipt_polls: 0,
        }
    }
}

/// Bundler and paymaster served from one in-process JSON-RPC server
#[derive(Clone, Debug, Default)]
pub struct MockServices {
    state: Arc<Mutex<MockState>>,
}

impl MockServices {
    pub fn new(state: MockState) -> Self {
        Self { state: Arc::new(Mutex::new(state)) }
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock()
    }

    /// Starts the server on a random local port and returns its URL
    pub async fn start(&self) -> eyre::Result<(String, ServerHandle)> {
        let server = Server::builder().build("127.0.0.1:0").await?;
        let addr = server.local_addr()?;

        let mut module = RpcModule::new(());
        module.merge(BundlerApiServer::into_rpc(self.clone()))?;
        module.merge(PaymasterApiServer::into_rpc(self.clone()))?;

        let handle = server.start(module);
        Ok((format!("http://{addr}"), handle))
    }
}

fn rejected(message: &str) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(REJECTED_CODE, message.to_string(), None::<bool>)
}

fn check_entry_point(state: &MockState, entry_point: &Address) -> RpcResult<()> {
    if state.entry_points.contains(entry_point) {
        Ok(())
    } else {
        Err(ErrorObjectOwned::owned(
            -32602,
            format!("entry point {entry_point:?} not supported"),
            None::<bool>,
        ))
    }
}

#[async_trait]
impl BundlerApiServer for MockServices {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(self.state().chain_id.into())
    }

    async fn supported_entry_points(&self) -> RpcResult<Vec<String>> {
        Ok(self
            .state()
            .entry_points
            .iter()
            .map(|ep| ethers::utils::to_checksum(ep, None))
            .collect())
    }

    async fn send_user_operation(
        &self,
        user_operation: UserOperationSigned,
        entry_point: Address,
    ) -> RpcResult<UserOperationHash> {
        let mut state = self.state();
        check_entry_point(&state, &entry_point)?;
        if let Some(reason) = &state.reject_send {
            return Err(rejected(reason));
        }
        if user_operation.signature.is_empty() {
            return Err(rejected("AA23 reverted: missing signature"));
        }

        let uo_hash = user_operation.hash(&entry_point, state.chain_id);
        state.sent.push(UserOperation::from_user_operation_signed(uo_hash, user_operation));
        Ok(uo_hash)
    }

    async fn estimate_user_operation_gas(
        &self,
        user_operation: UserOperationPartial,
        entry_point: Address,
    ) -> RpcResult<UserOperationGasEstimation> {
        let mut state = self.state();
        check_entry_point(&state, &entry_point)?;
        state.estimated.push(user_operation);
        Ok(state.gas_estimation.clone())
    }

    async fn get_user_operation_receipt(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationReceipt>> {
        let mut state = self.state();
        let Some(uo) = state.sent.iter().find(|uo| uo.hash == user_operation_hash).cloned() else {
            return Ok(None);
        };

        state.receipt_polls += 1;
        if state.receipt_polls <= state.pending_receipt_polls {
            return Ok(None);
        }

        let (sender, _, paymaster) = uo.get_entities();
        Ok(Some(UserOperationReceipt {
            user_operation_hash,
            sender,
            nonce: uo.nonce,
            paymaster,
            actual_gas_cost: U256::from(140_000u64) * state.gas_fee_values.max_fee_per_gas,
            actual_gas_used: 140_000.into(),
            success: true,
            reason: String::new(),
            logs: vec![],
            tx_receipt: TransactionReceipt {
                transaction_hash: H256::from(user_operation_hash.0),
                status: Some(1.into()),
                ..Default::default()
            },
        }))
    }

    async fn get_user_operation_by_hash(
        &self,
        user_operation_hash: UserOperationHash,
    ) -> RpcResult<Option<UserOperationByHash>> {
        let state = self.state();
        let entry_point = state.entry_points.first().copied().unwrap_or_default();
        Ok(state.sent.iter().find(|uo| uo.hash == user_operation_hash).map(|uo| {
            UserOperationByHash {
                user_operation: uo.user_operation.clone(),
                entry_point,
                transaction_hash: uo.hash.0,
                block_hash: H256::zero(),
                block_number: U64::one(),
            }
        }))
    }

    async fn get_gas_fee_values(&self) -> RpcResult<GasFeeValues> {
        let state = self.state();
        if state.reject_gas_fee_values {
            return Err(rejected("gas fee values unavailable"));
        }
        Ok(state.gas_fee_values)
    }
}

#[async_trait]
impl PaymasterApiServer for MockServices {
    async fn sponsor_user_operation(
        &self,
        user_operation: UserOperationPartial,
        data: SponsorUserOperationDataAndMode,
    ) -> RpcResult<PaymasterAndDataResponse> {
        let mut state = self.state();
        if let Some(reason) = &state.reject_sponsorship {
            return Err(rejected(reason));
        }
        if user_operation.signature.as_ref().map_or(true, |signature| signature.is_empty()) {
            return Err(rejected("user operation must carry a dummy signature"));
        }

        let calculate_gas_limits = data.calculate_gas_limits.unwrap_or_default();
        state.sponsored.push((user_operation, data));

        let mut response = state.paymaster_response.clone();
        if !calculate_gas_limits {
            response.pre_verification_gas = None;
            response.verification_gas_limit = None;
            response.call_gas_limit = None;
        }
        Ok(response)
    }
}

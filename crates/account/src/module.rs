//! Validation modules: the contracts a smart account delegates signature checks to

use crate::error::SmartAccountError;
use async_trait::async_trait;
use ethers::types::{Address, Bytes};
use std::str::FromStr;
use vireo_contracts::calls::encode_init_for_smart_account;
use vireo_primitives::{constants::modules, UserOperationHash, Wallet};

/// A validation module the smart account can sign user operations with
#[async_trait]
pub trait ValidationModule: Send + Sync {
    /// Address of the module contract
    fn address(&self) -> Address;

    /// Setup data passed to the module when the account is deployed with it
    fn init_data(&self) -> Bytes;

    /// Signature shaped like a real one, used for gas estimation and sponsorship
    fn dummy_signature(&self) -> Bytes;

    /// Module-level signature of a user operation hash (without the module address)
    async fn sign_user_op_hash(
        &self,
        uo_hash: &UserOperationHash,
    ) -> Result<Bytes, SmartAccountError>;

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, SmartAccountError>;
}

/// ECDSA ownership module: the account is owned by a single EOA
#[derive(Clone, Debug)]
pub struct EcdsaOwnershipModule {
    address: Address,
    owner: Wallet,
    dummy_signature: Bytes,
}

impl EcdsaOwnershipModule {
    pub fn new(owner: Wallet, address: Address) -> Result<Self, SmartAccountError> {
        let dummy_signature =
            Bytes::from_str(modules::DUMMY_ECDSA_SIGNATURE).map_err(SmartAccountError::signer)?;
        Ok(Self { address, owner, dummy_signature })
    }

    /// Address of the EOA owning the account
    pub fn owner(&self) -> Address {
        self.owner.address()
    }
}

#[async_trait]
impl ValidationModule for EcdsaOwnershipModule {
    fn address(&self) -> Address {
        self.address
    }

    fn init_data(&self) -> Bytes {
        encode_init_for_smart_account(self.owner.address())
    }

    fn dummy_signature(&self) -> Bytes {
        self.dummy_signature.clone()
    }

    async fn sign_user_op_hash(
        &self,
        uo_hash: &UserOperationHash,
    ) -> Result<Bytes, SmartAccountError> {
        let signature = self
            .owner
            .sign_user_operation_hash(uo_hash)
            .await
            .map_err(SmartAccountError::signer)?;
        Ok(signature.to_vec().into())
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Bytes, SmartAccountError> {
        let signature = self.owner.sign_message(message).await.map_err(SmartAccountError::signer)?;
        Ok(signature.to_vec().into())
    }
}

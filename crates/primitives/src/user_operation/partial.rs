//! User operation with optional fields (the shape a smart account builds before signing)

use super::{UserOperationError, UserOperationField, UserOperationHash, UserOperationSigned};
use crate::utils::as_checksum_addr_opt;
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// User operation with all fields being optional
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOperationPartial {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "as_checksum_addr_opt"
    )]
    pub sender: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_code: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_gas_limit: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_verification_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paymaster_and_data: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Bytes>,
}

impl UserOperationPartial {
    /// Whether the given field carries a value
    pub fn is_set(&self, field: UserOperationField) -> bool {
        match field {
            UserOperationField::Sender => self.sender.is_some(),
            UserOperationField::Nonce => self.nonce.is_some(),
            UserOperationField::InitCode => self.init_code.is_some(),
            UserOperationField::CallData => self.call_data.is_some(),
            UserOperationField::CallGasLimit => self.call_gas_limit.is_some(),
            UserOperationField::VerificationGasLimit => self.verification_gas_limit.is_some(),
            UserOperationField::PreVerificationGas => self.pre_verification_gas.is_some(),
            UserOperationField::MaxFeePerGas => self.max_fee_per_gas.is_some(),
            UserOperationField::MaxPriorityFeePerGas => self.max_priority_fee_per_gas.is_some(),
            UserOperationField::PaymasterAndData => self.paymaster_and_data.is_some(),
            UserOperationField::Signature => self.signature.is_some(),
        }
    }

    /// Checks that every field in `required` is set
    ///
    /// # Returns
    /// * `Err(UserOperationError::MissingField)` - for the first field (in `required` order) that
    ///   is not set
    pub fn validate(&self, required: &[UserOperationField]) -> Result<(), UserOperationError> {
        match required.iter().find(|field| !self.is_set(**field)) {
            Some(field) => Err(UserOperationError::MissingField(*field)),
            None => Ok(()),
        }
    }

    /// Calculates the hash of the user operation (the signature is not needed)
    pub fn hash(
        &self,
        entry_point: &Address,
        chain_id: u64,
    ) -> Result<UserOperationHash, UserOperationError> {
        self.validate(&UserOperationField::REQUIRED_FOR_HASH)?;
        let user_operation =
            UserOperationSigned::try_from(self.clone().signature(Bytes::default()))?;
        Ok(user_operation.hash(entry_point, chain_id))
    }

    /// Sets the signature of the user operation
    pub fn signature(mut self, signature: Bytes) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Sets the paymaster and data of the user operation
    pub fn paymaster_and_data(mut self, paymaster_and_data: Bytes) -> Self {
        self.paymaster_and_data = Some(paymaster_and_data);
        self
    }
}

impl TryFrom<UserOperationPartial> for UserOperationSigned {
    type Error = UserOperationError;

    fn try_from(uo: UserOperationPartial) -> Result<Self, Self::Error> {
        use UserOperationError::MissingField;
        use UserOperationField as F;

        Ok(Self {
            sender: uo.sender.ok_or(MissingField(F::Sender))?,
            nonce: uo.nonce.ok_or(MissingField(F::Nonce))?,
            init_code: uo.init_code.ok_or(MissingField(F::InitCode))?,
            call_data: uo.call_data.ok_or(MissingField(F::CallData))?,
            call_gas_limit: uo.call_gas_limit.ok_or(MissingField(F::CallGasLimit))?,
            verification_gas_limit: uo
                .verification_gas_limit
                .ok_or(MissingField(F::VerificationGasLimit))?,
            pre_verification_gas: uo
                .pre_verification_gas
                .ok_or(MissingField(F::PreVerificationGas))?,
            max_fee_per_gas: uo.max_fee_per_gas.ok_or(MissingField(F::MaxFeePerGas))?,
            max_priority_fee_per_gas: uo
                .max_priority_fee_per_gas
                .ok_or(MissingField(F::MaxPriorityFeePerGas))?,
            paymaster_and_data: uo.paymaster_and_data.ok_or(MissingField(F::PaymasterAndData))?,
            signature: uo.signature.ok_or(MissingField(F::Signature))?,
        })
    }
}

impl From<UserOperationSigned> for UserOperationPartial {
    fn from(uo: UserOperationSigned) -> Self {
        Self {
            sender: Some(uo.sender),
            nonce: Some(uo.nonce),
            init_code: Some(uo.init_code),
            call_data: Some(uo.call_data),
            call_gas_limit: Some(uo.call_gas_limit),
            verification_gas_limit: Some(uo.verification_gas_limit),
            pre_verification_gas: Some(uo.pre_verification_gas),
            max_fee_per_gas: Some(uo.max_fee_per_gas),
            max_priority_fee_per_gas: Some(uo.max_priority_fee_per_gas),
            paymaster_and_data: Some(uo.paymaster_and_data),
            signature: Some(uo.signature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> UserOperationSigned {
        UserOperationSigned::default()
            .sender("0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap())
            .nonce(3.into())
            .call_gas_limit(33_100.into())
            .verification_gas_limit(100_000.into())
            .pre_verification_gas(21_000.into())
            .max_fee_per_gas(1_695_000_030_u64.into())
            .max_priority_fee_per_gas(1_695_000_000.into())
            .signature("0x1234".parse().unwrap())
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let mut uo = UserOperationPartial::from(complete());
        assert_eq!(uo.validate(&UserOperationField::ALL), Ok(()));

        uo.signature = None;
        uo.call_gas_limit = None;
        assert_eq!(
            uo.validate(&UserOperationField::REQUIRED_FOR_HASH),
            Err(UserOperationError::MissingField(UserOperationField::CallGasLimit))
        );

        uo.call_gas_limit = Some(1.into());
        assert_eq!(uo.validate(&UserOperationField::REQUIRED_FOR_HASH), Ok(()));
        assert_eq!(
            uo.validate(&UserOperationField::ALL),
            Err(UserOperationError::MissingField(UserOperationField::Signature))
        );
    }

    #[test]
    fn hash_ignores_signature() {
        let entry_point: Address = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789".parse().unwrap();
        let signed = complete();
        let mut partial = UserOperationPartial::from(signed.clone());
        partial.signature = None;

        assert_eq!(partial.hash(&entry_point, 80_001).unwrap(), signed.hash(&entry_point, 80_001));

        partial.paymaster_and_data = None;
        assert_eq!(
            partial.hash(&entry_point, 80_001),
            Err(UserOperationError::MissingField(UserOperationField::PaymasterAndData))
        );
    }

    #[test]
    fn signed_requires_every_field() {
        let mut partial = UserOperationPartial::from(complete());
        assert_eq!(UserOperationSigned::try_from(partial.clone()).unwrap(), complete());

        partial.nonce = None;
        assert_eq!(
            UserOperationSigned::try_from(partial),
            Err(UserOperationError::MissingField(UserOperationField::Nonce))
        );
    }

    #[test]
    fn partial_serializes_only_present_fields() {
        let partial = UserOperationPartial {
            sender: Some("0x9c5754de1443984659e1b3a8d1931d83475ba29c".parse().unwrap()),
            nonce: Some(U256::zero()),
            ..Default::default()
        };
        let value = serde_json::to_value(&partial).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sender": "0x9c5754De1443984659E1b3a8d1931D83475ba29C",
                "nonce": "0x0",
            })
        );
    }
}

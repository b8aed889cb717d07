use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Names of the user operation fields, as they appear on the wire
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum UserOperationField {
    Sender,
    Nonce,
    InitCode,
    CallData,
    CallGasLimit,
    VerificationGasLimit,
    PreVerificationGas,
    MaxFeePerGas,
    MaxPriorityFeePerGas,
    PaymasterAndData,
    Signature,
}

impl UserOperationField {
    /// Fields that must be set before the user operation hash can be computed
    pub const REQUIRED_FOR_HASH: [UserOperationField; 10] = [
        UserOperationField::Sender,
        UserOperationField::Nonce,
        UserOperationField::InitCode,
        UserOperationField::CallData,
        UserOperationField::CallGasLimit,
        UserOperationField::VerificationGasLimit,
        UserOperationField::PreVerificationGas,
        UserOperationField::MaxFeePerGas,
        UserOperationField::MaxPriorityFeePerGas,
        UserOperationField::PaymasterAndData,
    ];

    /// Every field, signature included
    pub const ALL: [UserOperationField; 11] = [
        UserOperationField::Sender,
        UserOperationField::Nonce,
        UserOperationField::InitCode,
        UserOperationField::CallData,
        UserOperationField::CallGasLimit,
        UserOperationField::VerificationGasLimit,
        UserOperationField::PreVerificationGas,
        UserOperationField::MaxFeePerGas,
        UserOperationField::MaxPriorityFeePerGas,
        UserOperationField::PaymasterAndData,
        UserOperationField::Signature,
    ];
}

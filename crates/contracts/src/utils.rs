use crate::gen::entry_point_api;
use vireo_primitives::UserOperationSigned;

impl From<UserOperationSigned> for entry_point_api::UserOperation {
    fn from(uo: UserOperationSigned) -> Self {
        Self {
            sender: uo.sender,
            nonce: uo.nonce,
            init_code: uo.init_code,
            call_data: uo.call_data,
            call_gas_limit: uo.call_gas_limit,
            verification_gas_limit: uo.verification_gas_limit,
            pre_verification_gas: uo.pre_verification_gas,
            max_fee_per_gas: uo.max_fee_per_gas,
            max_priority_fee_per_gas: uo.max_priority_fee_per_gas,
            paymaster_and_data: uo.paymaster_and_data,
            signature: uo.signature,
        }
    }
}

impl From<entry_point_api::UserOperation> for UserOperationSigned {
    fn from(uo: entry_point_api::UserOperation) -> Self {
        Self {
            sender: uo.sender,
            nonce: uo.nonce,
            init_code: uo.init_code,
            call_data: uo.call_data,
            call_gas_limit: uo.call_gas_limit,
            verification_gas_limit: uo.verification_gas_limit,
            pre_verification_gas: uo.pre_verification_gas,
            max_fee_per_gas: uo.max_fee_per_gas,
            max_priority_fee_per_gas: uo.max_priority_fee_per_gas,
            paymaster_and_data: uo.paymaster_and_data,
            signature: uo.signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::AbiEncode;

    #[test]
    fn abi_layout_matches_primitive() {
        let uo = UserOperationSigned::default()
            .sender("0x9c5754De1443984659E1b3a8d1931D83475ba29C".parse().unwrap())
            .call_gas_limit(200_000.into())
            .signature("0x1234".parse().unwrap());
        let api: entry_point_api::UserOperation = uo.clone().into();
        assert_eq!(api.clone().encode(), uo.pack().to_vec());
        assert_eq!(UserOperationSigned::from(api), uo);
    }
}

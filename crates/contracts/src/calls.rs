//! Call data encoders for the smart account, its validation modules and the demo token factory

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use ethers::{
    abi::{encode, Token},
    types::{Address as EAddress, Bytes as EBytes, U256 as EU256},
};
use vireo_primitives::Transaction;

sol! {
    function execute_ncC(address dest, uint256 value, bytes calldata func);
    function executeBatch_y6U(address[] calldata dest, uint256[] calldata value, bytes[] calldata func);
    function enableModule(address module);
    function initForSmartAccount(address eoaOwner);
    function getERC20Instance(string memory name, string memory symbol);
}

fn to_address(address: EAddress) -> Address {
    Address::from(address.0)
}

fn to_u256(value: EU256) -> U256 {
    U256::from_limbs(value.0)
}

/// Smart account call executing a single transaction
pub fn encode_execute(tx: &Transaction) -> EBytes {
    execute_ncCCall { dest: to_address(tx.to), value: to_u256(tx.value), func: tx.data.to_vec() }
        .abi_encode()
        .into()
}

/// Smart account call executing several transactions in order
pub fn encode_execute_batch(txs: &[Transaction]) -> EBytes {
    executeBatch_y6UCall {
        dest: txs.iter().map(|tx| to_address(tx.to)).collect(),
        value: txs.iter().map(|tx| to_u256(tx.value)).collect(),
        func: txs.iter().map(|tx| tx.data.to_vec()).collect(),
    }
    .abi_encode()
    .into()
}

/// Smart account call enabling a validation module
pub fn encode_enable_module(module: EAddress) -> EBytes {
    enableModuleCall { module: to_address(module) }.abi_encode().into()
}

/// ECDSA ownership module setup data binding the account to `owner`
pub fn encode_init_for_smart_account(owner: EAddress) -> EBytes {
    initForSmartAccountCall { eoaOwner: to_address(owner) }.abi_encode().into()
}

/// Signature as checked by the smart account: `abi.encode(moduleSignature, moduleAddress)`
///
/// The account forwards `moduleSignature` to the validation module at `moduleAddress`.
pub fn encode_module_signature(signature: &[u8], module: EAddress) -> EBytes {
    encode(&[Token::Bytes(signature.to_vec()), Token::Address(module)]).into()
}

/// Token factory call deploying a new ERC-20 token
pub fn encode_get_erc20_instance(name: &str, symbol: &str) -> EBytes {
    getERC20InstanceCall { name: name.into(), symbol: symbol.into() }.abi_encode().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::{
        abi::{decode, ParamType, Token},
        utils::{id, parse_ether},
    };

    fn selector(data: &EBytes) -> [u8; 4] {
        data[..4].try_into().unwrap()
    }

    #[test]
    fn execute_single_transfer() {
        let to: EAddress = "0x4276653514F9206c2cB371DF4D530f6fEe0EDE17".parse().unwrap();
        let tx = Transaction::new(to).value(parse_ether("0.01").unwrap());
        let data = encode_execute(&tx);

        assert_eq!(selector(&data), id("execute_ncC(address,uint256,bytes)"));
        assert_eq!(selector(&data), [0x00, 0x00, 0x18, 0x9a]);
        let tokens =
            decode(&[ParamType::Address, ParamType::Uint(256), ParamType::Bytes], &data[4..])
                .unwrap();
        assert_eq!(
            tokens,
            vec![Token::Address(to), Token::Uint(parse_ether("0.01").unwrap()), Token::Bytes(vec![])]
        );
    }

    #[test]
    fn execute_batch_keeps_order() {
        let txs = vec![
            Transaction::new(EAddress::repeat_byte(1)).value(1.into()),
            Transaction::new(EAddress::repeat_byte(2)).data(EBytes::from_static(&[0xde, 0xad])),
        ];
        let data = encode_execute_batch(&txs);

        assert_eq!(selector(&data), id("executeBatch_y6U(address[],uint256[],bytes[])"));
        let tokens = decode(
            &[
                ParamType::Array(Box::new(ParamType::Address)),
                ParamType::Array(Box::new(ParamType::Uint(256))),
                ParamType::Array(Box::new(ParamType::Bytes)),
            ],
            &data[4..],
        )
        .unwrap();
        assert_eq!(
            tokens[0],
            Token::Array(vec![
                Token::Address(EAddress::repeat_byte(1)),
                Token::Address(EAddress::repeat_byte(2))
            ])
        );
        assert_eq!(tokens[1], Token::Array(vec![Token::Uint(1.into()), Token::Uint(0.into())]));
        assert_eq!(
            tokens[2],
            Token::Array(vec![Token::Bytes(vec![]), Token::Bytes(vec![0xde, 0xad])])
        );
    }

    #[test]
    fn token_factory_call_encodes_name_and_symbol() {
        let data = encode_get_erc20_instance("Test01", "TST");
        assert_eq!(selector(&data), id("getERC20Instance(string,string)"));
        let tokens = decode(&[ParamType::String, ParamType::String], &data[4..]).unwrap();
        assert_eq!(tokens, vec![Token::String("Test01".into()), Token::String("TST".into())]);
    }

    #[test]
    fn module_calls() {
        let module: EAddress = "0x006a6Bea048809c6417487B4636ea8C1A3ed559C".parse().unwrap();
        let data = encode_enable_module(module);
        assert_eq!(selector(&data), [0x61, 0x0b, 0x59, 0x25]);
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[16..], module.as_bytes());

        let owner = EAddress::repeat_byte(0xee);
        let data = encode_init_for_smart_account(owner);
        assert_eq!(selector(&data), id("initForSmartAccount(address)"));
        assert_eq!(&data[16..], owner.as_bytes());
    }

    #[test]
    fn module_signature_is_bytes_then_address() {
        let module: EAddress = "0x006a6Bea048809c6417487B4636ea8C1A3ed559C".parse().unwrap();
        let signature = [0x11u8; 65];
        let data = encode_module_signature(&signature, module);

        // offset, address, length, 65 bytes padded to 96
        assert_eq!(data.len(), 32 * 3 + 96);
        assert_eq!(EU256::from_big_endian(&data[..32]), EU256::from(64));
        assert_eq!(&data[44..64], module.as_bytes());
        let tokens = decode(&[ParamType::Bytes, ParamType::Address], &data).unwrap();
        assert_eq!(tokens, vec![Token::Bytes(signature.to_vec()), Token::Address(module)]);
    }
}

use ethers::contract::abigen;

abigen!(
    EntryPointAPI,
    r#"[
        struct UserOperation {address sender;uint256 nonce;bytes initCode;bytes callData;uint256 callGasLimit;uint256 verificationGasLimit;uint256 preVerificationGas;uint256 maxFeePerGas;uint256 maxPriorityFeePerGas;bytes paymasterAndData;bytes signature;}
        function getNonce(address sender, uint192 key) external view returns (uint256 nonce)
        function getUserOpHash(UserOperation calldata userOp) external view returns (bytes32)
        function balanceOf(address account) external view returns (uint256)
        error FailedOp(uint256 opIndex, string reason)
    ]"#
);

abigen!(
    SmartAccountFactoryAPI,
    r#"[
        function getAddressForCounterFactualAccount(address moduleSetupContract, bytes calldata moduleSetupData, uint256 index) external view returns (address _account)
        function deployCounterFactualAccount(address moduleSetupContract, bytes calldata moduleSetupData, uint256 index) public returns (address proxy)
    ]"#
);

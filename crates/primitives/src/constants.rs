//! Account abstraction (ERC-4337)-related constants

/// Entry point smart contract
pub mod entry_point {
    /// Address of the entry point smart contract
    pub const ADDRESS: &str = "0x5FF137D4b0FDCD49DcA30c7CF57E578a026d2789";
    /// Version of the entry point smart contract
    pub const VERSION: &str = "0.6.0";
}

/// Smart account (v2) deployment
pub mod smart_account {
    /// Factory deploying the smart account proxies
    pub const FACTORY_ADDRESS: &str = "0x000000a56Aaca3e9a4C479ea6b6CD0DbcB6634F5";
    /// Name reported to the paymaster
    pub const NAME: &str = "BICONOMY";
    /// Version reported to the paymaster
    pub const VERSION: &str = "2.0.0";
    /// Index used for the counterfactual address when none is given
    pub const DEFAULT_INDEX: u64 = 0;
    /// Nonce key used when none is given
    pub const DEFAULT_NONCE_KEY: u64 = 0;
}

/// Validation modules
pub mod modules {
    /// ECDSA ownership validation module
    pub const ECDSA_OWNERSHIP_MODULE: &str = "0x0000001c5b32F37F5beA87BDD5374eB2aC54eA8e";
    /// 65-byte signature used in place of a real one during gas estimation
    pub const DUMMY_ECDSA_SIGNATURE: &str = "0x73c3ac716c487ca34bb858247b5ccf1dc354fbaabdd089af3b2ac8e78ba85a4959a2d76250325bd67c11771c31fccda87c33ceec17cc0de912690521bb95ffcb1b";
}

/// Remote services
pub mod services {
    /// Polygon Mumbai JSON-RPC node
    pub const ETH_CLIENT_ADDRESS: &str = "https://rpc.ankr.com/polygon_mumbai";
    /// Bundler endpoint (Polygon Mumbai)
    pub const BUNDLER_URL: &str =
        "https://bundler.biconomy.io/api/v2/80001/nJPK7B3ru.dd7f7861-190d-41bd-af80-6877f74b8f44";
    /// Paymaster endpoint (Polygon Mumbai)
    pub const PAYMASTER_URL: &str =
        "https://paymaster.biconomy.io/api/v1/80001/L7o3s0AJT.cd6e4e03-ed3d-484b-baa9-5c30a9bbdaa4";
}

/// User operation receipt polling
pub mod receipt {
    /// Interval between two `eth_getUserOperationReceipt` calls (in milliseconds)
    pub const POLL_INTERVAL: u64 = 5_000;
    /// Time after which waiting for a receipt gives up (in milliseconds)
    pub const TIMEOUT: u64 = 120_000;
}

/// Supported chains
pub mod supported_chains {
    use alloy_chains::NamedChain;

    pub const CHAINS: [NamedChain; 8] = [
        NamedChain::Dev,
        NamedChain::Mainnet,
        NamedChain::Sepolia,
        NamedChain::Polygon,
        NamedChain::PolygonMumbai,
        NamedChain::BaseSepolia,
        NamedChain::ArbitrumSepolia,
        NamedChain::OptimismSepolia,
    ];
}

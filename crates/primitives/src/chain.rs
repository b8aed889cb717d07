//! Chain extensions
use crate::constants::supported_chains::CHAINS;
use alloy_chains::Chain;
use ethers::types::H256;

pub trait ChainExt {
    /// Whether smart accounts are known to be deployed on the chain
    fn is_supported(&self) -> bool;

    /// Link to the transaction on the chain's block explorer (if the chain has one)
    fn tx_explorer_url(&self, tx_hash: &H256) -> Option<String>;
}

impl ChainExt for Chain {
    fn is_supported(&self) -> bool {
        self.named().map_or(false, |named| CHAINS.contains(&named))
    }

    fn tx_explorer_url(&self, tx_hash: &H256) -> Option<String> {
        self.etherscan_urls()
            .map(|(_, base)| format!("{}/tx/{tx_hash:?}", base.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mumbai_explorer_link() {
        let chain = Chain::from_id(80_001);
        assert!(chain.is_supported());
        let tx_hash = H256::repeat_byte(0xab);
        assert_eq!(
            chain.tx_explorer_url(&tx_hash).unwrap(),
            format!("https://mumbai.polygonscan.com/tx/{tx_hash:?}")
        );
    }

    #[test]
    fn unknown_chain() {
        let chain = Chain::from_id(0xdead_beef_cafe);
        assert_eq!(chain.named(), None);
        assert!(!chain.is_supported());
        assert_eq!(chain.tx_explorer_url(&H256::zero()), None);
    }
}

//! A `Wallet` is a wrapper around an ethers wallet owning (or co-signing for) a smart account
use crate::UserOperationHash;
use ethers::{
    prelude::k256::ecdsa::SigningKey,
    signers::{coins_bip39::English, MnemonicBuilder, Signer},
    types::{Address, Signature},
};

/// Wrapper around ethers wallet
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Signing key of the wallet
    pub signer: ethers::signers::Wallet<SigningKey>,
}

impl Wallet {
    /// Create a new wallet from a hex encoded private key (with or without `0x` prefix)
    ///
    /// # Arguments
    /// * `private_key` - The private key
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance
    pub fn from_private_key(private_key: &str, chain_id: u64) -> eyre::Result<Self> {
        let wallet = private_key
            .trim()
            .trim_start_matches("0x")
            .parse::<ethers::signers::Wallet<SigningKey>>()?;
        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Create a new wallet from the given mnemonic phrase (first account of the default
    /// derivation path)
    ///
    /// # Arguments
    /// * `phrase` - The mnemonic phrase
    /// * `chain_id` - The chain id of the blockchain network to be used
    ///
    /// # Returns
    /// * `Self` - A new `Wallet` instance
    pub fn from_phrase(phrase: &str, chain_id: u64) -> eyre::Result<Self> {
        let wallet = MnemonicBuilder::<English>::default()
            .phrase(phrase)
            .derivation_path("m/44'/60'/0'/0/0")?
            .build()?;
        Ok(Self { signer: wallet.with_chain_id(chain_id) })
    }

    /// Address of the signer
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Signs the user operation hash as an EIP-191 personal message over the 32 raw hash bytes
    ///
    /// # Arguments
    /// * `hash` - The [UserOperationHash](UserOperationHash) to be signed
    ///
    /// # Returns
    /// * `Signature` - 65-byte ECDSA signature
    pub async fn sign_user_operation_hash(
        &self,
        hash: &UserOperationHash,
    ) -> eyre::Result<Signature> {
        Ok(self.signer.sign_message(hash.as_bytes()).await?)
    }

    /// Signs an arbitrary message as an EIP-191 personal message
    pub async fn sign_message(&self, message: &[u8]) -> eyre::Result<Signature> {
        Ok(self.signer.sign_message(message).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::types::H256;

    // anvil's first development key
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn sign_hash_recovers_to_owner() -> eyre::Result<()> {
        let wallet = Wallet::from_private_key(KEY, 80_001)?;
        assert_eq!(
            wallet.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>()?
        );

        let hash = UserOperationHash::from(H256::repeat_byte(0x11));
        let sig = wallet.sign_user_operation_hash(&hash).await?;
        assert_eq!(sig.to_vec().len(), 65);
        sig.verify(hash.as_bytes(), wallet.address())?;
        Ok(())
    }

    #[test]
    fn phrase_wallet() -> eyre::Result<()> {
        let wallet = Wallet::from_phrase(
            "test test test test test test test test test test test junk",
            1337,
        )?;
        assert_eq!(
            wallet.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>()?
        );
        assert!(Wallet::from_private_key("not a key", 1).is_err());
        Ok(())
    }
}

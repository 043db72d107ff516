//! BIP32 address deriver
//!
//! Decodes the extended public key, derives the non-hardened child
//! `m/{account}/{index}` and encodes it for the requested derivation mode.
//! Coin-specific key prefixes (`Ltub`, `dgub`, ...) are normalized to the
//! standard xpub/tpub version bytes before decoding.

use bitcoin::bip32::{ChildNumber, Xpub};
use bitcoin::secp256k1::{Secp256k1, VerifyOnly};

use super::encoding;
use super::{Account, AddressDeriver};
use crate::currency::{Currency, DerivationMode};
use crate::error::{Error, Result};

/// Serialized extended key length (without checksum)
const EXTENDED_KEY_LEN: usize = 78;

const XPUB_VERSION: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];
const TPUB_VERSION: [u8; 4] = [0x04, 0x35, 0x87, 0xCF];

/// Production deriver backed by the `bitcoin` crate
pub struct Bip32Deriver {
    secp: Secp256k1<VerifyOnly>,
}

impl Bip32Deriver {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }

    /// Decode a key of any supported prefix into a BIP32 extended public key
    pub fn decode_key(&self, currency: &Currency, key: &str) -> Result<Xpub> {
        let mut data = bitcoin::base58::decode_check(key)
            .map_err(|e| Error::Derivation(format!("invalid extended key encoding: {}", e)))?;

        if data.len() != EXTENDED_KEY_LEN {
            return Err(Error::Derivation(format!(
                "extended key is {} bytes, expected {}",
                data.len(),
                EXTENDED_KEY_LEN
            )));
        }

        let version = if currency.network.is_testnet() {
            TPUB_VERSION
        } else {
            XPUB_VERSION
        };
        data[..4].copy_from_slice(&version);

        Xpub::decode(&data).map_err(|e| Error::Derivation(format!("invalid extended key: {}", e)))
    }
}

impl Default for Bip32Deriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressDeriver for Bip32Deriver {
    fn derive(
        &self,
        currency: &Currency,
        key: &str,
        mode: DerivationMode,
        account: Account,
        index: u32,
    ) -> Result<String> {
        let xpub = self.decode_key(currency, key)?;

        let path = [
            ChildNumber::from_normal_idx(account.index())
                .map_err(|e| Error::Derivation(e.to_string()))?,
            ChildNumber::from_normal_idx(index).map_err(|e| Error::Derivation(e.to_string()))?,
        ];

        let child = xpub
            .derive_pub(&self.secp, &path)
            .map_err(|e| Error::Derivation(format!("m/{}/{}: {}", account.index(), index, e)))?;

        let pubkey = child.public_key.serialize();
        let params = currency.address_params();

        match mode {
            DerivationMode::Legacy | DerivationMode::BitcoinCash | DerivationMode::Dogecoin => {
                Ok(encoding::p2pkh(&pubkey, &params))
            }
            DerivationMode::SegWit => Ok(encoding::p2sh_p2wpkh(&pubkey, &params)),
            DerivationMode::NativeSegWit => encoding::p2wpkh(&pubkey, &params),
        }
    }
}

//! Address encodings for Bitcoin-family chains

use bitcoin::bech32::{segwit, Hrp};
use bitcoin::hashes::{hash160, Hash};

use crate::currency::AddressParams;
use crate::error::{Error, Result};

/// Pay-to-pubkey-hash: base58check(version || hash160(pubkey))
pub fn p2pkh(pubkey: &[u8], params: &AddressParams) -> String {
    let hash = hash160::Hash::hash(pubkey).to_byte_array();
    base58_with_version(params.p2pkh, &hash)
}

/// Pay-to-witness-pubkey-hash nested in pay-to-script-hash
pub fn p2sh_p2wpkh(pubkey: &[u8], params: &AddressParams) -> String {
    let key_hash = hash160::Hash::hash(pubkey).to_byte_array();

    // redeem script: OP_0 PUSH20 <key hash>
    let mut redeem_script = Vec::with_capacity(22);
    redeem_script.push(0x00);
    redeem_script.push(0x14);
    redeem_script.extend_from_slice(&key_hash);

    let script_hash = hash160::Hash::hash(&redeem_script).to_byte_array();
    base58_with_version(params.p2sh, &script_hash)
}

/// Native segwit v0 pay-to-witness-pubkey-hash (bech32)
pub fn p2wpkh(pubkey: &[u8], params: &AddressParams) -> Result<String> {
    let hrp = params
        .bech32_hrp
        .ok_or_else(|| Error::Derivation("chain has no native segwit encoding".to_string()))?;
    let hrp = Hrp::parse(hrp).map_err(|e| Error::Derivation(format!("invalid hrp {}: {}", hrp, e)))?;

    let key_hash = hash160::Hash::hash(pubkey).to_byte_array();

    segwit::encode_v0(hrp, &key_hash).map_err(|e| Error::Derivation(e.to_string()))
}

fn base58_with_version(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(version);
    data.extend_from_slice(payload);
    bitcoin::base58::encode_check(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{CurrencyKind, Network};
    use crate::currency::registry::address_params;

    // Compressed generator point (private key = 1)
    const G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    fn pubkey() -> Vec<u8> {
        (0..G.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&G[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_bitcoin_p2pkh() {
        let params = address_params(CurrencyKind::Bitcoin, Network::Mainnet);
        assert_eq!(
            p2pkh(&pubkey(), &params),
            "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"
        );
    }

    #[test]
    fn test_bitcoin_p2wpkh() {
        let params = address_params(CurrencyKind::Bitcoin, Network::Mainnet);
        assert_eq!(
            p2wpkh(&pubkey(), &params).unwrap(),
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        );
    }

    #[test]
    fn test_bitcoin_p2sh_p2wpkh() {
        let params = address_params(CurrencyKind::Bitcoin, Network::Mainnet);
        let address = p2sh_p2wpkh(&pubkey(), &params);
        assert!(address.starts_with('3'));
    }

    #[test]
    fn test_dogecoin_has_no_bech32() {
        let params = address_params(CurrencyKind::Dogecoin, Network::Mainnet);
        assert!(p2wpkh(&pubkey(), &params).is_err());
        assert!(p2pkh(&pubkey(), &params).starts_with('D'));
    }
}

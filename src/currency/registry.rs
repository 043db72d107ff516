//! Static currency parameters

use super::{CurrencyKind, DerivationMode, Network};

/// Bitcoin-family coins all use 8 decimal places
const SATOSHI_PRECISION: u64 = 100_000_000;

const BITCOIN_MODES: &[DerivationMode] = &[
    DerivationMode::Legacy,
    DerivationMode::SegWit,
    DerivationMode::NativeSegWit,
];

const LITECOIN_MODES: &[DerivationMode] = BITCOIN_MODES;

const BITCOIN_CASH_MODES: &[DerivationMode] = &[DerivationMode::BitcoinCash];

const DOGECOIN_MODES: &[DerivationMode] = &[DerivationMode::Dogecoin];

/// Address encoding parameters for one currency/network pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressParams {
    /// Base58 version byte for pay-to-pubkey-hash
    pub p2pkh: u8,
    /// Base58 version byte for pay-to-script-hash
    pub p2sh: u8,
    /// Bech32 human-readable part, if the chain has native segwit
    pub bech32_hrp: Option<&'static str>,
}

pub fn precision(kind: CurrencyKind) -> u64 {
    match kind {
        CurrencyKind::Bitcoin
        | CurrencyKind::BitcoinCash
        | CurrencyKind::Litecoin
        | CurrencyKind::Dogecoin => SATOSHI_PRECISION,
    }
}

pub fn derivation_modes(kind: CurrencyKind) -> &'static [DerivationMode] {
    match kind {
        CurrencyKind::Bitcoin => BITCOIN_MODES,
        CurrencyKind::Litecoin => LITECOIN_MODES,
        CurrencyKind::BitcoinCash => BITCOIN_CASH_MODES,
        CurrencyKind::Dogecoin => DOGECOIN_MODES,
    }
}

pub fn address_params(kind: CurrencyKind, network: Network) -> AddressParams {
    match (kind, network) {
        (CurrencyKind::Bitcoin, Network::Mainnet) => AddressParams {
            p2pkh: 0x00,
            p2sh: 0x05,
            bech32_hrp: Some("bc"),
        },
        (CurrencyKind::Bitcoin, Network::Testnet) => AddressParams {
            p2pkh: 0x6f,
            p2sh: 0xc4,
            bech32_hrp: Some("tb"),
        },
        (CurrencyKind::Litecoin, Network::Mainnet) => AddressParams {
            p2pkh: 0x30,
            p2sh: 0x32,
            bech32_hrp: Some("ltc"),
        },
        (CurrencyKind::Litecoin, Network::Testnet) => AddressParams {
            p2pkh: 0x6f,
            p2sh: 0x3a,
            bech32_hrp: Some("tltc"),
        },
        // Cash-address rendering is left to the caller; legacy form here
        (CurrencyKind::BitcoinCash, Network::Mainnet) => AddressParams {
            p2pkh: 0x00,
            p2sh: 0x05,
            bech32_hrp: None,
        },
        (CurrencyKind::BitcoinCash, Network::Testnet) => AddressParams {
            p2pkh: 0x6f,
            p2sh: 0xc4,
            bech32_hrp: None,
        },
        (CurrencyKind::Dogecoin, Network::Mainnet) => AddressParams {
            p2pkh: 0x1e,
            p2sh: 0x16,
            bech32_hrp: None,
        },
        (CurrencyKind::Dogecoin, Network::Testnet) => AddressParams {
            p2pkh: 0x71,
            p2sh: 0xc4,
            bech32_hrp: None,
        },
    }
}

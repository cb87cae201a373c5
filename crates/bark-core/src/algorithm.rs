//! Encrypted-push algorithms.
//!
//! An algorithm is three explicit facets: cipher family (always AES), key
//! size, and block mode. The wire identifier (`aes-128-cbc`, ...) is only
//! used for display and parsing; nothing is derived from its shape.

use std::fmt;
use std::str::FromStr;

/// AES block size in bytes. Also the required IV length.
pub const AES_BLOCK_LEN: usize = 16;

/// Cipher family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CipherFamily {
    /// AES (Rijndael with a 128-bit block).
    Aes,
}

/// AES key size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key.
    Aes128,
    /// 192-bit key.
    Aes192,
    /// 256-bit key.
    Aes256,
}

impl KeySize {
    /// Key size in bits.
    pub fn bits(self) -> usize {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    /// Key size in bytes.
    pub fn bytes(self) -> usize {
        self.bits() / 8
    }
}

/// Block cipher mode of operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockMode {
    /// Cipher block chaining; uses the IV.
    Cbc,
    /// Electronic codebook; no IV.
    Ecb,
}

impl BlockMode {
    /// Whether the mode consumes an IV.
    pub fn uses_iv(self) -> bool {
        matches!(self, Self::Cbc)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Cbc => "cbc",
            Self::Ecb => "ecb",
        }
    }
}

/// One of the six algorithms the server can decrypt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EncryptionAlgorithm {
    key_size: KeySize,
    mode: BlockMode,
}

impl EncryptionAlgorithm {
    /// AES-128 in CBC mode.
    pub const AES_128_CBC: Self = Self::new(KeySize::Aes128, BlockMode::Cbc);
    /// AES-192 in CBC mode.
    pub const AES_192_CBC: Self = Self::new(KeySize::Aes192, BlockMode::Cbc);
    /// AES-256 in CBC mode.
    pub const AES_256_CBC: Self = Self::new(KeySize::Aes256, BlockMode::Cbc);
    /// AES-128 in ECB mode.
    pub const AES_128_ECB: Self = Self::new(KeySize::Aes128, BlockMode::Ecb);
    /// AES-192 in ECB mode.
    pub const AES_192_ECB: Self = Self::new(KeySize::Aes192, BlockMode::Ecb);
    /// AES-256 in ECB mode.
    pub const AES_256_ECB: Self = Self::new(KeySize::Aes256, BlockMode::Ecb);

    /// All six algorithms.
    pub const ALL: [Self; 6] = [
        Self::AES_128_CBC,
        Self::AES_192_CBC,
        Self::AES_256_CBC,
        Self::AES_128_ECB,
        Self::AES_192_ECB,
        Self::AES_256_ECB,
    ];

    /// Combine a key size and a mode.
    pub const fn new(key_size: KeySize, mode: BlockMode) -> Self {
        Self { key_size, mode }
    }

    /// Cipher family.
    pub fn family(self) -> CipherFamily {
        CipherFamily::Aes
    }

    /// Key size.
    pub fn key_size(self) -> KeySize {
        self.key_size
    }

    /// Block mode.
    pub fn mode(self) -> BlockMode {
        self.mode
    }

    /// Required key length in bytes (16, 24 or 32).
    pub fn key_len_bytes(self) -> usize {
        self.key_size.bytes()
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aes-{}-{}", self.key_size.bits(), self.mode.as_str())
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.to_string() == wanted)
            .ok_or_else(|| format!("unknown encryption algorithm: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

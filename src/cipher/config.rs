//! Encryption simulation settings and their validation.

use super::CipherStrategy;
use crate::error::EncryptionConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionType {
    None,
    Aes,
    ChaCha20,
}

impl FromStr for EncryptionType {
    type Err = EncryptionConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" | "" => Ok(EncryptionType::None),
            "AES" => Ok(EncryptionType::Aes),
            "ChaCha20" => Ok(EncryptionType::ChaCha20),
            other => Err(EncryptionConfigError::UnsupportedType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AesMode {
    #[default]
    Cbc,
    Ctr,
    Gcm,
}

impl AesMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AesMode::Cbc => "CBC",
            AesMode::Ctr => "CTR",
            AesMode::Gcm => "GCM",
        }
    }
}

impl FromStr for AesMode {
    type Err = EncryptionConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CBC" | "" => Ok(AesMode::Cbc),
            "CTR" => Ok(AesMode::Ctr),
            "GCM" => Ok(AesMode::Gcm),
            other => Err(EncryptionConfigError::UnsupportedAesMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AesKeySize {
    Aes128,
    Aes192,
    #[default]
    Aes256,
}

impl AesKeySize {
    pub const fn bytes(self) -> usize {
        match self {
            AesKeySize::Aes128 => 16,
            AesKeySize::Aes192 => 24,
            AesKeySize::Aes256 => 32,
        }
    }

    pub const fn bits(self) -> usize {
        self.bytes() * 8
    }
}

impl TryFrom<u64> for AesKeySize {
    type Error = EncryptionConfigError;

    fn try_from(bytes: u64) -> Result<Self, Self::Error> {
        match bytes {
            16 => Ok(AesKeySize::Aes128),
            24 => Ok(AesKeySize::Aes192),
            // 0 is "unset"
            32 | 0 => Ok(AesKeySize::Aes256),
            other => Err(EncryptionConfigError::InvalidKeySize(other)),
        }
    }
}

impl fmt::Display for AesKeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// User-facing encryption surface. Kept loosely typed so that bad values
/// surface as `EncryptionConfigError` from [`EncryptionConfig::validate`]
/// instead of as JSON parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// "None" | "AES" | "ChaCha20"
    #[serde(rename = "Type", default = "default_type")]
    pub kind: String,
    /// Probability (0..=100) that a single value is transformed
    #[serde(rename = "Percentage", default)]
    pub percentage: i64,
    /// "CBC" | "CTR" | "GCM"; AES only, CBC when unset
    #[serde(rename = "AESMode", default, skip_serializing_if = "Option::is_none")]
    pub aes_mode: Option<String>,
    /// 16 | 24 | 32 bytes; AES only, 32 when unset
    #[serde(rename = "KeySize", default, skip_serializing_if = "Option::is_none")]
    pub key_size: Option<u64>,
}

fn default_type() -> String {
    "None".to_string()
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            kind: default_type(),
            percentage: 0,
            aes_mode: None,
            key_size: None,
        }
    }
}

impl EncryptionConfig {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn aes(mode: AesMode, key_size: AesKeySize, percentage: i64) -> Self {
        Self {
            kind: "AES".to_string(),
            percentage,
            aes_mode: Some(mode.as_str().to_string()),
            key_size: Some(key_size.bytes() as u64),
        }
    }

    pub fn chacha20(percentage: i64) -> Self {
        Self {
            kind: "ChaCha20".to_string(),
            percentage,
            aes_mode: None,
            key_size: None,
        }
    }

    /// Resolve the configured strategy and percentage, or report why the
    /// configuration cannot be used.
    pub fn validate(&self) -> Result<(CipherStrategy, u32), EncryptionConfigError> {
        let percentage = u32::try_from(self.percentage)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or(EncryptionConfigError::InvalidPercentage(self.percentage))?;
        Ok((self.strategy()?, percentage))
    }

    pub fn strategy(&self) -> Result<CipherStrategy, EncryptionConfigError> {
        match self.kind.parse::<EncryptionType>()? {
            EncryptionType::None => Ok(CipherStrategy::None),
            EncryptionType::ChaCha20 => Ok(CipherStrategy::ChaCha20Poly1305),
            EncryptionType::Aes => {
                let key_size = AesKeySize::try_from(self.key_size.unwrap_or(0))?;
                let mode = self.aes_mode.as_deref().unwrap_or_default().parse::<AesMode>()?;
                Ok(match mode {
                    AesMode::Cbc => CipherStrategy::AesCbc(key_size),
                    AesMode::Ctr => CipherStrategy::AesCtr(key_size),
                    AesMode::Gcm => CipherStrategy::AesGcm(key_size),
                })
            }
        }
    }
}

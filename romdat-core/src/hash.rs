use serde::{Deserialize, Serialize};

/// Literal hash value upstream directory scanning stores on empty-folder placeholders.
pub const PLACEHOLDER_HASH: &str = "null";

/// Hash algorithms a catalog entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    /// CRC-32 (SFV files, most listings)
    Crc32,
    /// MD5 (128-bit)
    Md5,
    /// SHA-1 (160-bit)
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashType {
    /// All algorithms in the order they appear on an entry.
    pub const ALL: [HashType; 6] = [
        Self::Crc32,
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Crc32 => "CRC-32",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Length of the lowercase hex digest.
    pub fn hex_len(&self) -> usize {
        match self {
            Self::Crc32 => 8,
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha384 => 96,
            Self::Sha512 => 128,
        }
    }

    /// Digest of the empty input, used for deliberately empty files.
    pub fn zero(&self) -> &'static str {
        match self {
            Self::Crc32 => "00000000",
            Self::Md5 => "d41d8cd98f00b204e9800998ecf8427e",
            Self::Sha1 => "da39a3ee5e6b4b0d3255bfef95601890afd80709",
            Self::Sha256 => "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            Self::Sha384 => {
                "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b"
            }
            Self::Sha512 => {
                "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
            }
        }
    }
}

/// Normalize a hash string to lowercase hex of the algorithm's exact length.
///
/// Surrounding whitespace and a `0x` prefix are dropped and short values are
/// left-padded with zeros (CRCs are often printed without leading zeros).
/// Returns an empty string when the input is empty, too long, or not hex.
pub fn clean_hash(value: &str, kind: HashType) -> String {
    let trimmed = value.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let len = kind.hex_len();
    if trimmed.is_empty() || trimmed.len() > len {
        return String::new();
    }
    if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return String::new();
    }
    format!("{:0>len$}", trimmed.to_ascii_lowercase())
}

/// Clean a hash and map the empty result to `None`.
pub fn clean_hash_opt(value: &str, kind: HashType) -> Option<String> {
    let cleaned = clean_hash(value, kind);
    if cleaned.is_empty() { None } else { Some(cleaned) }
}

/// The hash set carried by a Rom or Disk.
///
/// Disks never populate `crc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashes {
    pub crc: Option<String>,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
    pub sha384: Option<String>,
    pub sha512: Option<String>,
}

impl Hashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: HashType) -> Option<&str> {
        self.slot(kind).as_deref()
    }

    pub fn set(&mut self, kind: HashType, value: Option<String>) {
        *self.slot_mut(kind) = value;
    }

    pub fn with(mut self, kind: HashType, value: impl Into<String>) -> Self {
        self.set(kind, Some(value.into()));
        self
    }

    /// Whether the given hash is present and non-empty.
    pub fn has(&self, kind: HashType) -> bool {
        self.get(kind).is_some_and(|h| !h.is_empty())
    }

    pub fn has_any(&self) -> bool {
        HashType::ALL.iter().any(|&kind| self.has(kind))
    }

    /// True when at least one hash is present and every present hash is the
    /// digest of the empty input.
    pub fn has_zero_hash(&self) -> bool {
        let mut any = false;
        for kind in HashType::ALL {
            if let Some(value) = self.get(kind).filter(|h| !h.is_empty()) {
                if value != kind.zero() {
                    return false;
                }
                any = true;
            }
        }
        any
    }

    /// Fill CRC32, MD5 and SHA-1 with the empty-file digests and clear the rest.
    pub fn set_zero(&mut self) {
        *self = Self {
            crc: Some(HashType::Crc32.zero().to_string()),
            md5: Some(HashType::Md5.zero().to_string()),
            sha1: Some(HashType::Sha1.zero().to_string()),
            ..Self::default()
        };
    }

    fn slot(&self, kind: HashType) -> &Option<String> {
        match kind {
            HashType::Crc32 => &self.crc,
            HashType::Md5 => &self.md5,
            HashType::Sha1 => &self.sha1,
            HashType::Sha256 => &self.sha256,
            HashType::Sha384 => &self.sha384,
            HashType::Sha512 => &self.sha512,
        }
    }

    fn slot_mut(&mut self, kind: HashType) -> &mut Option<String> {
        match kind {
            HashType::Crc32 => &mut self.crc,
            HashType::Md5 => &mut self.md5,
            HashType::Sha1 => &mut self.sha1,
            HashType::Sha256 => &mut self.sha256,
            HashType::Sha384 => &mut self.sha384,
            HashType::Sha512 => &mut self.sha512,
        }
    }
}

#[cfg(test)]
#[path = "tests/hash_tests.rs"]
mod tests;

//! Streaming content hashers.
//!
//! # Overview
//!
//! The dedup engine does not care which digest it runs; it only needs a
//! [`ContentHasher`]: something that accepts byte chunks, yields a fixed-size
//! digest and can be reset for the next file. [`Hasher`] implements it for
//! every [`HashAlgorithm`] selectable from the command line.
//!
//! # Example
//!
//! ```
//! use rmdupes::scanner::hasher::{hash_reader, to_hex, HashAlgorithm, Hasher};
//!
//! let mut hasher = Hasher::new(HashAlgorithm::Sha256);
//! let mut buffer = vec![0u8; 4096];
//! let (digest, bytes) = hash_reader(&mut hasher, &mut &b"abc"[..], &mut buffer).unwrap();
//! assert_eq!(bytes, 3);
//! assert!(to_hex(&digest).starts_with("ba7816bf"));
//! ```

use std::fmt;
use std::io::{self, ErrorKind, Read};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::digest::DynDigest;

/// Default read buffer size for streaming file content.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Raw digest bytes identifying a file's content.
pub type Fingerprint = Box<[u8]>;

/// A streaming hash primitive, reusable across files via reset.
pub trait ContentHasher {
    /// Feed a chunk of content.
    fn update(&mut self, data: &[u8]);

    /// Produce the digest of everything fed since the last reset, then reset.
    fn finalize_reset(&mut self) -> Fingerprint;

    /// Discard any buffered state.
    fn reset(&mut self);

    /// Digest length in bytes.
    fn output_size(&self) -> usize;
}

/// Digest algorithms available for content fingerprinting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit)
    Md5,
    /// SHA-1 (160-bit)
    Sha1,
    /// SHA-256 (256-bit)
    Sha256,
    /// SHA-512 (512-bit)
    #[default]
    Sha512,
    /// BLAKE3 (256-bit)
    Blake3,
}

impl HashAlgorithm {
    /// All supported algorithms, in display order.
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Blake3,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hash: {0}; try these: md5, sha1, sha256, sha512, blake3")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == lowered)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

enum Inner {
    Digest(Box<dyn DynDigest + Send>),
    Blake3(Box<blake3::Hasher>),
}

/// [`ContentHasher`] backed by one of the [`HashAlgorithm`]s.
pub struct Hasher {
    algorithm: HashAlgorithm,
    inner: Inner,
}

impl Hasher {
    /// Create a fresh hasher for `algorithm`.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let inner = match algorithm {
            HashAlgorithm::Md5 => Inner::Digest(Box::new(md5::Md5::default())),
            HashAlgorithm::Sha1 => Inner::Digest(Box::new(sha1::Sha1::default())),
            HashAlgorithm::Sha256 => Inner::Digest(Box::new(sha2::Sha256::default())),
            HashAlgorithm::Sha512 => Inner::Digest(Box::new(sha2::Sha512::default())),
            HashAlgorithm::Blake3 => Inner::Blake3(Box::new(blake3::Hasher::new())),
        };
        Self { algorithm, inner }
    }

    /// The algorithm this hasher computes.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new(HashAlgorithm::default())
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl ContentHasher for Hasher {
    fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            Inner::Digest(d) => d.update(data),
            Inner::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize_reset(&mut self) -> Fingerprint {
        match &mut self.inner {
            Inner::Digest(d) => d.finalize_reset(),
            Inner::Blake3(h) => {
                let digest: Fingerprint = h.finalize().as_bytes().as_slice().into();
                h.reset();
                digest
            }
        }
    }

    fn reset(&mut self) {
        match &mut self.inner {
            Inner::Digest(d) => d.reset(),
            Inner::Blake3(h) => {
                h.reset();
            }
        }
    }

    fn output_size(&self) -> usize {
        match &self.inner {
            Inner::Digest(d) => d.output_size(),
            Inner::Blake3(_) => blake3::OUT_LEN,
        }
    }
}

/// Stream `reader` to exhaustion through `hasher`.
///
/// The hasher is reset first, so leftover state from an aborted previous
/// file never leaks into this digest. `buffer` is reused across calls.
///
/// Returns the digest and the number of bytes read.
///
/// # Errors
///
/// Returns any read error other than `Interrupted`, which is retried.
pub fn hash_reader<H, R>(
    hasher: &mut H,
    reader: &mut R,
    buffer: &mut [u8],
) -> io::Result<(Fingerprint, u64)>
where
    H: ContentHasher + ?Sized,
    R: Read + ?Sized,
{
    hasher.reset();
    let mut total = 0u64;
    loop {
        let n = match reader.read(buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..n]);
        total += n as u64;
    }
    Ok((hasher.finalize_reset(), total))
}

/// Render digest bytes as lowercase hex.
#[must_use]
pub fn to_hex(digest: &[u8]) -> String {
    use fmt::Write;

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

//! Streaming asset downloads.

use std::fmt;

use bytes::{Bytes, BytesMut};
use codeartifact_model::{AssetSummary, GetPackageVersionAssetResult, HashAlgorithm};
use futures::StreamExt;
use sha2::{Digest, Sha256, Sha512};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ClientError;
use crate::transport::BodyStream;

/// Header carrying the asset name.
pub const HEADER_ASSET_NAME: &str = "x-assetname";
/// Header carrying the package version.
pub const HEADER_PACKAGE_VERSION: &str = "x-packageversion";
/// Header carrying the package version revision.
pub const HEADER_PACKAGE_VERSION_REVISION: &str = "x-packageversionrevision";

enum Hasher {
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Hasher {
    fn for_algorithm(algorithm: HashAlgorithm) -> Option<Self> {
        match algorithm {
            HashAlgorithm::Sha256 => Some(Self::Sha256(Sha256::new())),
            HashAlgorithm::Sha512 => Some(Self::Sha512(Sha512::new())),
            HashAlgorithm::Md5 | HashAlgorithm::Sha1 => None,
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(chunk),
            Self::Sha512(h) => h.update(chunk),
        }
    }

    fn finalize(self) -> String {
        match self {
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

struct Expected {
    algorithm: HashAlgorithm,
    digest: String,
    hasher: Hasher,
}

/// The payload of a `GetPackageVersionAsset` call.
///
/// The content can be consumed once, either chunk by chunk or all at once.
/// Dropping it releases the underlying connection.
pub struct AssetContent {
    metadata: GetPackageVersionAssetResult,
    body: BodyStream,
    expected: Option<Expected>,
    finished: bool,
}

impl AssetContent {
    pub(crate) fn new(metadata: GetPackageVersionAssetResult, body: BodyStream) -> Self {
        Self {
            metadata,
            body,
            expected: None,
            finished: false,
        }
    }

    /// Returns the metadata sent alongside the payload.
    #[must_use]
    pub const fn metadata(&self) -> &GetPackageVersionAssetResult {
        &self.metadata
    }

    /// Verifies the payload against `digest` once fully read.
    ///
    /// # Errors
    ///
    /// Returns an error for algorithms other than SHA-256 and SHA-512.
    pub fn expect_digest(
        mut self,
        algorithm: HashAlgorithm,
        digest: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let hasher = Hasher::for_algorithm(algorithm).ok_or_else(|| ClientError::Config {
            message: format!("{algorithm} digests are not verified"),
        })?;
        self.expected = Some(Expected {
            algorithm,
            digest: digest.into().to_ascii_lowercase(),
            hasher,
        });
        Ok(self)
    }

    /// Verifies the payload against the strongest supported digest listed
    /// in `summary`. Leaves the content unverified if none is listed.
    #[must_use]
    pub fn expect_summary(mut self, summary: &AssetSummary) -> Self {
        let strongest = [HashAlgorithm::Sha512, HashAlgorithm::Sha256]
            .into_iter()
            .find_map(|algorithm| {
                let digest = summary.hash(algorithm)?;
                let hasher = Hasher::for_algorithm(algorithm)?;
                Some(Expected {
                    algorithm,
                    digest: digest.to_ascii_lowercase(),
                    hasher,
                })
            });
        if strongest.is_some() {
            self.expected = strongest;
        }
        self
    }

    /// Returns the next chunk, or `None` once the payload is exhausted.
    ///
    /// When a digest is expected, the end of the payload is reported as a
    /// [`ClientError::ChecksumMismatch`] if the content does not match.
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes, ClientError>> {
        if self.finished {
            return None;
        }
        match self.body.next().await {
            Some(Ok(chunk)) => {
                if let Some(expected) = self.expected.as_mut() {
                    expected.hasher.update(&chunk);
                }
                Some(Ok(chunk))
            }
            Some(Err(e)) => {
                self.finished = true;
                Some(Err(e))
            }
            None => {
                self.finished = true;
                self.verify().err().map(Err)
            }
        }
    }

    /// Reads the whole payload into memory.
    ///
    /// # Errors
    ///
    /// Returns a transport error or a digest mismatch.
    pub async fn bytes(mut self) -> Result<Bytes, ClientError> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = self.next_chunk().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }

    /// Streams the payload into `writer` and returns the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns a transport error, a write error or a digest mismatch. On a
    /// mismatch the bytes have already been written.
    pub async fn write_to<W>(mut self, writer: &mut W) -> Result<u64, ClientError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut written = 0_u64;
        while let Some(chunk) = self.next_chunk().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }

    fn verify(&mut self) -> Result<(), ClientError> {
        let Some(expected) = self.expected.take() else {
            return Ok(());
        };
        let actual = expected.hasher.finalize();
        if actual == expected.digest {
            tracing::debug!(algorithm = %expected.algorithm, "Asset digest verified");
            Ok(())
        } else {
            Err(ClientError::ChecksumMismatch {
                asset: self.metadata.asset_name.clone().unwrap_or_default(),
                expected: expected.digest,
                actual,
            })
        }
    }
}

impl fmt::Debug for AssetContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetContent")
            .field("metadata", &self.metadata)
            .field("verified_with", &self.expected.as_ref().map(|e| e.algorithm))
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn content(chunks: &[&'static [u8]]) -> AssetContent {
        let chunks: Vec<Result<Bytes, ClientError>> =
            chunks.iter().map(|c| Ok(Bytes::from_static(*c))).collect();
        AssetContent::new(
            GetPackageVersionAssetResult::default().with_asset_name("lodash-4.17.20.tgz"),
            stream::iter(chunks).boxed(),
        )
    }

    fn sha256_hex(data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }

    #[tokio::test]
    async fn test_bytes_concatenates_chunks() {
        let body = content(&[b"hello ", b"world"]).bytes().await.unwrap();
        assert_eq!(body, Bytes::from_static(b"hello world"));
    }

    #[tokio::test]
    async fn test_matching_digest_passes() {
        let body = content(&[b"hello ", b"world"])
            .expect_digest(HashAlgorithm::Sha256, sha256_hex(b"hello world").to_uppercase())
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(body.len(), 11);
    }

    #[tokio::test]
    async fn test_mismatched_digest_fails_at_end() {
        let mut asset = content(&[b"hello"])
            .expect_digest(HashAlgorithm::Sha256, sha256_hex(b"other"))
            .unwrap();

        assert!(asset.next_chunk().await.unwrap().is_ok());
        let err = asset.next_chunk().await.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::ChecksumMismatch { ref asset, .. } if asset == "lodash-4.17.20.tgz"));
        assert!(asset.next_chunk().await.is_none());
    }

    #[test]
    fn test_md5_is_not_verified() {
        let err = content(&[]).expect_digest(HashAlgorithm::Md5, "00").unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }

    #[tokio::test]
    async fn test_expect_summary_prefers_sha512() {
        let mut summary = AssetSummary::default();
        summary.add_hash(HashAlgorithm::Sha256, sha256_hex(b"data")).unwrap();
        summary
            .add_hash(HashAlgorithm::Sha512, hex::encode(Sha512::digest(b"data")))
            .unwrap();

        let asset = content(&[b"data"]).expect_summary(&summary);
        assert!(format!("{asset:?}").contains("Sha512"));
        assert_eq!(asset.bytes().await.unwrap(), Bytes::from_static(b"data"));
    }

    #[tokio::test]
    async fn test_write_to_counts_bytes() {
        let mut sink = Vec::new();
        let written = content(&[b"abc", b"de"]).write_to(&mut sink).await.unwrap();
        assert_eq!(written, 5);
        assert_eq!(sink, b"abcde");
    }
}

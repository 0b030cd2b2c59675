//! Run Manifests - JSON Summaries with Content Hashes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::embed::EmbedArtifact;
use crate::rules::DateActivation;
use crate::ENGINE_VERSION;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    result.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Summary of one byte-export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedManifest {
    pub id: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub symbol: String,
    pub byte_count: usize,
    pub size: [u32; 2],
    /// SHA-256 of the text written to the output file.
    pub content_hash: String,
}

impl EmbedManifest {
    pub fn for_artifact(input: &Path, artifact: &EmbedArtifact) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            input: input.to_path_buf(),
            output: artifact.output.clone(),
            symbol: artifact.symbol.clone(),
            byte_count: artifact.byte_count,
            size: artifact.size,
            content_hash: sha256_hex(artifact.rendered.as_bytes()),
        }
    }
}

/// Summary of one rule-evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationManifest {
    pub id: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub rules_file: PathBuf,
    pub dates_file: PathBuf,
    pub results: Vec<DateActivation>,
}

impl EvaluationManifest {
    pub fn new(rules_file: &Path, dates_file: &Path, results: Vec<DateActivation>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            rules_file: rules_file.to_path_buf(),
            dates_file: dates_file.to_path_buf(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let data = b"test data";
        let h1 = sha256_hex(data);
        let h2 = sha256_hex(data);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_hash_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_manifest_hashes_rendered_text() {
        let artifact = EmbedArtifact {
            output: PathBuf::from("icon.embed"),
            symbol: "g_Icon".to_string(),
            byte_count: 1,
            size: [1, 1],
            rendered: "const uint8_t g_Icon[] = \n{\n0xff\n};".to_string(),
        };

        let manifest = EmbedManifest::for_artifact(Path::new("icon.png"), &artifact);
        assert_eq!(
            manifest.content_hash,
            sha256_hex(artifact.rendered.as_bytes())
        );
        assert!(!manifest.id.is_empty());
    }
}

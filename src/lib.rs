//! Bytesmith Core - Asset Embedding Toolkit
//!
//! Two independent tools behind one CLI:
//! 1. Byte Exporter: image -> embeddable `uint8_t` array literal
//! 2. Rule Evaluator: dated +/- rule log -> active set per query date

pub mod dates;
pub mod embed;
pub mod manifest;
pub mod rules;

pub use dates::{DateParseError, RuleDate};
pub use embed::{export_image, render_array_literal, EmbedArtifact, ExportError, ExportRequest};
pub use manifest::{sha256_hex, EmbedManifest, EvaluationManifest};
pub use rules::{DateActivation, RuleEntry, RuleLog, RuleLogError, SignedToken};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

//! Runtime server configuration.
//!
//! Deserialised once at process entry from `config.toml` (plus `WETALK_*`
//! environment overrides) and passed by injection into the store and the
//! verifier — core logic never reads ambient global state.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub auth:       AuthSettings,
}

/// Which token-verification scheme this process trusts. Exactly one is
/// active; the two schemes are never live at once.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum AuthSettings {
  /// Tokens signed with a shared secret (HS256).
  Local { secret: String },
  /// Tokens issued by a federated identity provider, verified against its
  /// JWKS document (RS256).
  Federated { issuer: String, jwks_path: PathBuf },
}

//! certvalet: a local trusted CA for development sites.
//!
//! This library manages one self-signed root Certificate Authority and issues
//! per-domain leaf TLS certificates signed by it, so locally served sites can
//! be reached over HTTPS without browser warnings. It is pure orchestration:
//! the actual cryptography is delegated to a [`crypto::CryptoBackend`]
//! (shipped: the `openssl` binary) and all disk access goes through a
//! [`storage::Filesystem`] collaborator.
//!
//! # Layout
//!
//! All artifacts live below an explicit installation home:
//!
//! ```text
//! {home}/CA/valet.key            root private key (RSA 4096)
//! {home}/CA/valet-ca.crt         self-signed root certificate
//! {home}/CA/valet-ca.srl         serial store, maintained by the backend
//! {home}/Certificates/{domain}.{key,csr,crt,conf}
//! ```
//!
//! The root is created lazily on first issuance and never regenerated once
//! its certificate file exists; regenerating it would break the trust chain
//! of every certificate already issued.
//!
//! # Example
//!
//! ```rust,no_run
//! use certvalet::cert::issuer::CertificateIssuer;
//! use certvalet::config::{Config, Paths};
//! use certvalet::crypto::openssl_cli::OpensslCli;
//! use certvalet::storage::fs::DiskFilesystem;
//! use std::sync::Arc;
//!
//! fn example() -> certvalet::error::Result<()> {
//!     let paths = Paths::new("/home/dev/.certvalet");
//!     let fs = Arc::new(DiskFilesystem::new());
//!     let config = Config::load(fs.as_ref(), &paths)?;
//!     let issuer =
//!         CertificateIssuer::new(paths, &config, Arc::new(OpensslCli::new()), fs, None)?;
//!     let issued = issuer.issue_certificate("example.test")?;
//!     println!("issued {}", issued.cert_path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! Everything is synchronous and blocking. CA bootstrap is mutex-guarded
//! within one process; issuance for the same domain is not, and overlapping
//! calls for one domain can interleave writes. Cross-process callers must
//! serialize externally.

pub mod cert;
pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use cert::authority::CertificateAuthority;
pub use cert::issuer::{CertificateIssuer, IssuedCertificate};
pub use config::{Config, Paths};
pub use error::{CertValetError, Result};

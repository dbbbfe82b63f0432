//! Crypto backend collaborator.
//!
//! All key generation and signing is delegated to an external toolkit behind
//! the [`CryptoBackend`] trait; [`openssl_cli::OpensslCli`] is the shipped
//! implementation that runs the `openssl` binary. The core never inspects or
//! validates backend output beyond its exit status.

pub mod openssl_cli;

use crate::cert::subject::Subject;
use crate::error::Result;
use std::path::Path;

/// The four primitive crypto operations the certificate lifecycle needs.
///
/// Every operation writes a PEM-encoded artifact to the given output path and
/// blocks until the backend finishes. Implementations must report failure
/// through `Err`; the core has no other way to notice a bad artifact.
pub trait CryptoBackend: Send + Sync {
    /// Write a PEM-encoded RSA private key of the given strength.
    fn generate_rsa_key(&self, path: &Path, bits: u32) -> Result<()>;

    /// Write a self-signed X.509 certificate for the key, SHA-256 signed.
    fn generate_self_signed_cert(
        &self,
        key_path: &Path,
        out_path: &Path,
        subject: &Subject,
        days: u32,
    ) -> Result<()>;

    /// Write a certificate signing request derived from the key.
    fn generate_csr(&self, key_path: &Path, subject: &Subject, out_path: &Path) -> Result<()>;

    /// Sign a CSR with the CA key and certificate, applying the X.509v3
    /// extensions from `ext_file_path`. Creates or increments the CA serial
    /// store next to the CA certificate as a side effect.
    #[allow(clippy::too_many_arguments)]
    fn sign_csr(
        &self,
        csr_path: &Path,
        ca_cert_path: &Path,
        ca_key_path: &Path,
        out_path: &Path,
        ext_file_path: &Path,
        days: u32,
    ) -> Result<()>;
}

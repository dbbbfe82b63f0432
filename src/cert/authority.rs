//! Root CA bootstrap.
//!
//! The authority guarantees that a root key and a self-signed root
//! certificate exist before any leaf issuance, and never overwrites an
//! existing root: regenerating it would orphan every leaf certificate
//! previously signed with it.

use crate::cert::subject::Subject;
use crate::config::Paths;
use crate::crypto::CryptoBackend;
use crate::error::Result;
use crate::storage::{Filesystem, Owner};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Strength of the root private key.
pub const ROOT_KEY_BITS: u32 = 4096;

/// Validity of the self-signed root certificate, in days.
pub const ROOT_VALIDITY_DAYS: u32 = 2048;

/// Owns root-key and root-certificate existence.
pub struct CertificateAuthority {
    paths: Paths,
    subject: Subject,
    backend: Arc<dyn CryptoBackend>,
    fs: Arc<dyn Filesystem>,
    owner: Option<Owner>,
    // Serializes first-time bootstrap within this process. Cross-process
    // callers must serialize externally.
    bootstrap: Mutex<()>,
}

impl CertificateAuthority {
    /// Create an authority over the given installation layout.
    pub fn new(
        paths: Paths,
        subject: Subject,
        backend: Arc<dyn CryptoBackend>,
        fs: Arc<dyn Filesystem>,
        owner: Option<Owner>,
    ) -> Self {
        Self {
            paths,
            subject,
            backend,
            fs,
            owner,
            bootstrap: Mutex::new(()),
        }
    }

    /// Ensure the root key and self-signed root certificate exist.
    ///
    /// The existence check is solely the presence of the root certificate
    /// file. When it is missing, a fresh 4096-bit RSA key is generated
    /// (overwriting any dangling key left by an earlier partial failure),
    /// its permissions are tightened, and the self-signed root is created
    /// from it. When the certificate is present this is a no-op, however
    /// often it is called.
    pub fn ensure_root_exists(&self) -> Result<()> {
        let _guard = self
            .bootstrap
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.fs.ensure_dir_exists(&self.paths.ca_dir(), self.owner)?;

        let cert_path = self.paths.ca_cert();
        if self.fs.exists(&cert_path) {
            debug!(cert = %cert_path.display(), "root certificate already present");
            return Ok(());
        }

        let key_path = self.paths.ca_key();
        info!(key = %key_path.display(), cert = %cert_path.display(), "generating root CA");

        self.backend.generate_rsa_key(&key_path, ROOT_KEY_BITS)?;
        self.fs.restrict_permissions(&key_path)?;
        self.backend.generate_self_signed_cert(
            &key_path,
            &cert_path,
            &self.subject,
            ROOT_VALIDITY_DAYS,
        )?;

        Ok(())
    }

    /// The installation layout this authority operates on.
    pub fn paths(&self) -> &Paths {
        &self.paths
    }
}

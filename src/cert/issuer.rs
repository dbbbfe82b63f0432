//! Per-domain leaf certificate issuance.
//!
//! Issuance is four sequential artifact-generation steps against the crypto
//! backend: extension config, leaf key, CSR, signed certificate. All four run
//! unconditionally on every call, so re-issuing a domain overwrites its whole
//! artifact set. When any step fails, the domain's artifacts are removed so a
//! mismatched key/cert pair is never left on disk.

use crate::cert::authority::CertificateAuthority;
use crate::cert::subject::Subject;
use crate::cert::template::ExtensionTemplate;
use crate::config::{Config, Paths};
use crate::crypto::CryptoBackend;
use crate::error::{CertValetError, Result};
use crate::storage::{Filesystem, Owner};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Strength of a leaf private key. Weaker than the root on purpose; leaves
/// are short-lived operationally and re-issued freely.
pub const LEAF_KEY_BITS: u32 = 2048;

/// Validity of a signed leaf certificate, in days.
pub const LEAF_VALIDITY_DAYS: u32 = 3650;

/// The artifact set produced for one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCertificate {
    /// The domain the artifacts are keyed by.
    pub domain: String,
    /// Rendered extension config
    pub conf_path: PathBuf,
    /// Leaf private key
    pub key_path: PathBuf,
    /// Certificate signing request
    pub csr_path: PathBuf,
    /// Signed leaf certificate
    pub cert_path: PathBuf,
}

impl IssuedCertificate {
    fn new(paths: &Paths, domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            conf_path: paths.domain_conf(domain),
            key_path: paths.domain_key(domain),
            csr_path: paths.domain_csr(domain),
            cert_path: paths.domain_crt(domain),
        }
    }

    fn all_paths(&self) -> [&PathBuf; 4] {
        [
            &self.conf_path,
            &self.key_path,
            &self.csr_path,
            &self.cert_path,
        ]
    }
}

/// Check that a domain string is usable as an artifact key.
///
/// Domains are interpolated into file paths and subject strings verbatim, so
/// anything that could escape the certificates directory is rejected: empty
/// strings, path separators, `..`, and control characters. Everything else
/// passes through untouched (no normalization, case preserved).
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(CertValetError::InvalidDomainError(
            "domain must not be empty".to_string(),
        ));
    }
    if domain.contains('/') || domain.contains('\\') {
        return Err(CertValetError::InvalidDomainError(format!(
            "domain must not contain path separators: {}",
            domain
        )));
    }
    if domain.contains("..") {
        return Err(CertValetError::InvalidDomainError(format!(
            "domain must not contain '..': {}",
            domain
        )));
    }
    if domain.chars().any(|c| c.is_control()) {
        return Err(CertValetError::InvalidDomainError(
            "domain must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

/// Issues leaf certificates signed by the root CA.
///
/// # Example
///
/// ```rust,no_run
/// use certvalet::cert::issuer::CertificateIssuer;
/// use certvalet::config::{Config, Paths};
/// use certvalet::crypto::openssl_cli::OpensslCli;
/// use certvalet::storage::fs::DiskFilesystem;
/// use std::sync::Arc;
///
/// # fn example() -> certvalet::error::Result<()> {
/// let paths = Paths::new("/home/dev/.certvalet");
/// let fs = Arc::new(DiskFilesystem::new());
/// let config = Config::load(fs.as_ref(), &paths)?;
/// let issuer = CertificateIssuer::new(paths, &config, Arc::new(OpensslCli::new()), fs, None)?;
///
/// let issued = issuer.issue_certificate("example.test")?;
/// println!("certificate at {}", issued.cert_path.display());
/// # Ok(())
/// # }
/// ```
pub struct CertificateIssuer {
    authority: CertificateAuthority,
    paths: Paths,
    template: ExtensionTemplate,
    leaf_subject: Subject,
    backend: Arc<dyn CryptoBackend>,
    fs: Arc<dyn Filesystem>,
    owner: Option<Owner>,
}

impl CertificateIssuer {
    /// Create an issuer over the given installation layout and configuration.
    pub fn new(
        paths: Paths,
        config: &Config,
        backend: Arc<dyn CryptoBackend>,
        fs: Arc<dyn Filesystem>,
        owner: Option<Owner>,
    ) -> Result<Self> {
        let template = match &config.template_file {
            Some(path) => ExtensionTemplate::from_file(fs.as_ref(), path)?,
            None => ExtensionTemplate::embedded(),
        };
        let authority = CertificateAuthority::new(
            paths.clone(),
            config.root_subject.clone(),
            backend.clone(),
            fs.clone(),
            owner,
        );

        Ok(Self {
            authority,
            paths,
            template,
            leaf_subject: config.leaf_subject.clone(),
            backend,
            fs,
            owner,
        })
    }

    /// The certificate authority backing this issuer.
    pub fn authority(&self) -> &CertificateAuthority {
        &self.authority
    }

    /// Issue (or re-issue) a leaf certificate for the domain.
    ///
    /// Ensures the root CA exists first, then runs the four generation steps
    /// in order. Concurrent calls for the same domain are unsafe; callers
    /// needing that must serialize per domain themselves.
    pub fn issue_certificate(&self, domain: &str) -> Result<IssuedCertificate> {
        validate_domain(domain)?;
        self.authority.ensure_root_exists()?;

        self.fs
            .ensure_dir_exists(&self.paths.certificates_dir(), self.owner)?;

        let issued = IssuedCertificate::new(&self.paths, domain);
        info!(domain = %domain, "issuing leaf certificate");

        match self.run_steps(domain, &issued) {
            Ok(()) => {
                debug!(domain = %domain, cert = %issued.cert_path.display(), "leaf issued");
                Ok(issued)
            }
            Err(e) => {
                self.remove_artifacts(&issued);
                Err(e)
            }
        }
    }

    fn run_steps(&self, domain: &str, issued: &IssuedCertificate) -> Result<()> {
        // Step 1: extension config with the domain substituted in.
        let conf = self.template.render(domain);
        self.fs
            .write_file_as_owner(&issued.conf_path, &conf, self.owner)?;

        // Step 2: fresh leaf key.
        self.backend
            .generate_rsa_key(&issued.key_path, LEAF_KEY_BITS)?;
        self.fs.restrict_permissions(&issued.key_path)?;

        // Step 3: CSR with CN set to the domain verbatim.
        let subject = self.leaf_subject.clone().with_common_name(domain);
        self.backend
            .generate_csr(&issued.key_path, &subject, &issued.csr_path)?;

        // Step 4: sign with the root, applying the extensions from step 1.
        self.backend.sign_csr(
            &issued.csr_path,
            &self.paths.ca_cert(),
            &self.paths.ca_key(),
            &issued.cert_path,
            &issued.conf_path,
            LEAF_VALIDITY_DAYS,
        )
    }

    fn remove_artifacts(&self, issued: &IssuedCertificate) {
        for path in issued.all_paths() {
            if self.fs.exists(path) {
                if let Err(e) = self.fs.remove_file(path) {
                    warn!(path = %path.display(), error = %e, "failed to remove partial artifact");
                }
            }
        }
    }
}

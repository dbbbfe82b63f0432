//! Installation paths and optional configuration.
//!
//! The installation home is an explicit value passed in at construction;
//! nothing in the library reads it from ambient global state. `Paths` derives
//! the fixed on-disk layout from that home, and `Config` is an optional JSON
//! file letting users override the placeholder subject profiles and the
//! extension template.

use crate::cert::subject::Subject;
use crate::error::Result;
use crate::storage::Filesystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Filename of the optional configuration file inside the home directory.
const CONFIG_FILENAME: &str = "config.json";

/// The fixed artifact layout below an installation home directory.
///
/// ```text
/// {home}/CA/valet.key
/// {home}/CA/valet-ca.crt
/// {home}/CA/valet-ca.srl
/// {home}/Certificates/{domain}.{key,csr,crt,conf}
/// ```
#[derive(Debug, Clone)]
pub struct Paths {
    home: PathBuf,
}

impl Paths {
    /// Create a path layout rooted at the given installation home.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// The installation home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Directory holding the root key and root certificate.
    pub fn ca_dir(&self) -> PathBuf {
        self.home.join("CA")
    }

    /// Directory holding per-domain artifacts.
    pub fn certificates_dir(&self) -> PathBuf {
        self.home.join("Certificates")
    }

    /// Path of the CA private key.
    pub fn ca_key(&self) -> PathBuf {
        self.ca_dir().join("valet.key")
    }

    /// Path of the self-signed root certificate.
    pub fn ca_cert(&self) -> PathBuf {
        self.ca_dir().join("valet-ca.crt")
    }

    /// Path of the serial-number store maintained by the backend during signing.
    pub fn ca_serial(&self) -> PathBuf {
        self.ca_dir().join("valet-ca.srl")
    }

    /// Path of a domain's leaf private key.
    pub fn domain_key(&self, domain: &str) -> PathBuf {
        self.certificates_dir().join(format!("{}.key", domain))
    }

    /// Path of a domain's certificate signing request.
    pub fn domain_csr(&self, domain: &str) -> PathBuf {
        self.certificates_dir().join(format!("{}.csr", domain))
    }

    /// Path of a domain's signed leaf certificate.
    pub fn domain_crt(&self, domain: &str) -> PathBuf {
        self.certificates_dir().join(format!("{}.crt", domain))
    }

    /// Path of a domain's rendered extension config.
    pub fn domain_conf(&self, domain: &str) -> PathBuf {
        self.certificates_dir().join(format!("{}.conf", domain))
    }

    /// Path of the optional configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.home.join(CONFIG_FILENAME)
    }
}

/// Optional user configuration loaded from `{home}/config.json`.
///
/// Every field has a default, so a missing file or an empty JSON object both
/// yield the stock placeholder identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Subject profile of the self-signed root certificate.
    pub root_subject: Subject,

    /// Subject profile applied to every leaf CSR. The common name is ignored
    /// here; it is always replaced with the requested domain at issuance.
    pub leaf_subject: Subject,

    /// Optional path of an extension template overriding the embedded stub.
    pub template_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_subject: Subject::root_default(),
            leaf_subject: Subject::leaf_default(),
            template_file: None,
        }
    }
}

impl Config {
    /// Load the configuration file, falling back to defaults when absent.
    ///
    /// A present-but-malformed file is an error; silently ignoring it would
    /// issue certificates with identities the user did not ask for.
    pub fn load(fs: &dyn Filesystem, paths: &Paths) -> Result<Self> {
        let config_path = paths.config_file();
        if !fs.exists(&config_path) {
            return Ok(Self::default());
        }

        let contents = fs.read_file(&config_path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

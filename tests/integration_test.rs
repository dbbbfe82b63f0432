//! Integration tests for the certvalet public API.
//!
//! The end-to-end lifecycle runs against a fake backend; the chain-validity
//! test runs the real `openssl` binary and is `#[ignore]`d by default since
//! it needs that binary on `PATH` (run with `cargo test -- --ignored`).

use certvalet::cert::subject::Subject;
use certvalet::config::{Config, Paths};
use certvalet::crypto::openssl_cli::OpensslCli;
use certvalet::crypto::CryptoBackend;
use certvalet::error::Result;
use certvalet::storage::fs::DiskFilesystem;
use certvalet::CertificateIssuer;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

/// Minimal working backend writing marker artifacts.
struct MarkerBackend;

impl CryptoBackend for MarkerBackend {
    fn generate_rsa_key(&self, path: &Path, bits: u32) -> Result<()> {
        std::fs::write(path, format!("KEY bits={} at={}", bits, path.display()))?;
        Ok(())
    }

    fn generate_self_signed_cert(
        &self,
        _key_path: &Path,
        out_path: &Path,
        subject: &Subject,
        days: u32,
    ) -> Result<()> {
        std::fs::write(out_path, format!("ROOT {} days={}", subject.to_subj_arg(), days))?;
        Ok(())
    }

    fn generate_csr(&self, _key_path: &Path, subject: &Subject, out_path: &Path) -> Result<()> {
        std::fs::write(out_path, format!("CSR {}", subject.to_subj_arg()))?;
        Ok(())
    }

    fn sign_csr(
        &self,
        csr_path: &Path,
        ca_cert_path: &Path,
        _ca_key_path: &Path,
        out_path: &Path,
        _ext_file_path: &Path,
        days: u32,
    ) -> Result<()> {
        let csr = std::fs::read_to_string(csr_path)?;
        let root = std::fs::read_to_string(ca_cert_path)?;
        std::fs::write(out_path, format!("CRT days={} csr=[{}] root=[{}]", days, csr, root))?;
        Ok(())
    }
}

fn make_issuer(dir: &TempDir, backend: Arc<dyn CryptoBackend>) -> CertificateIssuer {
    let paths = Paths::new(dir.path());
    let fs = Arc::new(DiskFilesystem::new());
    let config = Config::load(fs.as_ref(), &paths).unwrap();
    CertificateIssuer::new(paths, &config, backend, fs, None).unwrap()
}

#[test]
fn full_lifecycle_with_fake_backend() {
    let dir = TempDir::new().unwrap();
    let issuer = make_issuer(&dir, Arc::new(MarkerBackend));

    // Explicit init is idempotent with the lazy bootstrap inside issuance.
    issuer.authority().ensure_root_exists().unwrap();
    let root_before = std::fs::read_to_string(dir.path().join("CA/valet-ca.crt")).unwrap();

    let first = issuer.issue_certificate("one.test").unwrap();
    let second = issuer.issue_certificate("two.test").unwrap();

    // Root untouched by leaf issuance.
    let root_after = std::fs::read_to_string(dir.path().join("CA/valet-ca.crt")).unwrap();
    assert_eq!(root_before, root_after);

    // Both domains got their own artifact sets.
    assert!(first.cert_path.exists());
    assert!(second.cert_path.exists());
    assert_ne!(first.key_path, second.key_path);

    // Leaf certs chain back to the root (the fake embeds its signer).
    let crt = std::fs::read_to_string(&first.cert_path).unwrap();
    assert!(crt.contains("Not A Certificate Authority Limited"));
    assert!(crt.contains("/CN=one.test/"));
}

#[test]
fn config_file_overrides_leaf_identity() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"leaf_subject": {"country": "DE", "organization": "Example Dev"}}"#,
    )
    .unwrap();

    let issuer = make_issuer(&dir, Arc::new(MarkerBackend));
    let issued = issuer.issue_certificate("app.test").unwrap();

    let csr = std::fs::read_to_string(&issued.csr_path).unwrap();
    assert!(csr.contains("/C=DE/O=Example Dev/CN=app.test/"));
}

fn openssl_available() -> bool {
    Command::new("openssl")
        .arg("version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

#[test]
#[ignore = "requires the openssl binary"]
fn issued_leaf_verifies_against_the_root() {
    assert!(openssl_available(), "openssl binary not found on PATH");

    let dir = TempDir::new().unwrap();
    let issuer = make_issuer(&dir, Arc::new(OpensslCli::new()));

    let issued = issuer.issue_certificate("example.test").unwrap();
    let ca_cert = dir.path().join("CA/valet-ca.crt");

    // The leaf must verify with the root as the sole trust anchor.
    let verify = Command::new("openssl")
        .arg("verify")
        .arg("-CAfile")
        .arg(&ca_cert)
        .arg(&issued.cert_path)
        .output()
        .unwrap();
    assert!(
        verify.status.success(),
        "verify failed: {}",
        String::from_utf8_lossy(&verify.stderr)
    );

    // Signing created the serial store next to the CA certificate.
    assert!(Paths::new(dir.path()).ca_serial().exists());

    // The certificate carries the SAN from the rendered extension config.
    let text = Command::new("openssl")
        .arg("x509")
        .arg("-in")
        .arg(&issued.cert_path)
        .arg("-noout")
        .arg("-text")
        .output()
        .unwrap();
    let text = String::from_utf8_lossy(&text.stdout).into_owned();
    assert!(text.contains("DNS:example.test"));
    assert!(text.contains("DNS:*.example.test"));
}

#[test]
#[ignore = "requires the openssl binary"]
fn reissuance_replaces_key_material() {
    assert!(openssl_available(), "openssl binary not found on PATH");

    let dir = TempDir::new().unwrap();
    let issuer = make_issuer(&dir, Arc::new(OpensslCli::new()));

    let issued = issuer.issue_certificate("example.test").unwrap();
    let key_before = std::fs::read_to_string(&issued.key_path).unwrap();

    issuer.issue_certificate("example.test").unwrap();
    let key_after = std::fs::read_to_string(&issued.key_path).unwrap();

    assert_ne!(key_before, key_after);
}

//! Crypto backend that shells out to the `openssl` binary.
//!
//! Commands are invoked argv-style (never through a shell), stdout and stderr
//! are captured, and a non-zero exit or a spawn failure surfaces as a
//! [`CertValetError::BackendError`] carrying the rendered command line, the
//! exit status, and the trimmed stderr.

use crate::cert::subject::Subject;
use crate::crypto::CryptoBackend;
use crate::error::{CertValetError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Exit-status text used when the process could not be spawned at all.
const NOT_STARTED: &str = "not started";

/// A [`CryptoBackend`] backed by the `openssl` command-line tool.
#[derive(Debug, Clone)]
pub struct OpensslCli {
    program: String,
}

impl Default for OpensslCli {
    fn default() -> Self {
        Self::new()
    }
}

impl OpensslCli {
    /// Use the `openssl` binary from `PATH`.
    pub fn new() -> Self {
        Self::with_program("openssl")
    }

    /// Use a specific binary, e.g. a pinned build outside `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(command = %command, "running openssl");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| CertValetError::BackendError {
                command: command.clone(),
                status: NOT_STARTED.to_string(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CertValetError::BackendError {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

fn key_args(path: &Path, bits: u32) -> Vec<String> {
    vec![
        "genrsa".into(),
        "-out".into(),
        path.display().to_string(),
        bits.to_string(),
    ]
}

fn self_signed_args(key_path: &Path, out_path: &Path, subject: &Subject, days: u32) -> Vec<String> {
    vec![
        "req".into(),
        "-x509".into(),
        "-new".into(),
        "-nodes".into(),
        "-key".into(),
        key_path.display().to_string(),
        "-sha256".into(),
        "-days".into(),
        days.to_string(),
        "-out".into(),
        out_path.display().to_string(),
        "-subj".into(),
        subject.to_subj_arg(),
    ]
}

fn csr_args(key_path: &Path, subject: &Subject, out_path: &Path) -> Vec<String> {
    vec![
        "req".into(),
        "-new".into(),
        "-sha256".into(),
        "-nodes".into(),
        "-key".into(),
        key_path.display().to_string(),
        "-subj".into(),
        subject.to_subj_arg(),
        "-out".into(),
        out_path.display().to_string(),
    ]
}

fn sign_args(
    csr_path: &Path,
    ca_cert_path: &Path,
    ca_key_path: &Path,
    out_path: &Path,
    ext_file_path: &Path,
    days: u32,
) -> Vec<String> {
    vec![
        "x509".into(),
        "-req".into(),
        "-in".into(),
        csr_path.display().to_string(),
        "-CA".into(),
        ca_cert_path.display().to_string(),
        "-CAkey".into(),
        ca_key_path.display().to_string(),
        "-CAcreateserial".into(),
        "-out".into(),
        out_path.display().to_string(),
        "-days".into(),
        days.to_string(),
        "-sha256".into(),
        "-extfile".into(),
        ext_file_path.display().to_string(),
    ]
}

impl CryptoBackend for OpensslCli {
    fn generate_rsa_key(&self, path: &Path, bits: u32) -> Result<()> {
        self.run(&key_args(path, bits))
    }

    fn generate_self_signed_cert(
        &self,
        key_path: &Path,
        out_path: &Path,
        subject: &Subject,
        days: u32,
    ) -> Result<()> {
        self.run(&self_signed_args(key_path, out_path, subject, days))
    }

    fn generate_csr(&self, key_path: &Path, subject: &Subject, out_path: &Path) -> Result<()> {
        self.run(&csr_args(key_path, subject, out_path))
    }

    fn sign_csr(
        &self,
        csr_path: &Path,
        ca_cert_path: &Path,
        ca_key_path: &Path,
        out_path: &Path,
        ext_file_path: &Path,
        days: u32,
    ) -> Result<()> {
        self.run(&sign_args(
            csr_path,
            ca_cert_path,
            ca_key_path,
            out_path,
            ext_file_path,
            days,
        ))
    }
}

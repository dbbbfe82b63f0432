//! The X.509v3 extension config template.
//!
//! Leaf certificates get their extensions (notably the Subject Alternative
//! Name covering the domain and its wildcard) from an openssl config fragment.
//! The template carries a literal `VALET_DOMAIN` token that is substituted
//! with the requested domain at issuance time.

use crate::error::{CertValetError, Result};
use crate::storage::Filesystem;
use std::path::Path;

/// The placeholder token replaced with the domain on every render.
pub const DOMAIN_TOKEN: &str = "VALET_DOMAIN";

/// Embedded default template shipped with the crate.
const DEFAULT_TEMPLATE: &str = include_str!("../../stubs/openssl.conf");

/// An extension config template with a domain placeholder.
#[derive(Debug, Clone)]
pub struct ExtensionTemplate {
    contents: String,
}

impl ExtensionTemplate {
    /// The embedded default template (SAN for the domain plus its wildcard).
    pub fn embedded() -> Self {
        Self {
            contents: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Load an override template from disk.
    ///
    /// The file must contain the [`DOMAIN_TOKEN`] placeholder at least once;
    /// a template without it would issue certificates whose SAN never
    /// mentions the requested domain.
    pub fn from_file(fs: &dyn Filesystem, path: &Path) -> Result<Self> {
        let contents = fs.read_file(path)?;
        if !contents.contains(DOMAIN_TOKEN) {
            return Err(CertValetError::TemplateError(format!(
                "template {} does not contain the {} placeholder",
                path.display(),
                DOMAIN_TOKEN
            )));
        }
        Ok(Self { contents })
    }

    /// Substitute every occurrence of the placeholder with the domain.
    pub fn render(&self, domain: &str) -> String {
        self.contents.replace(DOMAIN_TOKEN, domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fs::DiskFilesystem;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_template_has_token() {
        let template = ExtensionTemplate::embedded();
        assert!(template.contents.contains(DOMAIN_TOKEN));
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let rendered = ExtensionTemplate::embedded().render("example.test");

        assert!(!rendered.contains(DOMAIN_TOKEN));
        assert!(rendered.contains("DNS.1 = example.test"));
        assert!(rendered.contains("DNS.2 = *.example.test"));
    }

    #[test]
    fn test_render_keeps_extension_directives() {
        let rendered = ExtensionTemplate::embedded().render("example.test");

        assert!(rendered.contains("subjectAltName = @alt_names"));
        assert!(rendered.contains("basicConstraints=CA:FALSE"));
    }

    #[test]
    fn test_from_file_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.conf");
        std::fs::write(&path, "subjectAltName=DNS:VALET_DOMAIN\n").unwrap();

        let fs = DiskFilesystem::new();
        let template = ExtensionTemplate::from_file(&fs, &path).unwrap();
        assert_eq!(
            template.render("foo.test"),
            "subjectAltName=DNS:foo.test\n"
        );
    }

    #[test]
    fn test_from_file_rejects_missing_token() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.conf");
        std::fs::write(&path, "subjectAltName=DNS:localhost\n").unwrap();

        let fs = DiskFilesystem::new();
        let result = ExtensionTemplate::from_file(&fs, &path);
        assert!(matches!(result, Err(CertValetError::TemplateError(_))));
    }

    #[test]
    fn test_from_file_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let fs = DiskFilesystem::new();
        let result = ExtensionTemplate::from_file(&fs, &dir.path().join("absent.conf"));
        assert!(result.is_err());
    }
}

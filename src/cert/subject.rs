//! Distinguished-name subject profiles.
//!
//! Subjects are rendered into the slash-delimited form that `openssl` accepts
//! for its `-subj` argument. The default profiles are deliberately placeholder
//! identities ("not a real CA") since the certificates only need to satisfy a
//! local trust store, never a public one.

use serde::{Deserialize, Serialize};

/// An X.509 subject, one optional field per supported attribute.
///
/// Empty or absent fields are omitted from the rendered `-subj` string.
///
/// # Example
///
/// ```
/// use certvalet::cert::subject::Subject;
///
/// let subject = Subject::leaf_default().with_common_name("example.test");
/// assert!(subject.to_subj_arg().contains("/CN=example.test"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Subject {
    /// Country (C)
    pub country: Option<String>,
    /// State or province (ST)
    pub state: Option<String>,
    /// Organization (O)
    pub organization: Option<String>,
    /// Locality (L)
    pub locality: Option<String>,
    /// Common name (CN)
    pub common_name: Option<String>,
    /// Organizational unit (OU)
    pub organizational_unit: Option<String>,
    /// Email address
    pub email: Option<String>,
}

impl Subject {
    /// The fixed placeholder identity of the self-signed root certificate.
    pub fn root_default() -> Self {
        Self {
            country: None,
            state: None,
            organization: Some("Not A CA, Ltd".to_string()),
            locality: None,
            common_name: Some("Not A Certificate Authority Limited".to_string()),
            organizational_unit: Some("Developers".to_string()),
            email: Some("not-a-ca@certvalet.test".to_string()),
        }
    }

    /// The fixed placeholder identity applied to leaf CSRs.
    ///
    /// The common name is left empty; issuance fills it with the requested
    /// domain via [`with_common_name`](Self::with_common_name).
    pub fn leaf_default() -> Self {
        Self {
            country: Some("FI".to_string()),
            state: Some("Uusimaa".to_string()),
            organization: Some("Not A Business, Inc".to_string()),
            locality: Some("Not A Business, Inc".to_string()),
            common_name: None,
            organizational_unit: Some("Development".to_string()),
            email: Some("not-a-business@certvalet.test".to_string()),
        }
    }

    /// Return a copy with the common name replaced verbatim (no normalization,
    /// case preserved).
    pub fn with_common_name(mut self, common_name: &str) -> Self {
        self.common_name = Some(common_name.to_string());
        self
    }

    /// Render the subject for `openssl -subj`.
    ///
    /// Fields are emitted in the conventional C, ST, O, L, CN, OU,
    /// emailAddress order; empty fields are skipped.
    pub fn to_subj_arg(&self) -> String {
        let mut out = String::from("/");
        let fields: [(&str, &Option<String>); 7] = [
            ("C", &self.country),
            ("ST", &self.state),
            ("O", &self.organization),
            ("L", &self.locality),
            ("CN", &self.common_name),
            ("OU", &self.organizational_unit),
            ("emailAddress", &self.email),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                if !value.is_empty() {
                    out.push_str(name);
                    out.push('=');
                    out.push_str(value);
                    out.push('/');
                }
            }
        }

        out
    }
}

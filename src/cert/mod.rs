//! Certificate lifecycle: CA bootstrap and leaf issuance.

pub mod authority;
pub mod issuer;
pub mod subject;
pub mod template;

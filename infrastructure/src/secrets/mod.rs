//! Secret store adapters.

mod aws;

pub use aws::{AwsSecretStore, DEFAULT_SECRET_NAME};

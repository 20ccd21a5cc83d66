//! Shared AWS SDK configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Load SDK configuration for `region`, optionally from a named profile.
///
/// Credentials come from the default provider chain (env, profile, IMDS).
pub async fn load_sdk_config(region: &str, profile: Option<&str>) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));

    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }

    debug!(region, profile, "Loading AWS configuration");
    loader.load().await
}

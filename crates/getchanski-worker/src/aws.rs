use aws_config::{BehaviorVersion, Region, SdkConfig};

use getchanski_core::Config;

/// Shared AWS SDK configuration: configured region, optional endpoint override,
/// credentials from the default provider chain.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.aws_region.clone()));

    if let Some(endpoint) = &config.aws_endpoint_url {
        tracing::info!(endpoint = %endpoint, "Using AWS endpoint override");
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

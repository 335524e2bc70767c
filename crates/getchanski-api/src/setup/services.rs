//! Client construction for the handler state

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use getchanski_core::Config;
use getchanski_db::DynamoUserRepository;
use getchanski_worker::{load_sdk_config, SqsQueue, UrlQueue};

use crate::constants::PROFILE_API_TIMEOUT_SECS;
use crate::services::{OAuthService, YandexDiskClient};
use crate::state::AppState;

pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let sdk_config = load_sdk_config(config).await;

    let queue = SqsQueue::from_sdk_config(&sdk_config, config.queue.url.clone());
    let urls = UrlQueue::new(Arc::new(queue), config.queue.sender_tag.clone());

    let users = DynamoUserRepository::from_sdk_config(&sdk_config, config.oauth.users_table.clone());
    let profiles = YandexDiskClient::from_config(
        &config.oauth,
        Duration::from_secs(PROFILE_API_TIMEOUT_SECS),
    )?;
    let oauth = OAuthService::new(
        Arc::new(profiles),
        Arc::new(users),
        config.oauth.cookie_domain.clone(),
    );

    tracing::info!(
        queue_url = %config.queue.url,
        users_table = %config.oauth.users_table,
        profile_api = %config.oauth.profile_api_url,
        region = %config.aws_region,
        "Services initialized"
    );

    Ok(Arc::new(AppState::new(urls, oauth, config.oauth.clone())))
}

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use getchanski_api::services::{OAuthService, ProfileClient};
use getchanski_api::setup::routes::setup_routes;
use getchanski_api::AppState;
use getchanski_core::models::{UserProfile, UserRecord};
use getchanski_core::{AppError, OAuthConfig};
use getchanski_db::{DbError, UserRepository};
use getchanski_worker::{MessageQueue, QueueError, ReceivedMessage, UrlQueue};

pub const COOKIE_DOMAIN: &str = "getchanski-site.s3-website-us-east-1.amazonaws.com";

#[derive(Default)]
pub struct FakeQueue {
    pub sent: Mutex<Vec<(String, HashMap<String, String>)>>,
    pub fail: bool,
}

#[async_trait]
impl MessageQueue for FakeQueue {
    async fn send(
        &self,
        body: &str,
        attributes: &HashMap<String, String>,
    ) -> Result<String, QueueError> {
        if self.fail {
            return Err(QueueError::Send("service unavailable".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((body.to_string(), attributes.clone()));
        Ok(format!("msg-{}", sent.len()))
    }

    async fn receive(
        &self,
        _max_messages: i32,
        _wait_secs: i32,
    ) -> Result<Vec<ReceivedMessage>, QueueError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<(), QueueError> {
        Ok(())
    }
}

pub struct FakeProfiles {
    pub tokens: Mutex<Vec<String>>,
    pub error: Option<String>,
}

impl FakeProfiles {
    pub fn ok() -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            error: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            tokens: Mutex::new(Vec::new()),
            error: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl ProfileClient for FakeProfiles {
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, AppError> {
        self.tokens.lock().unwrap().push(access_token.to_string());
        match &self.error {
            Some(message) => Err(AppError::Upstream(message.clone())),
            None => Ok(UserProfile {
                uid: "1130000012345678".to_string(),
                login: "jdoe".to_string(),
                country: "ru".to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct FakeUsers {
    pub records: Mutex<Vec<UserRecord>>,
    pub fail: bool,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn put_user(&self, user: &UserRecord) -> Result<(), DbError> {
        if self.fail {
            return Err(DbError::WriteFailed {
                table: "getchanski-users".to_string(),
                message: "ProvisionedThroughputExceededException".to_string(),
            });
        }
        self.records.lock().unwrap().push(user.clone());
        Ok(())
    }
}

pub fn oauth_config() -> OAuthConfig {
    OAuthConfig {
        client_id: "6254bbf47aa3496ba815f448f7f720de".to_string(),
        authorize_url: "https://oauth.yandex.ru/authorize".to_string(),
        profile_api_url: "https://cloud-api.yandex.net:443/v1/disk".to_string(),
        cookie_domain: COOKIE_DOMAIN.to_string(),
        users_table: "getchanski-users".to_string(),
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub queue: Arc<FakeQueue>,
    pub profiles: Arc<FakeProfiles>,
    pub users: Arc<FakeUsers>,
}

pub fn setup_test_app_with(queue: FakeQueue, profiles: FakeProfiles, users: FakeUsers) -> TestApp {
    let queue = Arc::new(queue);
    let profiles = Arc::new(profiles);
    let users = Arc::new(users);

    let state = AppState::new(
        UrlQueue::new(queue.clone(), "getchanski-lambda-0"),
        OAuthService::new(profiles.clone(), users.clone(), COOKIE_DOMAIN),
        oauth_config(),
    );
    let server = TestServer::new(setup_routes(Arc::new(state))).unwrap();

    TestApp {
        server,
        queue,
        profiles,
        users,
    }
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(FakeQueue::default(), FakeProfiles::ok(), FakeUsers::default())
}

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::SecondsFormat;
use std::collections::HashMap;

use getchanski_core::models::UserRecord;

use crate::error::DbError;

/// Write side of the user table
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a user record. An existing item with the same uuid is overwritten.
    async fn put_user(&self, user: &UserRecord) -> Result<(), DbError>;
}

/// Repository over a DynamoDB table keyed by `uuid`
#[derive(Clone, Debug)]
pub struct DynamoUserRepository {
    client: Client,
    table: String,
}

impl DynamoUserRepository {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn from_sdk_config(config: &SdkConfig, table: impl Into<String>) -> Self {
        Self::new(Client::new(config), table)
    }
}

/// Attribute map for a user record; every attribute is a string.
pub fn user_item(user: &UserRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("uuid".to_string(), AttributeValue::S(user.uuid.to_string())),
        ("user_id".to_string(), AttributeValue::S(user.user_id.clone())),
        ("login".to_string(), AttributeValue::S(user.login.clone())),
        ("country".to_string(), AttributeValue::S(user.country.clone())),
        ("token".to_string(), AttributeValue::S(user.token.clone())),
        (
            "expires_at".to_string(),
            AttributeValue::S(user.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ),
    ])
}

#[async_trait]
impl UserRepository for DynamoUserRepository {
    #[tracing::instrument(skip(self, user), fields(db.table = %self.table, db.operation = "put_item", user.uuid = %user.uuid))]
    async fn put_user(&self, user: &UserRecord) -> Result<(), DbError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(user_item(user)))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    table = %self.table,
                    "Failed to store user record"
                );
                DbError::WriteFailed {
                    table: self.table.clone(),
                    message: DisplayErrorContext(&e).to_string(),
                }
            })?;

        tracing::info!(login = %user.login, "User record stored");
        Ok(())
    }
}

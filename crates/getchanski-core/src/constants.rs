//! Fixed values shared by the enqueue side, the worker and the OAuth handlers.

/// Message attribute name attached to every enqueued URL.
pub const SENDER_ATTRIBUTE: &str = "Sender";

/// Default value of the `Sender` message attribute.
pub const DEFAULT_SENDER_TAG: &str = "getchanski-lambda-0";

pub const DEFAULT_AWS_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET: &str = "getchanski-storage";
pub const DEFAULT_USERS_TABLE: &str = "getchanski-users";

/// Extension of the artifacts produced by the extraction tool.
pub const AUDIO_EXTENSION: &str = "mp3";

pub const DEFAULT_OAUTH_CLIENT_ID: &str = "6254bbf47aa3496ba815f448f7f720de";
pub const DEFAULT_OAUTH_AUTHORIZE_URL: &str = "https://oauth.yandex.ru/authorize";
pub const DEFAULT_PROFILE_API_URL: &str = "https://cloud-api.yandex.net:443/v1/disk";
pub const DEFAULT_COOKIE_DOMAIN: &str = "getchanski-site.s3-website-us-east-1.amazonaws.com";

/// Status returned by the enqueue and OAuth handlers on success.
pub const STATUS_OK: &str = "OK";

/// Status returned by the OAuth callback when the user declined authorization.
pub const STATUS_ERR_OK: &str = "ErrOK";

/// SQS caps long-poll waits at 20 seconds.
pub const MAX_LONGPOLL_WAIT_SECS: i32 = 20;

//! AWS Cognito user pool directory.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::operation::admin_get_user::AdminGetUserOutput;
use aws_sdk_cognitoidentityprovider::operation::RequestId;
use aws_sdk_cognitoidentityprovider::Client;

use super::directory::{Directory, DirectoryError, SetPasswordReceipt};
use crate::config::DIRECTORY_LOGGER;
use crate::domain::{UserAttribute, UserRecord};

const UNKNOWN_STATUS: &str = "UNKNOWN";

/// Directory backed by Cognito admin APIs.
///
/// Credentials come from the default AWS provider chain.
#[derive(Clone)]
pub struct CognitoDirectory {
    client: Client,
}

impl CognitoDirectory {
    /// Create a directory client for a region using the SDK defaults.
    pub async fn connect(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        tracing::debug!(
            logger = DIRECTORY_LOGGER,
            "Cognito client configured for region {}",
            region
        );

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl Directory for CognitoDirectory {
    async fn fetch_user(
        &self,
        pool_id: &str,
        username: &str,
    ) -> Result<UserRecord, DirectoryError> {
        let output = self
            .client
            .admin_get_user()
            .user_pool_id(pool_id)
            .username(username)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .is_some_and(|e| e.is_user_not_found_exception());
                if not_found {
                    DirectoryError::UserNotFound
                } else {
                    DirectoryError::Upstream(DisplayErrorContext(&err).to_string())
                }
            })?;

        Ok(to_record(output))
    }

    async fn set_password(
        &self,
        pool_id: &str,
        username: &str,
        password: &str,
        permanent: bool,
    ) -> Result<SetPasswordReceipt, DirectoryError> {
        let output = self
            .client
            .admin_set_user_password()
            .user_pool_id(pool_id)
            .username(username)
            .password(password)
            .permanent(permanent)
            .send()
            .await
            .map_err(|err| DirectoryError::Upstream(DisplayErrorContext(&err).to_string()))?;

        Ok(SetPasswordReceipt {
            request_id: output.request_id().map(String::from),
        })
    }
}

/// Missing status reads as `UNKNOWN` and missing attribute values as `""`.
/// The SDK already folds an absent `Enabled` into `false`.
fn to_record(output: AdminGetUserOutput) -> UserRecord {
    let attributes = output
        .user_attributes()
        .iter()
        .map(|attr| UserAttribute::new(attr.name(), attr.value().unwrap_or_default()))
        .collect();

    UserRecord {
        username: output.username().to_string(),
        enabled: output.enabled(),
        status: output
            .user_status()
            .map(|status| status.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        attributes,
    }
}

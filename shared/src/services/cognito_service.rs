use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, SdkError};
use aws_sdk_cognitoidentityprovider::operation::admin_add_user_to_group::AdminAddUserToGroupError;
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;

use crate::{DirectoryError, GroupAssignmentRequest, GroupDirectory};

/// Cognito user pool directory, backed by `AdminAddUserToGroup`
#[derive(Clone)]
pub struct CognitoDirectoryService {
    client: CognitoClient,
}

impl CognitoDirectoryService {
    pub fn new(client: CognitoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GroupDirectory for CognitoDirectoryService {
    async fn add_user_to_group(
        &self,
        request: &GroupAssignmentRequest,
    ) -> Result<(), DirectoryError> {
        tracing::info!(
            "Adding user {} to group {} in pool {}",
            request.username,
            request.group_name,
            request.user_pool_id
        );

        self.client
            .admin_add_user_to_group()
            .group_name(&request.group_name)
            .user_pool_id(&request.user_pool_id)
            .username(&request.username)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "AdminAddUserToGroup failed for user {}: {}",
                    request.username,
                    DisplayErrorContext(&e)
                );
                map_sdk_error(e)
            })?;

        Ok(())
    }
}

/// Map an SDK failure onto the directory error taxonomy
pub fn map_sdk_error<R>(err: SdkError<AdminAddUserToGroupError, R>) -> DirectoryError
where
    R: std::fmt::Debug + 'static,
{
    match err {
        SdkError::ServiceError(context) => map_service_error(context.into_err()),
        construction @ SdkError::ConstructionFailure(_) => {
            DirectoryError::InvalidRequest(DisplayErrorContext(&construction).to_string())
        }
        other => DirectoryError::ServiceUnavailable(DisplayErrorContext(&other).to_string()),
    }
}

/// Map a modeled `AdminAddUserToGroup` error onto the directory error taxonomy
pub fn map_service_error(err: AdminAddUserToGroupError) -> DirectoryError {
    match &err {
        AdminAddUserToGroupError::UserNotFoundException(inner) => {
            DirectoryError::UserNotFound(describe(inner.message()))
        }
        // Cognito reports both a missing pool and a missing group this way
        AdminAddUserToGroupError::ResourceNotFoundException(inner) => {
            let message = describe(inner.message());
            if message.to_lowercase().contains("group") {
                DirectoryError::GroupNotFound(message)
            } else {
                DirectoryError::DirectoryNotFound(message)
            }
        }
        AdminAddUserToGroupError::NotAuthorizedException(inner) => {
            DirectoryError::PermissionDenied(describe(inner.message()))
        }
        AdminAddUserToGroupError::TooManyRequestsException(inner) => {
            DirectoryError::Throttled(describe(inner.message()))
        }
        AdminAddUserToGroupError::InternalErrorException(inner) => {
            DirectoryError::ServiceUnavailable(describe(inner.message()))
        }
        AdminAddUserToGroupError::InvalidParameterException(inner) => {
            DirectoryError::InvalidRequest(describe(inner.message()))
        }
        _ => DirectoryError::Unexpected(DisplayErrorContext(&err).to_string()),
    }
}

fn describe(message: Option<&str>) -> String {
    message.unwrap_or("no message").to_string()
}

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    redacted_attributes, AssignError, AssignResult, CognitoTriggerEvent, DirectoryError,
    GroupAssignmentRequest, GroupDirectory,
};

/// Issue exactly one "add user to group" call against the directory.
///
/// No retry, no fallback: whatever the directory reports is returned as is.
pub async fn assign_to_group(
    directory: &dyn GroupDirectory,
    group_name: &str,
    user_pool_id: &str,
    username: &str,
) -> Result<(), DirectoryError> {
    let request = GroupAssignmentRequest::new(group_name, user_pool_id, username);
    directory.add_user_to_group(&request).await
}

/// Adds every triggering user to one configured group.
#[derive(Clone)]
pub struct GroupAssigner {
    directory: Arc<dyn GroupDirectory>,
    group_name: String,
}

impl GroupAssigner {
    pub fn new(directory: Arc<dyn GroupDirectory>, group_name: impl Into<String>) -> AssignResult<Self> {
        let group_name = group_name.into();
        if group_name.trim().is_empty() {
            return Err(AssignError::ConfigurationError(
                "Group name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            directory,
            group_name,
        })
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Assign the trigger's user to the configured group and hand the event back untouched
    pub async fn handle_trigger(
        &self,
        event: CognitoTriggerEvent,
    ) -> AssignResult<CognitoTriggerEvent> {
        info!(
            "Received trigger {} for user {} in pool {}",
            event.trigger_source().unwrap_or("unknown"),
            event.user_name,
            event.user_pool_id
        );
        if let Some(attributes) = event.user_attributes() {
            info!("Request attributes: {:?}", redacted_attributes(attributes));
        }

        if event.user_pool_id.trim().is_empty() {
            return Err(AssignError::ValidationError(
                "userPoolId is empty".to_string(),
            ));
        }
        if event.user_name.trim().is_empty() {
            return Err(AssignError::ValidationError("userName is empty".to_string()));
        }

        match assign_to_group(
            self.directory.as_ref(),
            &self.group_name,
            &event.user_pool_id,
            &event.user_name,
        )
        .await
        {
            Ok(()) => {
                info!(
                    "Assigned user {} to group {}",
                    event.user_name, self.group_name
                );
                Ok(event)
            }
            Err(e) => {
                error!(
                    "Failed to assign user {} to group {}: {}",
                    event.user_name, self.group_name, e
                );
                if e.is_transient() {
                    warn!("Directory failure looks transient; leaving any retry to the caller");
                }
                Err(e.into())
            }
        }
    }
}

/// Log-only variant: record what the trigger carried and pass it through.
pub fn log_trigger_event(event: CognitoTriggerEvent) -> CognitoTriggerEvent {
    info!(
        "Received trigger {} for user {} in pool {} (log only)",
        event.trigger_source().unwrap_or("unknown"),
        event.user_name,
        event.user_pool_id
    );
    match event.user_attributes() {
        Some(attributes) => info!("Request attributes: {:?}", redacted_attributes(attributes)),
        None => info!("Request attributes: none"),
    }
    event
}

/// Deliver a result through an `(error, value)` completion callback.
///
/// The callback runs exactly once, with exactly one of the two set.
pub fn signal_completion<T, E, F>(result: Result<T, E>, callback: F)
where
    F: FnOnce(Option<E>, Option<T>),
{
    match result {
        Ok(value) => callback(None, Some(value)),
        Err(e) => callback(Some(e), None),
    }
}

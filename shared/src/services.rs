pub mod cognito_service;
pub mod memory_directory;

pub use cognito_service::*;
pub use memory_directory::*;

use crate::{DirectoryError, GroupAssignmentRequest};
use async_trait::async_trait;

/// User directory that can add a user to an existing group.
///
/// Implementations must treat adding an existing member as success.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    async fn add_user_to_group(&self, request: &GroupAssignmentRequest)
        -> Result<(), DirectoryError>;
}

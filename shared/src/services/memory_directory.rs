use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{DirectoryError, GroupAssignmentRequest, GroupDirectory};

#[derive(Debug, Default)]
struct UserPool {
    users: HashSet<String>,
    groups: HashMap<String, BTreeSet<String>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    pools: HashMap<String, UserPool>,
    requests: Vec<GroupAssignmentRequest>,
    failure: Option<DirectoryError>,
}

/// In-process user directory with the same membership semantics as Cognito.
///
/// Every request is recorded in arrival order, including rejected ones.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_user(&self, user_pool_id: &str, username: &str) {
        self.state()
            .pools
            .entry(user_pool_id.to_string())
            .or_default()
            .users
            .insert(username.to_string());
    }

    pub fn add_group(&self, user_pool_id: &str, group_name: &str) {
        self.state()
            .pools
            .entry(user_pool_id.to_string())
            .or_default()
            .groups
            .entry(group_name.to_string())
            .or_default();
    }

    /// Make every following call fail with `error` until [`Self::clear_failure`]
    pub fn fail_with(&self, error: DirectoryError) {
        self.state().failure = Some(error);
    }

    pub fn clear_failure(&self) {
        self.state().failure = None;
    }

    pub fn requests(&self) -> Vec<GroupAssignmentRequest> {
        self.state().requests.clone()
    }

    /// Sorted members of a group, `None` when the pool or group is unknown
    pub fn members(&self, user_pool_id: &str, group_name: &str) -> Option<Vec<String>> {
        self.state()
            .pools
            .get(user_pool_id)
            .and_then(|pool| pool.groups.get(group_name))
            .map(|members| members.iter().cloned().collect())
    }
}

#[async_trait]
impl GroupDirectory for InMemoryDirectory {
    async fn add_user_to_group(
        &self,
        request: &GroupAssignmentRequest,
    ) -> Result<(), DirectoryError> {
        let mut state = self.state();
        state.requests.push(request.clone());

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        let pool = state.pools.get_mut(&request.user_pool_id).ok_or_else(|| {
            DirectoryError::DirectoryNotFound(format!(
                "User pool {} does not exist.",
                request.user_pool_id
            ))
        })?;

        if !pool.users.contains(&request.username) {
            return Err(DirectoryError::UserNotFound(
                "User does not exist.".to_string(),
            ));
        }

        let members = pool.groups.get_mut(&request.group_name).ok_or_else(|| {
            DirectoryError::GroupNotFound(format!("Group {} not found.", request.group_name))
        })?;

        if !members.insert(request.username.clone()) {
            tracing::debug!(
                "User {} already in group {}",
                request.username,
                request.group_name
            );
        }

        Ok(())
    }
}

use crate::AssignError;

/// Group every triggering user is added to unless `GROUP_NAME` overrides it.
pub const DEFAULT_GROUP_NAME: &str = "hvgn-view";

/// Configuration resolved once at cold start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub group_name: String,
}

impl RuntimeConfig {
    /// Create runtime config from Lambda environment variables
    pub fn from_env() -> Result<Self, AssignError> {
        Self::from_group_name(std::env::var("GROUP_NAME").ok())
    }

    /// Resolve the group name, falling back to [`DEFAULT_GROUP_NAME`] when unset
    pub fn from_group_name(group_name: Option<String>) -> Result<Self, AssignError> {
        let group_name = match group_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AssignError::ConfigurationError(
                        "GROUP_NAME is set but empty".to_string(),
                    ));
                }
                name
            }
            None => DEFAULT_GROUP_NAME.to_string(),
        };

        tracing::info!("Runtime configuration loaded - GROUP_NAME: {}", group_name);
        Ok(Self { group_name })
    }
}

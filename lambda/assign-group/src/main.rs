use anyhow::Context as _;
use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use groups_shared::{CognitoDirectoryService, CognitoTriggerEvent, GroupAssigner, RuntimeConfig};

async fn function_handler(
    assigner: &GroupAssigner,
    event: LambdaEvent<CognitoTriggerEvent>,
) -> Result<CognitoTriggerEvent, Error> {
    let (payload, context) = event.into_parts();

    info!("Request ID: {}", context.request_id);

    match assigner.handle_trigger(payload).await {
        Ok(response_event) => {
            info!("Successfully handled group assignment");
            Ok(response_event)
        }
        Err(e) => {
            // Returned to Cognito, which decides whether the sign-in fails
            error!("Failed to handle group assignment: {}", e);
            Err(e.into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    info!("Starting assign-group Lambda function");

    let runtime_config =
        RuntimeConfig::from_env().context("Failed to load runtime configuration")?;

    // One client per container, shared by every invocation
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let cognito_client = aws_sdk_cognitoidentityprovider::Client::new(&config);
    let directory = Arc::new(CognitoDirectoryService::new(cognito_client));

    let assigner = GroupAssigner::new(directory, runtime_config.group_name)
        .context("Failed to initialize GroupAssigner")?;

    info!("Assigning triggering users to group {}", assigner.group_name());

    run(service_fn(|event| function_handler(&assigner, event))).await
}

use groups_shared::{log_trigger_event, CognitoTriggerEvent};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log-only counterpart of assign-group: no directory call is made.
async fn function_handler(
    event: LambdaEvent<CognitoTriggerEvent>,
) -> Result<CognitoTriggerEvent, Error> {
    let (payload, context) = event.into_parts();
    info!("Request ID: {}", context.request_id);
    Ok(log_trigger_event(payload))
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

    run(service_fn(function_handler)).await
}

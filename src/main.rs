use lambda_runtime::{service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

use movies_api_handler::{
    function_handler, logging, ApiGatewayRequest, Config, DynamoDbStore, MovieHandler,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init()?;

    let config = Arc::new(Config::from_env()?);
    info!(table_name = %config.table_name, "Initializing movies handler");

    // One DynamoDB client per process, shared by every invocation
    let handler = Arc::new(MovieHandler::new(DynamoDbStore::from_env().await));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ApiGatewayRequest>| {
        let handler = handler.clone();
        let config = config.clone();
        async move { function_handler(handler.as_ref(), &config.table_name, event).await }
    }))
    .await
}

use lambda_runtime::{Error, LambdaEvent};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::HandlerError;
use crate::models::{
    parse_body, payload_id, ApiGatewayRequest, ApiGatewayResponse, InvocationContext, MovieRecord,
};
use crate::storage::MovieStore;

/// Request handler holding the injected storage client.
pub struct MovieHandler<S> {
    store: S,
}

impl<S: MovieStore> MovieHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes one record and maps the outcome to the API Gateway response.
    ///
    /// A non-empty body is parsed into the record; otherwise a default
    /// record with a fresh id is written. Every error becomes the same
    /// generic 500 and is only visible in the log.
    pub async fn handle(
        &self,
        request: &ApiGatewayRequest,
        context: &InvocationContext,
        table_name: &str,
    ) -> ApiGatewayResponse {
        info!(
            request_id = %context.request_id,
            function_name = %context.function_name,
            table_name = %table_name,
            http_method = request.http_method.as_deref().unwrap_or_default(),
            resource_path = request.path.as_deref().unwrap_or_default(),
            "Processing request"
        );

        let outcome = match request.payload() {
            Some(body) => self.insert_payload(body, context, table_name).await,
            None => self.insert_default(context, table_name).await,
        };

        match outcome {
            Ok(_) => ApiGatewayResponse::inserted(),
            Err(e) => {
                error!(
                    request_id = %context.request_id,
                    function_name = %context.function_name,
                    table_name = %table_name,
                    error = %e,
                    error_type = e.kind(),
                    "Failed to process request"
                );
                ApiGatewayResponse::internal_error()
            }
        }
    }

    async fn insert_payload(
        &self,
        body: &str,
        context: &InvocationContext,
        table_name: &str,
    ) -> Result<MovieRecord, HandlerError> {
        let item = parse_body(body)?;
        let item_id = payload_id(&item);
        info!(
            request_id = %context.request_id,
            function_name = %context.function_name,
            item_id = item_id.as_deref(),
            "Received payload"
        );

        let record = MovieRecord::from_value(&item)?;

        let record = self.put(table_name, record).await?;
        info!(
            request_id = %context.request_id,
            function_name = %context.function_name,
            item_id = %record.id,
            table_name = %table_name,
            "Successfully inserted data"
        );
        Ok(record)
    }

    async fn insert_default(
        &self,
        context: &InvocationContext,
        table_name: &str,
    ) -> Result<MovieRecord, HandlerError> {
        info!(
            request_id = %context.request_id,
            function_name = %context.function_name,
            "Received request without payload, using default data"
        );

        let record = MovieRecord::with_defaults(Uuid::new_v4().to_string());
        let record = self.put(table_name, record).await?;
        info!(
            request_id = %context.request_id,
            function_name = %context.function_name,
            item_id = %record.id,
            table_name = %table_name,
            "Successfully inserted default data"
        );
        Ok(record)
    }

    async fn put(&self, table_name: &str, record: MovieRecord) -> Result<MovieRecord, HandlerError> {
        self.store
            .put(table_name, &record)
            .await
            .map_err(|source| HandlerError::StorageWrite {
                table: table_name.to_string(),
                source,
            })?;
        Ok(record)
    }
}

pub async fn function_handler<S: MovieStore>(
    handler: &MovieHandler<S>,
    table_name: &str,
    event: LambdaEvent<ApiGatewayRequest>,
) -> Result<ApiGatewayResponse, Error> {
    let (request, lambda_context) = event.into_parts();
    let context = InvocationContext::from(&lambda_context);

    Ok(handler.handle(&request, &context, table_name).await)
}

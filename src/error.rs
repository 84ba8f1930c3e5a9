use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("DynamoDB error: {0}")]
    DynamoDb(#[from] aws_sdk_dynamodb::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures on the insert path. The caller only ever sees a generic 500;
/// the variant survives in the log record.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Failed to write item to table {table}: {source}")]
    StorageWrite {
        table: String,
        #[source]
        source: StoreError,
    },
}

impl HandlerError {
    /// Label written to the `error_type` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::MalformedBody(_) => "MalformedBodyError",
            HandlerError::MissingField(_) => "MissingFieldError",
            HandlerError::InvalidField { .. } => "InvalidFieldError",
            HandlerError::StorageWrite { .. } => "StorageWriteError",
        }
    }
}

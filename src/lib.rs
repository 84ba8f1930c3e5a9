//! Lambda handler behind an API Gateway proxy integration that writes one
//! movie record to DynamoDB per invocation.

pub mod config;
pub mod error;
pub mod event_handler;
pub mod logging;
pub mod models;
pub mod storage;

pub use crate::config::Config;
pub use crate::error::{HandlerError, StoreError};
pub use crate::event_handler::{function_handler, MovieHandler};
pub use crate::models::{ApiGatewayRequest, ApiGatewayResponse, InvocationContext, MovieRecord};
pub use crate::storage::{DynamoDbStore, MemoryStore, MovieStore};

/// Environment variable holding the target table name.
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

//! AWS provider
//!
//! Implements the provider ports on top of the official SDKs: Lambda for
//! compute units, API Gateway (REST APIs) for gateways and routing.
//!
//! # Authentication
//!
//! Credentials are resolved in the standard AWS order:
//! environment variables → shared credentials file → IAM instance profile.
//!
//! # Blocking
//!
//! The ports are synchronous. `AwsCloud` owns a current-thread tokio
//! runtime and blocks on each SDK call, so calls are issued strictly one
//! after another.

mod apigateway;
mod lambda;

use std::future::Future;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::domain::ports::ProviderError;

/// Page size requested from paginated API Gateway listings
const PAGE_LIMIT: i32 = 500;

/// Lambda + API Gateway provider for one region
pub struct AwsCloud {
    runtime: Runtime,
    region: String,
    lambda: aws_sdk_lambda::Client,
    apigateway: aws_sdk_apigateway::Client,
}

impl AwsCloud {
    /// Build clients for `region`, loading credentials from the
    /// environment using the standard AWS SDK credential chain.
    pub fn connect(region: impl Into<String>) -> std::io::Result<Self> {
        let region = region.into();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let sdk_config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.clone()))
                .load(),
        );
        debug!(%region, "aws clients configured");

        Ok(Self {
            lambda: aws_sdk_lambda::Client::new(&sdk_config),
            apigateway: aws_sdk_apigateway::Client::new(&sdk_config),
            runtime,
            region,
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// How a service error should be classified
enum ErrorClass {
    NotFound,
    Conflict,
    Other,
}

/// Map an SDK error onto `ProviderError`, using `classify` to recognise the
/// operation's not-found and conflict exceptions.
fn provider_error<E, R>(
    operation: &'static str,
    resource: impl Into<String>,
    err: SdkError<E, R>,
    classify: impl Fn(&E) -> ErrorClass,
) -> ProviderError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let class = err
        .as_service_error()
        .map(classify)
        .unwrap_or(ErrorClass::Other);
    match class {
        ErrorClass::NotFound => ProviderError::not_found(resource),
        ErrorClass::Conflict => ProviderError::conflict(resource),
        ErrorClass::Other => {
            ProviderError::service(operation, DisplayErrorContext(&err).to_string())
        }
    }
}

/// A response that lacks a field the API documents as always present
fn missing_field(operation: &'static str, field: &str) -> ProviderError {
    ProviderError::service(operation, format!("response carries no {}", field))
}

//! Compute units as Lambda functions

use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{FunctionCode, Runtime};
use tracing::debug;

use super::{missing_field, provider_error, AwsCloud, ErrorClass};
use crate::domain::ports::{ComputeService, ComputeUnit, ComputeUnitSpec, ProviderResult};
use crate::domain::value_objects::ComputeArn;

impl ComputeService for AwsCloud {
    fn get_compute_unit(&self, name: &str) -> ProviderResult<ComputeUnit> {
        let output = self
            .block_on(self.lambda.get_function().function_name(name).send())
            .map_err(|e| {
                provider_error("GetFunction", format!("function {}", name), e, |se| {
                    if se.is_resource_not_found_exception() {
                        ErrorClass::NotFound
                    } else {
                        ErrorClass::Other
                    }
                })
            })?;

        let arn = output
            .configuration()
            .and_then(|c| c.function_arn())
            .ok_or_else(|| missing_field("GetFunction", "function ARN"))?;

        Ok(ComputeUnit {
            name: name.to_string(),
            arn: ComputeArn::new(arn),
        })
    }

    fn create_compute_unit(&self, spec: &ComputeUnitSpec<'_>) -> ProviderResult<ComputeUnit> {
        debug!(name = spec.name, runtime = spec.runtime, bytes = spec.code.len(), "CreateFunction");
        let code = FunctionCode::builder()
            .zip_file(Blob::new(spec.code.to_vec()))
            .build();

        let output = self
            .block_on(
                self.lambda
                    .create_function()
                    .function_name(spec.name)
                    .role(spec.role)
                    .runtime(Runtime::from(spec.runtime))
                    .handler(spec.handler)
                    .code(code)
                    .send(),
            )
            .map_err(|e| {
                provider_error("CreateFunction", format!("function {}", spec.name), e, |se| {
                    if se.is_resource_conflict_exception() {
                        ErrorClass::Conflict
                    } else {
                        ErrorClass::Other
                    }
                })
            })?;

        let arn = output
            .function_arn()
            .ok_or_else(|| missing_field("CreateFunction", "function ARN"))?;

        Ok(ComputeUnit {
            name: spec.name.to_string(),
            arn: ComputeArn::new(arn),
        })
    }

    fn update_compute_code(&self, name: &str, code: &[u8]) -> ProviderResult<()> {
        debug!(name, bytes = code.len(), "UpdateFunctionCode");
        self.block_on(
            self.lambda
                .update_function_code()
                .function_name(name)
                .zip_file(Blob::new(code.to_vec()))
                .send(),
        )
        .map_err(|e| {
            provider_error("UpdateFunctionCode", format!("function {}", name), e, |se| {
                if se.is_resource_not_found_exception() {
                    ErrorClass::NotFound
                } else {
                    ErrorClass::Other
                }
            })
        })?;
        Ok(())
    }
}

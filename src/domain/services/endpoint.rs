//! Endpoint addresses derived from remote identifiers

use crate::domain::value_objects::{ComputeArn, GatewayId};

/// Public invoke URL of a function routed under a gateway
pub fn invoke_url(gateway: &GatewayId, region: &str, stage: &str, path_part: &str) -> String {
    format!(
        "https://{}.execute-api.{}.amazonaws.com/{}/{}",
        gateway, region, stage, path_part
    )
}

/// Integration URI the gateway uses to invoke a compute unit
pub fn integration_uri(region: &str, arn: &ComputeArn) -> String {
    format!(
        "arn:aws:apigateway:{}:lambda:path/2015-03-31/functions/{}/invocations",
        region, arn
    )
}

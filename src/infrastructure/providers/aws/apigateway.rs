//! Gateways and routing as API Gateway REST APIs

use aws_sdk_apigateway::types::IntegrationType;
use tracing::debug;

use super::{missing_field, provider_error, AwsCloud, ErrorClass, PAGE_LIMIT};
use crate::domain::ports::{
    Authorization, BackendKind, BackendWiring, GatewaySummary, Page, ProviderResult,
    RoutingNode, RoutingService, VerbBinding,
};
use crate::domain::services::integration_uri;
use crate::domain::value_objects::{GatewayId, HttpMethod, NodeId};

fn integration_type(kind: BackendKind) -> IntegrationType {
    match kind {
        BackendKind::ProxiedCompute => IntegrationType::AwsProxy,
    }
}

impl RoutingService for AwsCloud {
    fn list_gateways(&self, position: Option<&str>) -> ProviderResult<Page<GatewaySummary>> {
        let output = self
            .block_on(
                self.apigateway
                    .get_rest_apis()
                    .set_position(position.map(str::to_string))
                    .limit(PAGE_LIMIT)
                    .send(),
            )
            .map_err(|e| provider_error("GetRestApis", "rest apis", e, |_| ErrorClass::Other))?;

        let items = output
            .items()
            .iter()
            .filter_map(|api| {
                Some(GatewaySummary {
                    id: GatewayId::new(api.id()?),
                    name: api.name().unwrap_or_default().to_string(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next: output.position().map(str::to_string),
        })
    }

    fn create_gateway(&self, name: &str) -> ProviderResult<GatewayId> {
        debug!(name, "CreateRestApi");
        let output = self
            .block_on(self.apigateway.create_rest_api().name(name).send())
            .map_err(|e| {
                provider_error("CreateRestApi", format!("rest api {}", name), e, |se| {
                    if se.is_conflict_exception() {
                        ErrorClass::Conflict
                    } else {
                        ErrorClass::Other
                    }
                })
            })?;

        output
            .id()
            .map(GatewayId::new)
            .ok_or_else(|| missing_field("CreateRestApi", "rest api id"))
    }

    fn list_routing_nodes(
        &self,
        gateway: &GatewayId,
        position: Option<&str>,
    ) -> ProviderResult<Page<RoutingNode>> {
        let output = self
            .block_on(
                self.apigateway
                    .get_resources()
                    .rest_api_id(gateway.as_str())
                    .set_position(position.map(str::to_string))
                    .limit(PAGE_LIMIT)
                    .send(),
            )
            .map_err(|e| {
                provider_error("GetResources", format!("rest api {}", gateway), e, |se| {
                    if se.is_not_found_exception() {
                        ErrorClass::NotFound
                    } else {
                        ErrorClass::Other
                    }
                })
            })?;

        let items = output
            .items()
            .iter()
            .filter_map(|resource| {
                Some(RoutingNode {
                    id: NodeId::new(resource.id()?),
                    parent_id: resource.parent_id().map(NodeId::new),
                    path_part: resource.path_part().map(str::to_string),
                    path: resource.path().unwrap_or_default().to_string(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next: output.position().map(str::to_string),
        })
    }

    fn create_routing_node(
        &self,
        gateway: &GatewayId,
        parent: &NodeId,
        path_part: &str,
    ) -> ProviderResult<NodeId> {
        debug!(%gateway, %parent, path_part, "CreateResource");
        let output = self
            .block_on(
                self.apigateway
                    .create_resource()
                    .rest_api_id(gateway.as_str())
                    .parent_id(parent.as_str())
                    .path_part(path_part)
                    .send(),
            )
            .map_err(|e| {
                provider_error("CreateResource", format!("resource {}", path_part), e, |se| {
                    if se.is_conflict_exception() {
                        ErrorClass::Conflict
                    } else if se.is_not_found_exception() {
                        ErrorClass::NotFound
                    } else {
                        ErrorClass::Other
                    }
                })
            })?;

        output
            .id()
            .map(NodeId::new)
            .ok_or_else(|| missing_field("CreateResource", "resource id"))
    }

    fn get_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> ProviderResult<VerbBinding> {
        let output = self
            .block_on(
                self.apigateway
                    .get_method()
                    .rest_api_id(gateway.as_str())
                    .resource_id(node.as_str())
                    .http_method(method.as_str())
                    .send(),
            )
            .map_err(|e| {
                provider_error("GetMethod", format!("method {} on {}", method, node), e, |se| {
                    if se.is_not_found_exception() {
                        ErrorClass::NotFound
                    } else {
                        ErrorClass::Other
                    }
                })
            })?;

        // Only open bindings are ever created; anything else is reported as-is
        // in the debug log and still counts as an existing binding.
        if output.authorization_type() != Some(Authorization::None.as_str()) {
            debug!(%node, %method, authorization = ?output.authorization_type(), "binding has custom authorization");
        }
        Ok(VerbBinding::open(method))
    }

    fn put_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        binding: &VerbBinding,
    ) -> ProviderResult<()> {
        debug!(%gateway, %node, method = %binding.method, "PutMethod");
        self.block_on(
            self.apigateway
                .put_method()
                .rest_api_id(gateway.as_str())
                .resource_id(node.as_str())
                .http_method(binding.method.as_str())
                .authorization_type(binding.authorization.as_str())
                .send(),
        )
        .map_err(|e| {
            provider_error(
                "PutMethod",
                format!("method {} on {}", binding.method, node),
                e,
                |se| {
                    if se.is_conflict_exception() {
                        ErrorClass::Conflict
                    } else if se.is_not_found_exception() {
                        ErrorClass::NotFound
                    } else {
                        ErrorClass::Other
                    }
                },
            )
        })?;
        Ok(())
    }

    fn put_backend_wiring(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
        wiring: &BackendWiring,
    ) -> ProviderResult<()> {
        let uri = integration_uri(self.region(), &wiring.target);
        debug!(%gateway, %node, %method, %uri, "PutIntegration");
        self.block_on(
            self.apigateway
                .put_integration()
                .rest_api_id(gateway.as_str())
                .resource_id(node.as_str())
                .http_method(method.as_str())
                .r#type(integration_type(wiring.kind))
                .integration_http_method(wiring.upstream_method.as_str())
                .uri(uri)
                .send(),
        )
        .map_err(|e| {
            provider_error(
                "PutIntegration",
                format!("integration {} on {}", method, node),
                e,
                |se| {
                    if se.is_not_found_exception() {
                        ErrorClass::NotFound
                    } else {
                        ErrorClass::Other
                    }
                },
            )
        })?;
        Ok(())
    }
}

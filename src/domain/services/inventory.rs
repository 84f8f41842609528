//! Remote Inventory
//!
//! Read-only queries answering "does X exist, and what is its identifier"
//! for each remote entity kind. Listings are followed through every page.

use tracing::debug;

use crate::domain::ports::{
    ComputeService, ComputeUnit, ProviderResult, RoutingNode, RoutingService, VerbBinding,
};
use crate::domain::value_objects::{
    GatewayId, HttpMethod, Lookup, LookupError, LookupKind, NodeId,
};

pub struct RemoteInventory<C, R> {
    compute: C,
    routing: R,
}

impl<C, R> RemoteInventory<C, R>
where
    C: ComputeService,
    R: RoutingService,
{
    pub fn new(compute: C, routing: R) -> Self {
        Self { compute, routing }
    }

    pub fn compute(&self) -> &C {
        &self.compute
    }

    pub fn routing(&self) -> &R {
        &self.routing
    }

    /// Gateway whose name equals `name` exactly
    pub fn find_gateway(&self, name: &str) -> Lookup<GatewayId> {
        let mut position: Option<String> = None;
        loop {
            let page = match self.routing.list_gateways(position.as_deref()) {
                Ok(page) => page,
                Err(source) => {
                    return Lookup::Failed(LookupError {
                        kind: LookupKind::Gateway,
                        key: name.to_string(),
                        source,
                    })
                }
            };

            if let Some(gateway) = page.items.into_iter().find(|g| g.name == name) {
                debug!(gateway = %gateway.id, name, "gateway found");
                return Lookup::Found(gateway.id);
            }

            match page.next {
                Some(next) => position = Some(next),
                None => return Lookup::NotFound,
            }
        }
    }

    /// Routing node whose path part or full path equals `key`
    pub fn find_routing_node(&self, gateway: &GatewayId, key: &str) -> Lookup<NodeId> {
        match self.all_routing_nodes(gateway) {
            Ok(nodes) => match nodes.into_iter().find(|n| n.matches(key)) {
                Some(node) => {
                    debug!(node = %node.id, key, "routing node found");
                    Lookup::Found(node.id)
                }
                None => Lookup::NotFound,
            },
            Err(source) => Lookup::Failed(LookupError {
                kind: LookupKind::RoutingNode,
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Every routing node of a gateway, root included
    pub fn routing_nodes(&self, gateway: &GatewayId) -> Result<Vec<RoutingNode>, LookupError> {
        self.all_routing_nodes(gateway)
            .map_err(|source| LookupError {
                kind: LookupKind::RoutingNode,
                key: gateway.to_string(),
                source,
            })
    }

    pub fn find_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> Lookup<VerbBinding> {
        Lookup::from_provider(
            LookupKind::VerbBinding,
            format!("{} {}", method, node),
            self.routing.get_verb_binding(gateway, node, method),
        )
    }

    pub fn find_compute_unit(&self, name: &str) -> Lookup<ComputeUnit> {
        Lookup::from_provider(
            LookupKind::ComputeUnit,
            name,
            self.compute.get_compute_unit(name),
        )
    }

    fn all_routing_nodes(&self, gateway: &GatewayId) -> ProviderResult<Vec<RoutingNode>> {
        let mut nodes = Vec::new();
        let mut position: Option<String> = None;
        loop {
            let page = self
                .routing
                .list_routing_nodes(gateway, position.as_deref())?;
            nodes.extend(page.items);
            match page.next {
                Some(next) => position = Some(next),
                None => return Ok(nodes),
            }
        }
    }
}

//! In-memory provider
//!
//! A complete `ComputeService` + `RoutingService` kept in process memory.
//! It records every call it receives and can be told to fail the next call
//! of a given kind, which makes it the backend of the scenario tests.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use crate::domain::ports::{
    BackendWiring, ComputeService, ComputeUnit, ComputeUnitSpec, GatewaySummary, Page,
    ProviderError, ProviderResult, RoutingNode, RoutingService, VerbBinding,
};
use crate::domain::value_objects::{ComputeArn, GatewayId, HttpMethod, NodeId};

/// Kind of call received by the in-memory provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderCall {
    GetComputeUnit,
    CreateComputeUnit,
    UpdateComputeCode,
    ListGateways,
    CreateGateway,
    ListRoutingNodes,
    CreateRoutingNode,
    GetVerbBinding,
    PutVerbBinding,
    PutBackendWiring,
}

impl ProviderCall {
    /// Whether the call mutates remote state
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            ProviderCall::CreateComputeUnit
                | ProviderCall::UpdateComputeCode
                | ProviderCall::CreateGateway
                | ProviderCall::CreateRoutingNode
                | ProviderCall::PutVerbBinding
                | ProviderCall::PutBackendWiring
        )
    }
}

#[derive(Debug, Clone)]
struct StoredUnit {
    arn: ComputeArn,
    role: String,
    runtime: String,
    handler: String,
    code: Vec<u8>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    gateways: Vec<GatewaySummary>,
    nodes: HashMap<GatewayId, Vec<RoutingNode>>,
    bindings: HashMap<(GatewayId, NodeId, HttpMethod), VerbBinding>,
    wirings: HashMap<(GatewayId, NodeId, HttpMethod), BackendWiring>,
    units: BTreeMap<String, StoredUnit>,
    calls: Vec<ProviderCall>,
    failures: VecDeque<(ProviderCall, ProviderError)>,
}

impl State {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{:04}", prefix, self.next_id)
    }

    fn add_gateway(&mut self, name: &str, with_root: bool) -> GatewayId {
        let id = GatewayId::new(self.id("gw"));
        self.gateways.push(GatewaySummary {
            id: id.clone(),
            name: name.to_string(),
        });
        let mut nodes = Vec::new();
        if with_root {
            nodes.push(RoutingNode {
                id: NodeId::new(self.id("root")),
                parent_id: None,
                path_part: None,
                path: RoutingNode::ROOT_PATH.to_string(),
            });
        }
        self.nodes.insert(id.clone(), nodes);
        id
    }

    fn add_node(&mut self, gateway: &GatewayId, parent: &NodeId, path_part: &str) -> ProviderResult<NodeId> {
        let id = NodeId::new(self.id("res"));
        let nodes = self
            .nodes
            .get_mut(gateway)
            .ok_or_else(|| ProviderError::not_found(format!("gateway {}", gateway)))?;
        let parent_path = nodes
            .iter()
            .find(|n| &n.id == parent)
            .map(|n| n.path.clone())
            .ok_or_else(|| ProviderError::not_found(format!("routing node {}", parent)))?;
        if nodes
            .iter()
            .any(|n| n.parent_id.as_ref() == Some(parent) && n.path_part.as_deref() == Some(path_part))
        {
            return Err(ProviderError::conflict(format!("routing node {}", path_part)));
        }
        let path = if parent_path == RoutingNode::ROOT_PATH {
            format!("/{}", path_part)
        } else {
            format!("{}/{}", parent_path, path_part)
        };
        nodes.push(RoutingNode {
            id: id.clone(),
            parent_id: Some(parent.clone()),
            path_part: Some(path_part.to_string()),
            path,
        });
        Ok(id)
    }

    fn add_unit(&mut self, spec: &ComputeUnitSpec<'_>) -> ComputeUnit {
        let arn = ComputeArn::new(format!(
            "arn:aws:lambda:local:000000000000:function:{}",
            spec.name
        ));
        self.units.insert(
            spec.name.to_string(),
            StoredUnit {
                arn: arn.clone(),
                role: spec.role.to_string(),
                runtime: spec.runtime.to_string(),
                handler: spec.handler.to_string(),
                code: spec.code.to_vec(),
            },
        );
        ComputeUnit {
            name: spec.name.to_string(),
            arn,
        }
    }
}

/// In-memory cloud
#[derive(Debug)]
pub struct InMemoryCloud {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for InMemoryCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCloud {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: 25,
        }
    }

    /// Split listings into pages of `size` items
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Log the call, then fail it if a failure was queued for its kind
    fn enter(&self, call: ProviderCall) -> ProviderResult<std::sync::MutexGuard<'_, State>> {
        let mut state = self.state();
        state.calls.push(call);
        if let Some(pos) = state.failures.iter().position(|(c, _)| *c == call) {
            if let Some((_, err)) = state.failures.remove(pos) {
                return Err(err);
            }
        }
        Ok(state)
    }

    fn paginate<T: Clone>(&self, items: &[T], position: Option<&str>) -> Page<T> {
        let start = position.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
        let end = (start + self.page_size).min(items.len());
        let next = (end < items.len()).then(|| end.to_string());
        Page {
            items: items[start.min(end)..end].to_vec(),
            next,
        }
    }

    // ── Seeding ──────────────────────────────────────────────────────────

    pub fn seed_gateway(&self, name: &str) -> GatewayId {
        self.state().add_gateway(name, true)
    }

    pub fn seed_gateway_without_root(&self, name: &str) -> GatewayId {
        self.state().add_gateway(name, false)
    }

    /// Add a routing node directly under the gateway's root
    pub fn seed_routing_node(&self, gateway: &GatewayId, path_part: &str) -> NodeId {
        let mut state = self.state();
        let root = state
            .nodes
            .get(gateway)
            .and_then(|nodes| nodes.iter().find(|n| n.is_root()).map(|n| n.id.clone()))
            .unwrap_or_else(|| panic!("gateway {} has no root", gateway));
        state
            .add_node(gateway, &root, path_part)
            .unwrap_or_else(|e| panic!("cannot seed routing node: {}", e))
    }

    pub fn seed_verb_binding(&self, gateway: &GatewayId, node: &NodeId, method: HttpMethod) {
        self.state().bindings.insert(
            (gateway.clone(), node.clone(), method),
            VerbBinding::open(method),
        );
    }

    pub fn seed_compute_unit(&self, name: &str) -> ComputeArn {
        self.state()
            .add_unit(&ComputeUnitSpec {
                name,
                role: "arn:aws:iam::000000000000:role/seed",
                runtime: "provided.al2023",
                handler: name,
                code: b"seed",
            })
            .arn
    }

    /// Fail the next call of kind `call` with `error`
    pub fn fail_next(&self, call: ProviderCall, error: ProviderError) {
        self.state().failures.push_back((call, error));
    }

    // ── Inspection ───────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn gateway_count(&self) -> usize {
        self.state().gateways.len()
    }

    pub fn gateway_named(&self, name: &str) -> Option<GatewayId> {
        self.state()
            .gateways
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.id.clone())
    }

    pub fn routing_nodes(&self, gateway: &GatewayId) -> Vec<RoutingNode> {
        self.state().nodes.get(gateway).cloned().unwrap_or_default()
    }

    pub fn root_of(&self, gateway: &GatewayId) -> Option<NodeId> {
        self.routing_nodes(gateway)
            .into_iter()
            .find(|n| n.is_root())
            .map(|n| n.id)
    }

    pub fn has_binding(&self, gateway: &GatewayId, node: &NodeId, method: HttpMethod) -> bool {
        self.state()
            .bindings
            .contains_key(&(gateway.clone(), node.clone(), method))
    }

    pub fn wiring(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> Option<BackendWiring> {
        self.state()
            .wirings
            .get(&(gateway.clone(), node.clone(), method))
            .cloned()
    }

    pub fn compute_code(&self, name: &str) -> Option<Vec<u8>> {
        self.state().units.get(name).map(|u| u.code.clone())
    }

    /// (role, runtime, handler) of a compute unit
    pub fn compute_settings(&self, name: &str) -> Option<(String, String, String)> {
        self.state()
            .units
            .get(name)
            .map(|u| (u.role.clone(), u.runtime.clone(), u.handler.clone()))
    }
}

impl ComputeService for InMemoryCloud {
    fn get_compute_unit(&self, name: &str) -> ProviderResult<ComputeUnit> {
        let state = self.enter(ProviderCall::GetComputeUnit)?;
        state
            .units
            .get(name)
            .map(|u| ComputeUnit {
                name: name.to_string(),
                arn: u.arn.clone(),
            })
            .ok_or_else(|| ProviderError::not_found(format!("function {}", name)))
    }

    fn create_compute_unit(&self, spec: &ComputeUnitSpec<'_>) -> ProviderResult<ComputeUnit> {
        let mut state = self.enter(ProviderCall::CreateComputeUnit)?;
        if state.units.contains_key(spec.name) {
            return Err(ProviderError::conflict(format!("function {}", spec.name)));
        }
        Ok(state.add_unit(spec))
    }

    fn update_compute_code(&self, name: &str, code: &[u8]) -> ProviderResult<()> {
        let mut state = self.enter(ProviderCall::UpdateComputeCode)?;
        let unit = state
            .units
            .get_mut(name)
            .ok_or_else(|| ProviderError::not_found(format!("function {}", name)))?;
        unit.code = code.to_vec();
        Ok(())
    }
}

impl RoutingService for InMemoryCloud {
    fn list_gateways(&self, position: Option<&str>) -> ProviderResult<Page<GatewaySummary>> {
        let state = self.enter(ProviderCall::ListGateways)?;
        Ok(self.paginate(&state.gateways, position))
    }

    fn create_gateway(&self, name: &str) -> ProviderResult<GatewayId> {
        let mut state = self.enter(ProviderCall::CreateGateway)?;
        Ok(state.add_gateway(name, true))
    }

    fn list_routing_nodes(
        &self,
        gateway: &GatewayId,
        position: Option<&str>,
    ) -> ProviderResult<Page<RoutingNode>> {
        let state = self.enter(ProviderCall::ListRoutingNodes)?;
        let nodes = state
            .nodes
            .get(gateway)
            .ok_or_else(|| ProviderError::not_found(format!("gateway {}", gateway)))?;
        Ok(self.paginate(nodes, position))
    }

    fn create_routing_node(
        &self,
        gateway: &GatewayId,
        parent: &NodeId,
        path_part: &str,
    ) -> ProviderResult<NodeId> {
        let mut state = self.enter(ProviderCall::CreateRoutingNode)?;
        state.add_node(gateway, parent, path_part)
    }

    fn get_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> ProviderResult<VerbBinding> {
        let state = self.enter(ProviderCall::GetVerbBinding)?;
        state
            .bindings
            .get(&(gateway.clone(), node.clone(), method))
            .copied()
            .ok_or_else(|| ProviderError::not_found(format!("method {} on {}", method, node)))
    }

    fn put_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        binding: &VerbBinding,
    ) -> ProviderResult<()> {
        let mut state = self.enter(ProviderCall::PutVerbBinding)?;
        let key = (gateway.clone(), node.clone(), binding.method);
        if state.bindings.contains_key(&key) {
            return Err(ProviderError::conflict(format!(
                "method {} on {}",
                binding.method, node
            )));
        }
        state.bindings.insert(key, *binding);
        Ok(())
    }

    fn put_backend_wiring(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
        wiring: &BackendWiring,
    ) -> ProviderResult<()> {
        let mut state = self.enter(ProviderCall::PutBackendWiring)?;
        let key = (gateway.clone(), node.clone(), method);
        if !state.bindings.contains_key(&key) {
            return Err(ProviderError::not_found(format!("method {} on {}", method, node)));
        }
        state.wirings.insert(key, wiring.clone());
        Ok(())
    }
}

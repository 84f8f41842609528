//! Provider Ports
//!
//! The remote API surface the reconciler drives: a compute service holding
//! deployed code and a routing service holding gateways, routing nodes,
//! verb bindings and backend wiring. Infrastructure provides the AWS
//! implementation and an in-memory one.
//!
//! Every call is a blocking request/response round trip.

use thiserror::Error;

use crate::domain::value_objects::{ComputeArn, GatewayId, HttpMethod, NodeId};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Classified provider failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The addressed entity does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Creation refused because the entity already exists
    #[error("{resource} already exists")]
    Conflict { resource: String },

    /// Anything else (auth, throttling, validation, transport)
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
        }
    }

    pub fn service(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// One page of a paginated listing; `next` is the position token of the
/// following page, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySummary {
    pub id: GatewayId,
    pub name: String,
}

/// A path segment in a gateway's tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    /// Leaf segment; absent on the root node
    pub path_part: Option<String>,
    /// Full path (`/`, `/orders`)
    pub path: String,
}

impl RoutingNode {
    pub const ROOT_PATH: &'static str = "/";

    pub fn is_root(&self) -> bool {
        self.path == Self::ROOT_PATH
    }

    /// Providers report both the leaf path part and the full path; a key
    /// matches if it equals either.
    pub fn matches(&self, key: &str) -> bool {
        self.path_part.as_deref() == Some(key) || self.path == key
    }

    /// Whether this node is `path_part` directly under `parent`. Path parts
    /// are only unique among siblings, so a same-named node deeper in the
    /// tree does not count.
    pub fn is_child(&self, parent: &RoutingNode, path_part: &str) -> bool {
        let full = if parent.is_root() {
            format!("/{}", path_part)
        } else {
            format!("{}/{}", parent.path, path_part)
        };
        (self.parent_id.as_ref() == Some(&parent.id) && self.path_part.as_deref() == Some(path_part))
            || self.path == full
    }
}

/// Authorization applied to a verb binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Authorization {
    /// Open endpoint. Fine-grained auth is not supported.
    #[default]
    None,
}

impl Authorization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Authorization::None => "NONE",
        }
    }
}

/// An HTTP method allowed on a routing node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbBinding {
    pub method: HttpMethod,
    pub authorization: Authorization,
}

impl VerbBinding {
    pub fn open(method: HttpMethod) -> Self {
        Self {
            method,
            authorization: Authorization::None,
        }
    }
}

/// Backend a verb binding forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Proxied invocation of a compute unit
    ProxiedCompute,
}

/// Association of a verb binding with its compute target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendWiring {
    pub kind: BackendKind,
    pub target: ComputeArn,
    /// Method used towards the backend; mirrors the binding's method
    pub upstream_method: HttpMethod,
}

impl BackendWiring {
    pub fn proxied(target: ComputeArn, method: HttpMethod) -> Self {
        Self {
            kind: BackendKind::ProxiedCompute,
            target,
            upstream_method: method,
        }
    }
}

/// A deployed compute unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeUnit {
    pub name: String,
    pub arn: ComputeArn,
}

/// Attributes needed to create a compute unit
#[derive(Debug, Clone, Copy)]
pub struct ComputeUnitSpec<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub runtime: &'a str,
    pub handler: &'a str,
    pub code: &'a [u8],
}

/// Remote service hosting deployed code
pub trait ComputeService {
    /// Fetch a compute unit by name; `NotFound` if absent
    fn get_compute_unit(&self, name: &str) -> ProviderResult<ComputeUnit>;

    /// Create a compute unit; `Conflict` if the name is taken
    fn create_compute_unit(&self, spec: &ComputeUnitSpec<'_>) -> ProviderResult<ComputeUnit>;

    /// Replace the code payload of an existing compute unit
    fn update_compute_code(&self, name: &str, code: &[u8]) -> ProviderResult<()>;
}

/// Remote service hosting gateways and their routing tree
pub trait RoutingService {
    fn list_gateways(&self, position: Option<&str>) -> ProviderResult<Page<GatewaySummary>>;

    fn create_gateway(&self, name: &str) -> ProviderResult<GatewayId>;

    fn list_routing_nodes(
        &self,
        gateway: &GatewayId,
        position: Option<&str>,
    ) -> ProviderResult<Page<RoutingNode>>;

    fn create_routing_node(
        &self,
        gateway: &GatewayId,
        parent: &NodeId,
        path_part: &str,
    ) -> ProviderResult<NodeId>;

    /// Fetch a verb binding; `NotFound` if the method is not bound
    fn get_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> ProviderResult<VerbBinding>;

    fn put_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        binding: &VerbBinding,
    ) -> ProviderResult<()>;

    /// Set the wiring of a verb binding, replacing any previous wiring
    fn put_backend_wiring(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
        wiring: &BackendWiring,
    ) -> ProviderResult<()>;
}

impl<T: ComputeService + ?Sized> ComputeService for &T {
    fn get_compute_unit(&self, name: &str) -> ProviderResult<ComputeUnit> {
        (**self).get_compute_unit(name)
    }

    fn create_compute_unit(&self, spec: &ComputeUnitSpec<'_>) -> ProviderResult<ComputeUnit> {
        (**self).create_compute_unit(spec)
    }

    fn update_compute_code(&self, name: &str, code: &[u8]) -> ProviderResult<()> {
        (**self).update_compute_code(name, code)
    }
}

impl<T: RoutingService + ?Sized> RoutingService for &T {
    fn list_gateways(&self, position: Option<&str>) -> ProviderResult<Page<GatewaySummary>> {
        (**self).list_gateways(position)
    }

    fn create_gateway(&self, name: &str) -> ProviderResult<GatewayId> {
        (**self).create_gateway(name)
    }

    fn list_routing_nodes(
        &self,
        gateway: &GatewayId,
        position: Option<&str>,
    ) -> ProviderResult<Page<RoutingNode>> {
        (**self).list_routing_nodes(gateway, position)
    }

    fn create_routing_node(
        &self,
        gateway: &GatewayId,
        parent: &NodeId,
        path_part: &str,
    ) -> ProviderResult<NodeId> {
        (**self).create_routing_node(gateway, parent, path_part)
    }

    fn get_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> ProviderResult<VerbBinding> {
        (**self).get_verb_binding(gateway, node, method)
    }

    fn put_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        binding: &VerbBinding,
    ) -> ProviderResult<()> {
        (**self).put_verb_binding(gateway, node, binding)
    }

    fn put_backend_wiring(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
        wiring: &BackendWiring,
    ) -> ProviderResult<()> {
        (**self).put_backend_wiring(gateway, node, method, wiring)
    }
}

//! Reconciler
//!
//! Create-or-reuse logic per remote entity kind. Gateway, routing node and
//! verb binding are idempotent by skip: query, reuse if present, create only
//! if absent. Backend wiring is idempotent by overwrite: it is written on
//! every call so it always targets the latest compute unit.
//!
//! `ensure_routing_published` chains the four steps strictly in order, each
//! step feeding its identifier to the next.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::entities::{PublishProgress, PublishStage};
use crate::domain::ports::{
    BackendWiring, ComputeService, ProviderError, RoutingService, VerbBinding,
};
use crate::domain::value_objects::{ComputeArn, GatewayId, HttpMethod, Lookup, LookupError, NodeId};

use super::inventory::RemoteInventory;

/// One step of the routing chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconcileStep {
    Gateway,
    RoutingNode,
    VerbBinding,
    BackendWiring,
}

impl ReconcileStep {
    /// Stage reached once this step succeeds
    pub fn completes(self) -> PublishStage {
        match self {
            ReconcileStep::Gateway => PublishStage::GatewayEnsured,
            ReconcileStep::RoutingNode => PublishStage::NodeEnsured,
            ReconcileStep::VerbBinding => PublishStage::BindingEnsured,
            ReconcileStep::BackendWiring => PublishStage::WiringSet,
        }
    }

    /// Step that reaches `stage`, if any
    pub fn reaching(stage: PublishStage) -> Option<Self> {
        match stage {
            PublishStage::ComputeCreated => None,
            PublishStage::GatewayEnsured => Some(ReconcileStep::Gateway),
            PublishStage::NodeEnsured => Some(ReconcileStep::RoutingNode),
            PublishStage::BindingEnsured => Some(ReconcileStep::VerbBinding),
            PublishStage::WiringSet => Some(ReconcileStep::BackendWiring),
        }
    }
}

impl fmt::Display for ReconcileStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReconcileStep::Gateway => "ensure gateway",
            ReconcileStep::RoutingNode => "ensure routing node",
            ReconcileStep::VerbBinding => "ensure verb binding",
            ReconcileStep::BackendWiring => "set backend wiring",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("{step}: {source}")]
    Lookup {
        step: ReconcileStep,
        #[source]
        source: LookupError,
    },

    #[error("{step}: {source}")]
    Write {
        step: ReconcileStep,
        #[source]
        source: ProviderError,
    },

    #[error("ensure routing node: gateway {gateway} has no root node")]
    MissingRoot { gateway: GatewayId },
}

impl ReconcileError {
    pub fn step(&self) -> ReconcileStep {
        match self {
            ReconcileError::Lookup { step, .. } | ReconcileError::Write { step, .. } => *step,
            ReconcileError::MissingRoot { .. } => ReconcileStep::RoutingNode,
        }
    }
}

pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Per-invocation reconciler. Resolved gateway identifiers are cached for
/// its lifetime only.
pub struct Reconciler<'a, C, R> {
    inventory: &'a RemoteInventory<C, R>,
    gateways: RefCell<HashMap<String, GatewayId>>,
}

impl<'a, C, R> Reconciler<'a, C, R>
where
    C: ComputeService,
    R: RoutingService,
{
    pub fn new(inventory: &'a RemoteInventory<C, R>) -> Self {
        Self {
            inventory,
            gateways: RefCell::new(HashMap::new()),
        }
    }

    pub fn ensure_gateway(&self, name: &str) -> ReconcileResult<GatewayId> {
        let step = ReconcileStep::Gateway;
        if let Some(id) = self.gateways.borrow().get(name) {
            return Ok(id.clone());
        }

        let id = match self.inventory.find_gateway(name) {
            Lookup::Found(id) => id,
            Lookup::NotFound => {
                let id = self
                    .inventory
                    .routing()
                    .create_gateway(name)
                    .map_err(|source| ReconcileError::Write { step, source })?;
                info!(gateway = %id, name, "created gateway");
                id
            }
            Lookup::Failed(source) => return Err(ReconcileError::Lookup { step, source }),
        };

        self.gateways
            .borrow_mut()
            .insert(name.to_string(), id.clone());
        Ok(id)
    }

    /// Ensure `path_part` exists directly under the gateway's root node.
    /// The root is resolved first and is never created.
    pub fn ensure_routing_node(
        &self,
        gateway: &GatewayId,
        path_part: &str,
    ) -> ReconcileResult<NodeId> {
        let step = ReconcileStep::RoutingNode;

        let nodes = self
            .inventory
            .routing_nodes(gateway)
            .map_err(|source| ReconcileError::Lookup { step, source })?;
        let Some(root) = nodes.iter().find(|n| n.is_root()) else {
            return Err(ReconcileError::MissingRoot {
                gateway: gateway.clone(),
            });
        };

        if let Some(node) = nodes.iter().find(|n| n.is_child(root, path_part)) {
            debug!(node = %node.id, path_part, "routing node present");
            return Ok(node.id.clone());
        }

        let id = self
            .inventory
            .routing()
            .create_routing_node(gateway, &root.id, path_part)
            .map_err(|source| ReconcileError::Write { step, source })?;
        info!(node = %id, path_part, "created routing node");
        Ok(id)
    }

    /// Bind `method` on the node with authorization disabled, unless bound
    pub fn ensure_verb_binding(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
    ) -> ReconcileResult<()> {
        let step = ReconcileStep::VerbBinding;
        match self.inventory.find_verb_binding(gateway, node, method) {
            Lookup::Found(_) => {
                debug!(%node, %method, "verb binding present");
                Ok(())
            }
            Lookup::NotFound => {
                self.inventory
                    .routing()
                    .put_verb_binding(gateway, node, &VerbBinding::open(method))
                    .map_err(|source| ReconcileError::Write { step, source })?;
                info!(%node, %method, "created verb binding");
                Ok(())
            }
            Lookup::Failed(source) => Err(ReconcileError::Lookup { step, source }),
        }
    }

    /// Point the binding at `target`. Always writes.
    pub fn ensure_backend_wiring(
        &self,
        gateway: &GatewayId,
        node: &NodeId,
        method: HttpMethod,
        target: &ComputeArn,
    ) -> ReconcileResult<()> {
        let wiring = BackendWiring::proxied(target.clone(), method);
        self.inventory
            .routing()
            .put_backend_wiring(gateway, node, method, &wiring)
            .map_err(|source| ReconcileError::Write {
                step: ReconcileStep::BackendWiring,
                source,
            })?;
        info!(%node, %method, %target, "backend wiring set");
        Ok(())
    }

    /// Drive `progress` to `WiringSet`, starting after its current stage.
    ///
    /// Identifiers recorded in `progress` are reused; missing ones are
    /// re-resolved. `on_stage` observes the progress after every completed
    /// stage. On error, `progress` holds the last completed stage.
    pub fn ensure_routing_published(
        &self,
        gateway_name: &str,
        progress: &mut PublishProgress,
        mut on_stage: impl FnMut(&PublishProgress),
    ) -> ReconcileResult<()> {
        while let Some(next) = progress.stage.next() {
            match next {
                PublishStage::GatewayEnsured => {
                    progress.gateway = Some(self.ensure_gateway(gateway_name)?);
                }
                PublishStage::NodeEnsured => {
                    let gateway = self.gateway_of(gateway_name, progress)?;
                    progress.node = Some(self.ensure_routing_node(&gateway, &progress.function)?);
                }
                PublishStage::BindingEnsured => {
                    let gateway = self.gateway_of(gateway_name, progress)?;
                    let node = self.node_of(&gateway, progress)?;
                    self.ensure_verb_binding(&gateway, &node, progress.method)?;
                }
                PublishStage::WiringSet => {
                    let gateway = self.gateway_of(gateway_name, progress)?;
                    let node = self.node_of(&gateway, progress)?;
                    self.ensure_backend_wiring(&gateway, &node, progress.method, &progress.arn)?;
                }
                // never a successor stage
                PublishStage::ComputeCreated => {}
            }
            progress.advance(next);
            on_stage(progress);
        }
        Ok(())
    }

    fn gateway_of(
        &self,
        gateway_name: &str,
        progress: &mut PublishProgress,
    ) -> ReconcileResult<GatewayId> {
        match &progress.gateway {
            Some(id) => Ok(id.clone()),
            None => {
                let id = self.ensure_gateway(gateway_name)?;
                progress.gateway = Some(id.clone());
                Ok(id)
            }
        }
    }

    fn node_of(
        &self,
        gateway: &GatewayId,
        progress: &mut PublishProgress,
    ) -> ReconcileResult<NodeId> {
        match &progress.node {
            Some(id) => Ok(id.clone()),
            None => {
                let id = self.ensure_routing_node(gateway, &progress.function)?;
                progress.node = Some(id.clone());
                Ok(id)
            }
        }
    }
}

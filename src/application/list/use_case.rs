//! List Use Case
//!
//! Local and remote listings are computed independently and may disagree
//! (a function built but never published, or a route whose function was
//! deleted locally). Neither case is an error.

use anyhow::Result;
use tracing::debug;

use crate::domain::ports::{ComputeService, FunctionRepository, RoutingService};
use crate::domain::services::{invoke_url, RemoteInventory};
use crate::domain::value_objects::{GatewayId, ProjectContext};

/// Where function names are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSource {
    /// Subdirectories of `cmd/`
    #[default]
    Local,
    /// Routing nodes under the project gateway
    Remote,
}

/// One listed function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFunction {
    pub name: String,
    /// Invoke URL; absent when the project gateway does not exist
    pub url: Option<String>,
}

pub struct ListUseCase<'a, F, C, R> {
    context: &'a ProjectContext,
    functions: F,
    inventory: &'a RemoteInventory<C, R>,
}

impl<'a, F, C, R> ListUseCase<'a, F, C, R>
where
    F: FunctionRepository,
    C: ComputeService,
    R: RoutingService,
{
    pub fn new(
        context: &'a ProjectContext,
        functions: F,
        inventory: &'a RemoteInventory<C, R>,
    ) -> Self {
        Self {
            context,
            functions,
            inventory,
        }
    }

    pub fn execute(&self, source: ListSource) -> Result<Vec<ListedFunction>> {
        match source {
            ListSource::Local => self.list_local(),
            ListSource::Remote => self.list_remote(),
        }
    }

    /// Local functions; URLs are synthesised from the gateway, not verified
    pub fn list_local(&self) -> Result<Vec<ListedFunction>> {
        let functions = self.functions.list()?;
        let gateway = self.gateway()?;

        Ok(functions
            .into_iter()
            .map(|f| ListedFunction {
                url: gateway.as_ref().map(|gw| self.url(gw, &f.name)),
                name: f.name,
            })
            .collect())
    }

    /// Path parts routed under the project gateway, root excluded
    pub fn list_remote(&self) -> Result<Vec<ListedFunction>> {
        let Some(gateway) = self.gateway()? else {
            debug!(project = %self.context.name, "no gateway; nothing published");
            return Ok(Vec::new());
        };

        let mut names: Vec<String> = self
            .inventory
            .routing_nodes(&gateway)?
            .into_iter()
            .filter(|node| !node.is_root())
            .filter_map(|node| node.path_part)
            .collect();
        names.sort();
        names.dedup();

        Ok(names
            .into_iter()
            .map(|name| ListedFunction {
                url: Some(self.url(&gateway, &name)),
                name,
            })
            .collect())
    }

    fn gateway(&self) -> Result<Option<GatewayId>> {
        Ok(self
            .inventory
            .find_gateway(&self.context.name)
            .into_result()?)
    }

    fn url(&self, gateway: &GatewayId, name: &str) -> String {
        invoke_url(gateway, &self.context.region, &self.context.stage, name)
    }
}

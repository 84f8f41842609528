//! Use Case Factory
//!
//! Loads the project and creates use cases with infrastructure dependencies
//! wired up. This is the dependency injection point for the application.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::application::{ListUseCase, PublishUseCase};
use crate::config::{self, ConfigWarning, ProjectConfig, CONFIG_FILE};
use crate::domain::ports::{ComputeService, RoutingService};
use crate::domain::services::RemoteInventory;
use crate::domain::value_objects::{HttpMethod, ProjectContext};
use crate::error::{ConfigError, GantryError, GantryResult};
use crate::infrastructure::{FsFunctionRepository, TomlJournalRepository, ZipPackager};

/// A loaded, validated project
#[derive(Debug, Clone)]
pub struct Project {
    pub config: ProjectConfig,
    pub context: ProjectContext,
    pub methods: BTreeMap<String, HttpMethod>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load `gantry.toml` under `root` and validate everything needed before
/// any provider call
pub fn load_project(root: &Path) -> Result<Project, ConfigError> {
    let root = absolute(root);
    let (config, warnings) = config::load_project(&root)?;
    let context = config.to_context(&root)?;
    let methods = config.method_overrides(&root.join(CONFIG_FILE))?;

    Ok(Project {
        config,
        context,
        methods,
        warnings,
    })
}

fn absolute(root: &Path) -> PathBuf {
    if root.is_absolute() {
        return root.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(root))
        .unwrap_or_else(|_| root.to_path_buf())
}

pub fn create_function_repository(project: &Project) -> FsFunctionRepository {
    FsFunctionRepository::new(&project.context.root).with_methods(project.methods.clone())
}

/// Type alias for a publish use case over a borrowed provider
pub type ConcretePublishUseCase<'a, T> =
    PublishUseCase<&'a T, &'a T, ZipPackager, TomlJournalRepository>;

/// Create a publish use case against `cloud`, journaling to the project's
/// `.gantry/publish.lock`
pub fn create_publish_use_case<'a, T>(project: &Project, cloud: &'a T) -> ConcretePublishUseCase<'a, T>
where
    T: ComputeService + RoutingService,
{
    PublishUseCase::new(
        project.context.clone(),
        RemoteInventory::new(cloud, cloud),
        ZipPackager::new(),
        TomlJournalRepository::for_project(&project.context.root),
    )
}

/// Create a list use case over an inventory owned by the caller
pub fn create_list_use_case<'a, C, R>(
    project: &'a Project,
    inventory: &'a RemoteInventory<C, R>,
) -> ListUseCase<'a, FsFunctionRepository, C, R>
where
    C: ComputeService,
    R: RoutingService,
{
    ListUseCase::new(&project.context, create_function_repository(project), inventory)
}

/// Connect to AWS in the project's region
#[cfg(feature = "aws")]
pub fn connect(project: &Project) -> GantryResult<crate::infrastructure::providers::AwsCloud> {
    crate::infrastructure::providers::AwsCloud::connect(project.context.region.clone()).map_err(
        |e| GantryError::ProviderInit {
            message: e.to_string(),
        },
    )
}

#[cfg(not(feature = "aws"))]
pub fn connect(_project: &Project) -> GantryResult<crate::infrastructure::InMemoryCloud> {
    Err(GantryError::ProviderInit {
        message: "gantry was built without the `aws` feature".to_string(),
    })
}

//! Publish Use Case
//!
//! Per function, decides between two paths:
//! 1. Update: the compute unit exists, so only its code is replaced. Routing
//!    is not re-verified unless the journal holds an unfinished publish, in
//!    which case routing resumes from the last completed stage.
//! 2. Create: the compute unit is absent. Requires an execution role, then
//!    creates the unit and its routing (gateway, node, binding, wiring),
//!    journaling every completed stage.
//!
//! Functions are processed one after another; a failure stops only the
//! failing function.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::{Function, PublishOutcome, PublishPath, PublishProgress, PublishStage};
use crate::domain::ports::{
    Archive, ComputeService, ComputeUnitSpec, NoopEventSink, Packager, PublishEvent,
    PublishEventSink, PublishJournal, RoutingService,
};
use crate::domain::services::{invoke_url, Reconciler, RemoteInventory};
use crate::domain::value_objects::{ComputeArn, HttpMethod, Lookup, ProjectContext};
use crate::error::ConfigError;

use super::error::PublishError;
use super::options::PublishOptions;
use super::result::{FunctionReport, PublishReport};

/// Publish use case, parameterized by its ports
pub struct PublishUseCase<C, R, P, J> {
    context: ProjectContext,
    inventory: RemoteInventory<C, R>,
    packager: P,
    journal: J,
}

/// Per-batch state shared by every function
struct Run<'a, C, R> {
    reconciler: Reconciler<'a, C, R>,
    sink: Arc<dyn PublishEventSink>,
    detailed: bool,
}

impl<C, R, P, J> PublishUseCase<C, R, P, J>
where
    C: ComputeService,
    R: RoutingService,
    P: Packager,
    J: PublishJournal,
{
    pub fn new(
        context: ProjectContext,
        inventory: RemoteInventory<C, R>,
        packager: P,
        journal: J,
    ) -> Self {
        Self {
            context,
            inventory,
            packager,
            journal,
        }
    }

    pub fn context(&self) -> &ProjectContext {
        &self.context
    }

    pub fn inventory(&self) -> &RemoteInventory<C, R> {
        &self.inventory
    }

    /// Publish `functions` silently
    pub fn execute(&self, functions: &[Function], options: &PublishOptions) -> PublishReport {
        self.execute_with_events(functions, options, Arc::new(NoopEventSink))
    }

    /// Publish `functions`, reporting progress to `sink`
    pub fn execute_with_events(
        &self,
        functions: &[Function],
        options: &PublishOptions,
        sink: Arc<dyn PublishEventSink>,
    ) -> PublishReport {
        let run = Run {
            reconciler: Reconciler::new(&self.inventory),
            detailed: sink.wants_detailed_events(),
            sink,
        };
        let mut report = PublishReport::new(&self.context.name, options.strict);

        run.sink.on_event(PublishEvent::Started {
            project: self.context.name.clone(),
            function_count: functions.len(),
        });

        for function in functions {
            let method = options.method.unwrap_or(function.method);
            run.sink.on_event(PublishEvent::FunctionStarted {
                function: function.name.clone(),
                method,
            });

            let mut path = None;
            let result = self.publish_function(&run, function, method, &mut path);

            match &result {
                Ok(outcome) => {
                    info!(function = %function.name, outcome = outcome.label(), "published");
                    run.sink.on_event(PublishEvent::FunctionPublished {
                        function: function.name.clone(),
                        outcome: outcome.clone(),
                    });
                }
                Err(err) => {
                    debug!(function = %function.name, error = %err, "publish failed");
                    run.sink.on_event(PublishEvent::FunctionFailed {
                        function: function.name.clone(),
                        error: err.to_string(),
                    });
                }
            }

            report.functions.push(FunctionReport {
                function: function.name.clone(),
                method,
                path,
                result,
            });
        }

        run.sink.on_event(PublishEvent::Completed {
            published: report.published(),
            failed: report.failed(),
        });
        report
    }

    fn publish_function(
        &self,
        run: &Run<'_, C, R>,
        function: &Function,
        method: HttpMethod,
        path: &mut Option<PublishPath>,
    ) -> Result<PublishOutcome, PublishError> {
        let existing = match self.inventory.find_compute_unit(&function.name) {
            Lookup::Found(unit) => Some(unit.arn),
            Lookup::NotFound => None,
            Lookup::Failed(err) => return Err(err.into()),
        };

        match existing {
            Some(arn) => self.update(run, function, arn, path),
            None => self.create(run, function, method, path),
        }
    }

    fn update(
        &self,
        run: &Run<'_, C, R>,
        function: &Function,
        arn: ComputeArn,
        path: &mut Option<PublishPath>,
    ) -> Result<PublishOutcome, PublishError> {
        let pending = self.pending(&function.name);
        let chosen = match &pending {
            Some(progress) => PublishPath::Resume {
                from: progress.stage,
            },
            None => PublishPath::Update,
        };
        self.choose(run, function, chosen, path);

        let archive = self.package(run, function)?;
        self.inventory
            .compute()
            .update_compute_code(&function.name, &archive.bytes)
            .map_err(|source| PublishError::Compute {
                operation: "update",
                function: function.name.clone(),
                source,
            })?;

        let Some(mut progress) = pending else {
            return Ok(PublishOutcome::Updated { arn });
        };

        let from = progress.stage;
        progress.arn = arn;
        info!(function = %function.name, %from, "resuming routing");
        self.route(run, &mut progress)?;

        Ok(PublishOutcome::Resumed {
            url: self.url_of(&progress),
            arn: progress.arn,
            from,
        })
    }

    fn create(
        &self,
        run: &Run<'_, C, R>,
        function: &Function,
        method: HttpMethod,
        path: &mut Option<PublishPath>,
    ) -> Result<PublishOutcome, PublishError> {
        let role = self
            .context
            .role
            .as_deref()
            .ok_or_else(|| ConfigError::MissingRole {
                function: function.name.clone(),
            })?;
        self.choose(run, function, PublishPath::Create, path);

        let archive = self.package(run, function)?;
        let spec = ComputeUnitSpec {
            name: &function.name,
            role,
            runtime: &self.context.runtime,
            handler: self.context.handler_for(&function.name),
            code: &archive.bytes,
        };

        let unit = self
            .inventory
            .compute()
            .create_compute_unit(&spec)
            .map_err(|source| {
                if source.is_conflict() {
                    PublishError::Conflict {
                        function: function.name.clone(),
                    }
                } else {
                    PublishError::Compute {
                        operation: "create",
                        function: function.name.clone(),
                        source,
                    }
                }
            })?;

        let mut progress = PublishProgress::compute_created(&function.name, method, unit.arn);
        self.observe(run, &progress);
        self.route(run, &mut progress)?;

        Ok(PublishOutcome::Created {
            url: self.url_of(&progress),
            arn: progress.arn,
        })
    }

    /// Run the routing chain from `progress`, journaling every stage; the
    /// journal entry is dropped once wiring is set
    fn route(&self, run: &Run<'_, C, R>, progress: &mut PublishProgress) -> Result<(), PublishError> {
        run.reconciler
            .ensure_routing_published(&self.context.name, progress, |p| self.observe(run, p))
            .map_err(|source| PublishError::Partial {
                function: progress.function.clone(),
                completed: progress.stage,
                source,
            })?;

        if let Err(err) = self.journal.clear(&progress.function) {
            warn!(function = %progress.function, error = %err, "cannot clear publish journal");
        }
        Ok(())
    }

    /// Record a completed stage
    fn observe(&self, run: &Run<'_, C, R>, progress: &PublishProgress) {
        if progress.stage != PublishStage::WiringSet {
            if let Err(err) = self.journal.record(progress) {
                warn!(function = %progress.function, stage = %progress.stage, error = %err, "cannot write publish journal");
            }
        }
        if run.detailed {
            run.sink.on_event(PublishEvent::StageCompleted {
                function: progress.function.clone(),
                stage: progress.stage,
            });
        }
    }

    fn pending(&self, function: &str) -> Option<PublishProgress> {
        match self.journal.pending(function) {
            Ok(pending) => pending,
            Err(err) => {
                warn!(function, error = %err, "cannot read publish journal");
                None
            }
        }
    }

    fn choose(
        &self,
        run: &Run<'_, C, R>,
        function: &Function,
        chosen: PublishPath,
        path: &mut Option<PublishPath>,
    ) {
        info!(function = %function.name, path = %chosen, "publishing");
        *path = Some(chosen);
        run.sink.on_event(PublishEvent::PathChosen {
            function: function.name.clone(),
            path: chosen,
        });
    }

    fn package(&self, run: &Run<'_, C, R>, function: &Function) -> Result<Archive, PublishError> {
        let entry = self.context.handler_for(&function.name);
        let archive = self.packager.package(function, entry)?;
        if run.detailed {
            run.sink.on_event(PublishEvent::Packaged {
                function: function.name.clone(),
                bytes: archive.len(),
                sha256: archive.sha256.clone(),
            });
        }
        Ok(archive)
    }

    fn url_of(&self, progress: &PublishProgress) -> Option<String> {
        progress.gateway.as_ref().map(|gateway| {
            invoke_url(
                gateway,
                &self.context.region,
                &self.context.stage,
                &progress.function,
            )
        })
    }
}

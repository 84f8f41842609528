use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use gantry::application::PublishOptions;
use gantry::domain::entities::Function;
use gantry::domain::ports::{FunctionRepository, PublishEventSink};
use gantry::domain::value_objects::HttpMethod;
use gantry::infrastructure::{ConsoleEventSink, FsFunctionRepository, JsonEventSink};
use gantry::presentation::factory;

#[derive(Debug, Clone, Default)]
pub struct PublishArgs {
    pub names: Vec<String>,
    pub all: bool,
    pub method: Option<HttpMethod>,
    pub strict: bool,
}

fn select(repo: &FsFunctionRepository, args: &PublishArgs) -> Result<Vec<Function>> {
    if args.all || args.names.is_empty() {
        return repo.list();
    }
    args.names.iter().map(|name| repo.get(name)).collect()
}

pub fn run(root: &Path, args: PublishArgs, json: bool, verbose: u8) -> Result<i32> {
    let project = factory::load_project(root)?;
    super::print_config_warnings(&project);

    let repo = factory::create_function_repository(&project);
    let functions = select(&repo, &args)?;
    if functions.is_empty() {
        if !json {
            println!("No functions found under {}", repo.source_dir().display());
        }
        return Ok(0);
    }

    let cloud = factory::connect(&project)?;
    let use_case = factory::create_publish_use_case(&project, &cloud);

    let options = PublishOptions {
        method: args.method,
        strict: args.strict || project.config.strict,
    };
    let sink: Arc<dyn PublishEventSink> = if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(verbose > 0))
    };

    let report = use_case.execute_with_events(&functions, &options, sink);
    Ok(report.exit_code())
}

//! Scenario: publishing again after a successful publish.

use gantry::application::PublishOptions;
use gantry::domain::entities::{PublishOutcome, PublishPath};
use gantry::domain::ports::FunctionRepository;
use gantry::infrastructure::{InMemoryCloud, ProviderCall};
use gantry::presentation::factory;

use crate::common::*;

#[test]
fn republish_replaces_code_and_leaves_routing_alone() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let repo = factory::create_function_repository(&loaded);
    let cloud = InMemoryCloud::new();

    factory::create_publish_use_case(&loaded, &cloud)
        .execute(&repo.list().unwrap(), &PublishOptions::new());
    let first_code = cloud.compute_code("orders").unwrap();

    project.write("bin/orders", "a newer build of orders");
    cloud.clear_calls();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&repo.list().unwrap(), &PublishOptions::new());

    let entry = report.get("orders").unwrap();
    assert_eq!(entry.path, Some(PublishPath::Update));
    assert!(matches!(entry.outcome(), Some(PublishOutcome::Updated { .. })));
    assert_ne!(cloud.compute_code("orders").unwrap(), first_code);

    assert_eq!(
        cloud.calls(),
        vec![ProviderCall::GetComputeUnit, ProviderCall::UpdateComputeCode]
    );
}

#[test]
fn update_needs_no_role() {
    let project = TestProject::with_config(NO_ROLE_CONFIG);
    project.add_function("orders");

    let cloud = InMemoryCloud::new();
    cloud.seed_compute_unit("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert!(report.is_success());
    assert_eq!(
        report.get("orders").unwrap().path,
        Some(PublishPath::Update)
    );
}

#[test]
fn batch_shares_one_gateway_and_isolates_failures() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders").add_function("users");
    // Source without a built binary
    project.write("cmd/broken/main.go", "package main\n");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    assert_eq!(
        functions.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        vec!["broken", "orders", "users"]
    );
    let cloud = InMemoryCloud::new();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert_eq!(report.published(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(cloud.gateway_count(), 1);
    assert!(cloud.compute_code("broken").is_none());

    let strict = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new().with_strict(true));
    assert_eq!(strict.exit_code(), 1);
}

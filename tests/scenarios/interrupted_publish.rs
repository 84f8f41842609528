//! Scenario: a create-path publish is interrupted mid-routing and resumed
//! by the next run.

use gantry::application::{PublishError, PublishOptions};
use gantry::domain::entities::{PublishOutcome, PublishPath, PublishStage};
use gantry::domain::ports::{FunctionRepository, ProviderError, PublishJournal};
use gantry::domain::value_objects::HttpMethod;
use gantry::infrastructure::{InMemoryCloud, ProviderCall, TomlJournalRepository};
use gantry::presentation::factory;

use crate::common::*;

#[test]
fn interrupted_publish_resumes_from_journal() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    let cloud = InMemoryCloud::new();

    cloud.fail_next(
        ProviderCall::PutBackendWiring,
        ProviderError::service("PutIntegration", "throttled"),
    );
    let first = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    match first.get("orders").unwrap().error() {
        Some(PublishError::Partial { completed, .. }) => {
            assert_eq!(*completed, PublishStage::BindingEnsured)
        }
        other => panic!("expected partial publish, got {:?}", other),
    }

    // The journal survives on disk between runs
    assert!(project.journal_path().exists());
    let journal = TomlJournalRepository::for_project(project.root());
    let pending = journal.pending("orders").unwrap().unwrap();
    assert_eq!(pending.stage, PublishStage::BindingEnsured);
    assert!(pending.gateway.is_some());
    assert!(pending.node.is_some());

    cloud.clear_calls();
    let second = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    let entry = second.get("orders").unwrap();
    assert_eq!(
        entry.path,
        Some(PublishPath::Resume {
            from: PublishStage::BindingEnsured
        })
    );
    assert!(matches!(
        entry.outcome(),
        Some(PublishOutcome::Resumed { url: Some(_), .. })
    ));

    let calls = cloud.calls();
    assert!(calls.contains(&ProviderCall::UpdateComputeCode));
    assert!(!calls.contains(&ProviderCall::CreateComputeUnit));
    assert!(!calls.contains(&ProviderCall::CreateGateway));
    assert!(!calls.contains(&ProviderCall::PutVerbBinding));

    let gateway = cloud.gateway_named("shop").unwrap();
    let node = pending.node.unwrap();
    assert!(cloud.wiring(&gateway, &node, HttpMethod::Get).is_some());
    assert!(!project.journal_path().exists());
}

#[test]
fn unrelated_journal_entries_survive_a_successful_publish() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders").add_function("users");

    let loaded = factory::load_project(project.root()).unwrap();
    let repo = factory::create_function_repository(&loaded);
    let cloud = InMemoryCloud::new();

    cloud.fail_next(
        ProviderCall::CreateRoutingNode,
        ProviderError::service("CreateResource", "throttled"),
    );
    let orders = repo.get("orders").unwrap();
    factory::create_publish_use_case(&loaded, &cloud)
        .execute(&[orders], &PublishOptions::new());

    let users = repo.get("users").unwrap();
    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&[users], &PublishOptions::new());
    assert!(report.is_success());

    let journal = TomlJournalRepository::for_project(project.root());
    assert_eq!(
        journal.pending("orders").unwrap().unwrap().stage,
        PublishStage::GatewayEnsured
    );
    assert!(journal.pending("users").unwrap().is_none());
}

//! Scenario: a project is published for the first time.

use std::io::{Cursor, Read};

use gantry::application::{PublishError, PublishOptions};
use gantry::domain::entities::{PublishOutcome, PublishPath};
use gantry::domain::ports::{FunctionRepository, RoutingService};
use gantry::domain::value_objects::HttpMethod;
use gantry::infrastructure::{InMemoryCloud, ProviderCall};
use gantry::presentation::factory;
use gantry::ConfigError;

use crate::common::*;

#[test]
fn first_publish_creates_compute_and_routing() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    let cloud = InMemoryCloud::new();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert!(report.is_success());
    let entry = report.get("orders").unwrap();
    assert_eq!(entry.path, Some(PublishPath::Create));

    let gateway = cloud.gateway_named("shop").expect("project gateway");
    let url = entry.outcome().unwrap().url().unwrap().to_string();
    assert_eq!(
        url,
        format!(
            "https://{}.execute-api.eu-west-1.amazonaws.com/default/orders",
            gateway
        )
    );

    let node = cloud
        .routing_nodes(&gateway)
        .into_iter()
        .find(|n| n.path_part.as_deref() == Some("orders"))
        .expect("routing node for orders");
    assert_eq!(node.path, "/orders");
    assert!(cloud.has_binding(&gateway, &node.id, HttpMethod::Get));

    let wiring = cloud.wiring(&gateway, &node.id, HttpMethod::Get).unwrap();
    assert_eq!(&wiring.target, entry.outcome().unwrap().arn());

    // Nothing left to resume
    assert!(!project.journal_path().exists());
}

#[test]
fn uploaded_code_is_a_bootstrap_zip_holding_the_binary() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    let cloud = InMemoryCloud::new();

    factory::create_publish_use_case(&loaded, &cloud).execute(&functions, &PublishOptions::new());

    let code = cloud.compute_code("orders").unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(code)).unwrap();
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_name("bootstrap").unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    assert_eq!(content, "binary of orders");

    let (role, runtime, handler) = cloud.compute_settings("orders").unwrap();
    assert_eq!(role, "arn:aws:iam::123456789012:role/shop-exec");
    assert_eq!(runtime, "provided.al2023");
    assert_eq!(handler, "bootstrap");
}

#[test]
fn declared_method_is_used_unless_overridden() {
    let project = TestProject::with_config(&format!(
        "{}\n[functions.orders]\nmethod = \"post\"\n",
        FULL_CONFIG
    ));
    project.add_function("orders").add_function("users");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    let cloud = InMemoryCloud::new();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert_eq!(report.get("orders").unwrap().method, HttpMethod::Post);
    assert_eq!(report.get("users").unwrap().method, HttpMethod::Get);

    let other = TestProject::with_config(FULL_CONFIG);
    other.add_function("orders");
    let loaded = factory::load_project(other.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    let cloud = InMemoryCloud::new();

    let report = factory::create_publish_use_case(&loaded, &cloud).execute(
        &functions,
        &PublishOptions::new().with_method(HttpMethod::Delete),
    );

    assert_eq!(report.get("orders").unwrap().method, HttpMethod::Delete);
}

#[test]
fn missing_role_stops_creation_before_any_write() {
    let project = TestProject::with_config(NO_ROLE_CONFIG);
    project.add_function("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();
    let cloud = InMemoryCloud::new();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    let err = report.get("orders").unwrap().error().unwrap();
    assert!(matches!(
        err,
        PublishError::Config(ConfigError::MissingRole { function }) if function == "orders"
    ));
    assert!(cloud.calls().iter().all(|c| !c.is_write()));
    assert_eq!(cloud.calls(), vec![ProviderCall::GetComputeUnit]);
}

#[test]
fn existing_gateway_with_similar_names_is_matched_exactly() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let cloud = InMemoryCloud::new().with_page_size(1);
    cloud.seed_gateway("shop-staging");
    cloud.seed_gateway("myshop");
    let existing = cloud.seed_gateway("shop");
    cloud.seed_gateway("shop2");

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert!(report.is_success());
    assert_eq!(cloud.gateway_count(), 4);
    assert!(!cloud.calls().contains(&ProviderCall::CreateGateway));
    match report.get("orders").unwrap().outcome().unwrap() {
        PublishOutcome::Created { url, .. } => {
            assert!(url.as_deref().unwrap().starts_with(&format!("https://{}.", existing)));
        }
        other => panic!("expected created, got {:?}", other),
    }
}

#[test]
fn routing_left_by_an_earlier_tool_is_reused() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let cloud = InMemoryCloud::new();
    let gateway = cloud.seed_gateway("shop");
    let node = cloud.seed_routing_node(&gateway, "orders");
    cloud.seed_verb_binding(&gateway, &node, HttpMethod::Get);

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert!(report.is_success());
    let calls = cloud.calls();
    assert!(!calls.contains(&ProviderCall::CreateGateway));
    assert!(!calls.contains(&ProviderCall::CreateRoutingNode));
    assert!(!calls.contains(&ProviderCall::PutVerbBinding));
    assert!(cloud.wiring(&gateway, &node, HttpMethod::Get).is_some());
}

#[test]
fn same_named_nested_route_is_not_taken_over() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders");

    let cloud = InMemoryCloud::new();
    let gateway = cloud.seed_gateway("shop");
    let v1 = cloud.seed_routing_node(&gateway, "v1");
    let nested = cloud.create_routing_node(&gateway, &v1, "orders").unwrap();

    let loaded = factory::load_project(project.root()).unwrap();
    let functions = factory::create_function_repository(&loaded).list().unwrap();

    let report = factory::create_publish_use_case(&loaded, &cloud)
        .execute(&functions, &PublishOptions::new());

    assert!(report.is_success());
    let top = cloud
        .routing_nodes(&gateway)
        .into_iter()
        .find(|n| n.path == "/orders")
        .expect("/orders created under root");
    assert!(cloud.wiring(&gateway, &top.id, HttpMethod::Get).is_some());
    assert!(cloud.wiring(&gateway, &nested, HttpMethod::Get).is_none());
}

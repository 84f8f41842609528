//! Scenario: listing functions locally and remotely.

use gantry::application::{ListSource, PublishOptions};
use gantry::domain::ports::FunctionRepository;
use gantry::domain::services::RemoteInventory;
use gantry::infrastructure::InMemoryCloud;
use gantry::presentation::factory;
use gantry::presentation::output::render_listing;

use crate::common::*;

#[test]
fn local_listing_before_any_publish_has_no_urls() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("users").add_function("orders");

    let loaded = factory::load_project(project.root()).unwrap();
    let cloud = InMemoryCloud::new();
    let inventory = RemoteInventory::new(&cloud, &cloud);

    let listed = factory::create_list_use_case(&loaded, &inventory)
        .execute(ListSource::Local)
        .unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "orders");
    assert!(listed.iter().all(|f| f.url.is_none()));
    assert!(render_listing(&listed).contains("(not published)"));
}

#[test]
fn local_and_remote_listings_may_disagree() {
    let project = TestProject::with_config(FULL_CONFIG);
    project.add_function("orders").add_function("users");

    let loaded = factory::load_project(project.root()).unwrap();
    let repo = factory::create_function_repository(&loaded);
    let cloud = InMemoryCloud::new().with_page_size(1);

    let orders = repo.get("orders").unwrap();
    factory::create_publish_use_case(&loaded, &cloud)
        .execute(&[orders], &PublishOptions::new());

    let gateway = cloud.gateway_named("shop").unwrap();
    cloud.seed_routing_node(&gateway, "legacy");

    let inventory = RemoteInventory::new(&cloud, &cloud);
    let lister = factory::create_list_use_case(&loaded, &inventory);

    let local = lister.execute(ListSource::Local).unwrap();
    let local_names: Vec<_> = local.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(local_names, vec!["orders", "users"]);
    // Local URLs are synthesised once the gateway exists
    assert!(local.iter().all(|f| f.url.is_some()));

    let remote = lister.execute(ListSource::Remote).unwrap();
    let remote_names: Vec<_> = remote.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(remote_names, vec!["legacy", "orders"]);
    assert_eq!(
        remote[1].url.as_deref(),
        Some(
            format!(
                "https://{}.execute-api.eu-west-1.amazonaws.com/default/orders",
                gateway
            )
            .as_str()
        )
    );
}

#[test]
fn remote_listing_without_gateway_is_empty() {
    let project = TestProject::with_config(FULL_CONFIG);

    let loaded = factory::load_project(project.root()).unwrap();
    let cloud = InMemoryCloud::new();
    let inventory = RemoteInventory::new(&cloud, &cloud);

    let listed = factory::create_list_use_case(&loaded, &inventory)
        .execute(ListSource::Remote)
        .unwrap();

    assert!(listed.is_empty());
    assert_eq!(render_listing(&listed), "No functions found.\n");
}

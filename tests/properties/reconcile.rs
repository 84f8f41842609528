//! Property tests for the routing reconciler.

use proptest::prelude::*;

use gantry::domain::entities::{PublishProgress, PublishStage};
use gantry::domain::services::{Reconciler, RemoteInventory};
use gantry::domain::value_objects::{ComputeArn, HttpMethod};
use gantry::infrastructure::{InMemoryCloud, ProviderCall};

fn function_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap()
}

fn method() -> impl Strategy<Value = HttpMethod> {
    proptest::sample::select(HttpMethod::ALL.to_vec())
}

fn stage() -> impl Strategy<Value = PublishStage> {
    proptest::sample::select(vec![
        PublishStage::ComputeCreated,
        PublishStage::GatewayEnsured,
        PublishStage::NodeEnsured,
        PublishStage::BindingEnsured,
    ])
}

fn arn(name: &str) -> ComputeArn {
    ComputeArn::new(format!("arn:aws:lambda:eu-west-1:123456789012:function:{}", name))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Publishing the routing of already-routed functions makes no writes.
    #[test]
    fn property_second_routing_publish_writes_nothing(
        names in proptest::collection::btree_set(function_name(), 1..=5),
        method in method(),
        page_size in 1usize..=4,
    ) {
        let cloud = InMemoryCloud::new().with_page_size(page_size);
        let inventory = RemoteInventory::new(&cloud, &cloud);

        for name in &names {
            let mut progress = PublishProgress::compute_created(name.as_str(), method, arn(name));
            Reconciler::new(&inventory)
                .ensure_routing_published("shop", &mut progress, |_| {})
                .unwrap();
            prop_assert!(progress.is_complete());
        }
        let nodes_after_first = cloud
            .gateway_named("shop")
            .map(|gw| cloud.routing_nodes(&gw).len());

        cloud.clear_calls();
        for name in &names {
            let mut progress = PublishProgress::compute_created(name.as_str(), method, arn(name));
            Reconciler::new(&inventory)
                .ensure_routing_published("shop", &mut progress, |_| {})
                .unwrap();
        }

        // Wiring is a put and always rewritten; nothing else is
        let writes: Vec<_> = cloud
            .calls()
            .into_iter()
            .filter(|c| c.is_write())
            .filter(|c| *c != ProviderCall::PutBackendWiring)
            .collect();
        prop_assert!(writes.is_empty(), "unexpected writes: {:?}", writes);
        prop_assert_eq!(cloud.gateway_count(), 1);
        prop_assert_eq!(
            cloud.gateway_named("shop").map(|gw| cloud.routing_nodes(&gw).len()),
            nodes_after_first
        );
    }

    /// PROPERTY: Resuming from any stage completes the chain and observes
    /// every later stage exactly once, in order.
    #[test]
    fn property_resume_observes_remaining_stages_in_order(
        name in function_name(),
        method in method(),
        from in stage(),
    ) {
        let cloud = InMemoryCloud::new();
        let inventory = RemoteInventory::new(&cloud, &cloud);

        // Snapshot the progress a publish interrupted right after `from` would leave
        let mut progress = PublishProgress::compute_created(name.as_str(), method, arn(&name));
        if from != PublishStage::ComputeCreated {
            let mut snapshot = None;
            let mut full = progress.clone();
            Reconciler::new(&inventory)
                .ensure_routing_published("shop", &mut full, |p| {
                    if p.stage == from {
                        snapshot = Some(p.clone());
                    }
                })
                .unwrap();
            progress = snapshot.unwrap();
        }

        let mut observed = Vec::new();
        Reconciler::new(&inventory)
            .ensure_routing_published("shop", &mut progress, |p| observed.push(p.stage))
            .unwrap();

        let mut expected = Vec::new();
        let mut stage = from;
        while let Some(next) = stage.next() {
            expected.push(next);
            stage = next;
        }
        prop_assert_eq!(observed, expected);
        prop_assert!(progress.is_complete());
    }
}

//! Property tests for gateway lookup by name.

use proptest::prelude::*;

use gantry::domain::services::RemoteInventory;
use gantry::domain::value_objects::Lookup;
use gantry::infrastructure::InMemoryCloud;

fn gateway_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,11}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A gateway is found only under its exact name, never under a
    /// name it merely contains or prefixes, on any page size.
    #[test]
    fn property_gateway_lookup_matches_exactly(
        name in gateway_name(),
        prefix in "[a-z]{0,3}",
        suffix in "[a-z0-9-]{0,3}",
        seed_target in any::<bool>(),
        page_size in 1usize..=3,
    ) {
        let cloud = InMemoryCloud::new().with_page_size(page_size);
        let decoy = format!("{}{}{}", prefix, name, suffix);
        if decoy != name {
            cloud.seed_gateway(&decoy);
        }
        let target = seed_target.then(|| cloud.seed_gateway(&name));
        cloud.seed_gateway(&format!("{}-other", name));

        let inventory = RemoteInventory::new(&cloud, &cloud);
        match (inventory.find_gateway(&name), target) {
            (Lookup::Found(found), Some(expected)) => prop_assert_eq!(found, expected),
            (Lookup::NotFound, None) => {}
            (other, expected) => prop_assert!(
                false,
                "lookup of {:?} gave {:?}, expected {:?}",
                name,
                other,
                expected
            ),
        }
    }
}

//! Property tests for HTTP method parsing.

use proptest::prelude::*;

use gantry::domain::value_objects::HttpMethod;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Method parsing ignores case.
    #[test]
    fn property_method_parse_ignores_case(
        method in proptest::sample::select(HttpMethod::ALL.to_vec()),
        mask in proptest::collection::vec(any::<bool>(), 7),
    ) {
        let mixed: String = method
            .as_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();

        prop_assert_eq!(mixed.parse::<HttpMethod>().unwrap(), method);
    }

    /// PROPERTY: Parsing arbitrary text never panics.
    #[test]
    fn property_method_parse_never_panics(input in "(?s).{0,16}") {
        let _ = input.parse::<HttpMethod>();
    }
}

mod common;

use common::builders::{actual_request, engine, preflight_request};
use common::headers::{has_header, header_value, vary_values};
use cors_engine_rs::constants::header;
use cors_engine_rs::{Headers, normalize_upper, vary_header};
use proptest::prelude::*;

fn subdomain_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9]{1,12}", 1..4).prop_map(|labels| labels.join("."))
}

fn origin_strategy() -> impl Strategy<Value = String> {
    ("https?", "[a-z0-9.-]{1,24}").prop_map(|(scheme, host)| format!("{scheme}://{host}"))
}

fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,15}"
}

proptest! {
    #[test]
    fn wildcard_pattern_accepts_any_subdomain_chain(subdomain in subdomain_strategy()) {
        let engine = engine().origins(["*.example.com"]).build();
        let origin = format!("https://{subdomain}.example.com");

        let headers = actual_request().origin(origin.as_str()).check(&engine);

        prop_assert_eq!(
            header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(origin.as_str())
        );
        prop_assert_eq!(vary_values(&headers), vec![header::ORIGIN.to_string()]);
    }

    #[test]
    fn any_origin_without_credentials_always_sends_wildcard(origin in origin_strategy()) {
        let engine = engine().origins(["*"]).build();

        let headers = actual_request().origin(origin).check(&engine);

        prop_assert_eq!(header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
        prop_assert!(!has_header(&headers, header::VARY));
    }

    #[test]
    fn single_origin_ignores_request_origin(origin in origin_strategy()) {
        let engine = engine().origins(["http://a.test"]).credentials(true).build();

        let headers = actual_request().origin(origin).check(&engine);

        prop_assert_eq!(
            header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("http://a.test")
        );
        prop_assert!(!has_header(&headers, header::VARY));
    }

    #[test]
    fn disallowed_origin_never_receives_credentials(subdomain in subdomain_strategy()) {
        let engine = engine()
            .origins(["http://a.test", "https://*.allowed.test"])
            .credentials(true)
            .build();
        let origin = format!("https://{subdomain}.denied.test");

        let actual = actual_request().origin(origin.as_str()).check(&engine);
        let preflight = preflight_request()
            .origin(origin.as_str())
            .request_method("GET")
            .check(&engine);

        prop_assert!(!has_header(&actual, header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
        prop_assert!(!has_header(&preflight.headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS));
    }

    #[test]
    fn reflected_method_is_uppercased(method in token_strategy()) {
        let engine = engine().origins(["*"]).methods(["*"]).build();

        let preflight = preflight_request()
            .origin("https://prop.test")
            .request_method(method.as_str())
            .check(&engine);

        let expected = normalize_upper(&method);
        prop_assert_eq!(
            header_value(&preflight.headers, header::ACCESS_CONTROL_ALLOW_METHODS),
            Some(expected.as_str())
        );
    }

    #[test]
    fn preflight_varies_on_request_method_once(
        method in token_strategy(),
        any_methods in any::<bool>(),
        credentials in any::<bool>(),
    ) {
        let methods = if any_methods { vec!["*"] } else { vec!["GET", "POST"] };
        let engine = engine()
            .origins(["https://*.prop.test"])
            .methods(methods)
            .credentials(credentials)
            .build();

        let preflight = preflight_request()
            .origin("https://a.prop.test")
            .request_method(method)
            .check(&engine);

        let count = vary_values(&preflight.headers)
            .iter()
            .filter(|value| value.as_str() == header::ACCESS_CONTROL_REQUEST_METHOD)
            .count();
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn vary_merge_keeps_each_name_once_in_first_position(
        names in prop::collection::vec(token_strategy(), 1..8),
    ) {
        let mut headers = Headers::new();
        for name in &names {
            vary_header(&mut headers, name);
        }
        for name in &names {
            vary_header(&mut headers, name);
        }

        let mut expected: Vec<String> = Vec::new();
        for name in &names {
            if !expected.contains(name) {
                expected.push(name.clone());
            }
        }
        prop_assert_eq!(vary_values(&headers), expected);
    }
}

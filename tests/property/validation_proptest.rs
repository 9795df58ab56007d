//! Property-based tests for join and limit rules
//!
//! Uses proptest to generate random inputs and verify properties

use axum::http::StatusCode;
use proptest::prelude::*;
use roomchat::shared::validation::{parse_limit, validate_name};

use crate::common::TestApp;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_valid_name_joins_exactly_once(name in "[A-Za-z][A-Za-z0-9_]{1,15}") {
        let (first, second) = runtime().block_on(async {
            let app = TestApp::new();
            (app.join(&name).await, app.join(&name).await)
        });
        prop_assert_eq!(first, StatusCode::CREATED);
        prop_assert_eq!(second, StatusCode::CONFLICT);
    }

    #[test]
    fn test_numbers_are_never_names(n in any::<i64>()) {
        prop_assert!(validate_name(&n.to_string()).is_err());
    }

    #[test]
    fn test_decimals_are_never_names(n in -1.0e6f64..1.0e6f64) {
        let s = format!("{:.3}", n);
        prop_assert!(validate_name(&s).is_err());
    }

    #[test]
    fn test_positive_limits_accepted(n in 1usize..10_000) {
        prop_assert_eq!(parse_limit(Some(&n.to_string())).unwrap(), Some(n));
    }

    #[test]
    fn test_non_positive_limits_rejected(n in i64::MIN..=0i64) {
        prop_assert!(parse_limit(Some(&n.to_string())).is_err());
    }
}

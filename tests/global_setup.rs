//! Process-wide end-to-end setup runs its migration once.

use stockroom::testing::global::ensure_end_to_end_with;
use stockroom::testing::stub::StubRunner;
use stockroom::{BootstrapConfig, SetupReport};

#[test]
fn later_callers_share_the_first_report() {
    let config = BootstrapConfig::default();

    let first = ensure_end_to_end_with(&config, StubRunner::failing(1, "database is locked"))
        .expect("failures are tolerated");
    let second = ensure_end_to_end_with(&config, StubRunner::new(Vec::new()))
        .expect("setup already happened");

    assert!(std::ptr::eq(first, second));
    assert!(matches!(first, SetupReport::MigrationTolerated(_)));
}

// Balance Integration Tests
//
// PROFILE: HARNESS_PROFILE (default tests/src/common/fixtures/frontier-dev.toml)
// TESTS: Genesis funding and the fee / existential-deposit arithmetic
//        - Transfer below the existential deposit only charges the fee
//        - Transfer above it credits value minus the deposit to a new account
//        - Pending and finalized views agree after every transfer
//
// The scenario mutates chain state, so it runs as one ordered test.


// Make common utilities available
#[path = "../src/common/mod.rs"]
mod common;

//! Empty library target; every test in this crate lives under `tests/` as
//! an integration test against the `evmc` facade.

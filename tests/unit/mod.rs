mod config_test;
mod error_handling_test;
mod ledger_test;
mod plan_request_test;
mod registry_test;

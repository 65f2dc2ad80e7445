// Testing Tools Library
//
// This crate provides testing utilities and tools for the mock service broker.
// Currently includes:
// - broker-test-client: runs broker API scenarios against a running broker

pub mod api_client;
pub mod output;
pub mod scenarios;

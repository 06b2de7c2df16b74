//! API integration test modules

mod health_tests;
mod server_list_tests;

//! Test helpers
//!
//! Shared infrastructure for the integration suites: a disposable Postgres
//! database, a wiremock stand-in for the payment gateway, data factories and
//! a context that wires the whole service stack together.

pub mod context;
pub mod database;
pub mod factories;
pub mod gateway;

pub use context::TestContext;
pub use database::TestDatabase;
pub use gateway::PaymentGatewayMock;

// Library surface for headless/integration tests and reuse.
pub mod app;
pub mod card;
pub mod config;
pub mod question;
pub mod runtime;
pub mod session;
pub mod ui;

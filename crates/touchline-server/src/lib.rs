// Library root: exposes the server pieces so integration tests can run the
// real router on an ephemeral port.

pub mod config;
pub mod handler;
pub mod server;

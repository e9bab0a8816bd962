pub mod azure;
pub mod node_server;

pub mod config;
pub mod error;
pub mod kernel;
pub mod outputs;
pub mod server;
pub mod services;

// Re-export specific items if needed for convenient access
pub use kernel::reactor::Reactor;
pub use kernel::session::SessionController;

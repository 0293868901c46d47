#[cfg(feature = "cli")]
pub mod cli;
pub mod session;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use session::SessionConfig;

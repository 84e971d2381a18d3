//! Spotify Gateway Library
//!
//! This library implements a small HTTPS gateway in front of the Spotify Web
//! API. It performs the OAuth authorization-code and client-credentials flows,
//! keeps an app-level token fresh in the background, and exposes a handful of
//! routes that forward a caller's access token to Spotify and reshape the
//! responses into narrow JSON views for a browser front end.
//!
//! # Modules
//!
//! - `api` - HTTP routes, shared application state and the per-request session extractor
//! - `config` - Configuration management and environment variables
//! - `error` - Request and startup error types
//! - `management` - Token state, pending OAuth states and the background refresher
//! - `server` - TLS listener serving the router
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporlgate::{config, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> sporlgate::Res<()> {
//!     config::load_env(None).await?;
//!     let config = Config::from_env()?;
//!     // Build the router and serve it...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the process boundary (startup, serving) where any error is
/// reported and ends the program. Request handlers use
/// [`error::GatewayError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Binding to port {}", port);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Spotify client token refreshed");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for startup failures the server cannot run without (missing
/// configuration, unreadable TLS bundle). Request-level failures are logged
/// with [`warning!`] and answered with an error response instead.
///
/// # Example
///
/// ```
/// error!("Cannot load TLS identity. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every failure the gateway survives: failed refreshes, failed
/// upstream calls, broken connections.
///
/// # Example
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

pub mod config;
pub mod documents;
pub mod kernel;
pub mod nlu;

pub use config::{AppConfig, ConfigError};
pub use documents::{DocumentCatalog, KnownDocument};
pub use kernel::reactor::{PendingPolicy, Reactor, ReactorConfig};

pub mod auth;
pub mod color;
pub mod config;
pub mod error;
pub mod poll;
pub mod storage;
pub mod types;

pub use auth::{AuthContext, decode_token};
pub use color::{Color, ColorMap, color_from_id};
pub use error::{AuthError, ConfigError, StorageError};
pub use poll::Poller;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use types::{AuthState, Claims, ClientConfig, GuestId};

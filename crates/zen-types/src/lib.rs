pub mod message;
pub mod event;
pub mod focus;
pub mod task;
pub mod note;
pub mod config;
pub mod error;


pub use error::ZenError;
pub type Result<T> = std::result::Result<T, ZenError>;

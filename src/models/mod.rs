pub mod catalog;
pub mod notification;
pub mod query;

// Re-exports for convenience
pub use catalog::*;
pub use notification::*;
pub use query::*;

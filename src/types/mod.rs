//! Logical types and read-time value types.

mod capability;
pub mod decimal;
pub mod timestamp;

pub use capability::Capability;
pub use decimal::DecimalData;
pub use timestamp::TimestampData;

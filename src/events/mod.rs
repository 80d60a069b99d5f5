//! Sale event module
//!
//! Purchase and bid history for a collectable, from the API or the chain

mod decode;
mod merge;
mod types;

pub use decode::{amount_from_value, decode_amount, try_decode_amount, RawDecodeError};
pub use merge::{merge, sort_by_created_at};
pub use types::SaleEvent;

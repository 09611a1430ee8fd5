pub mod money;
pub mod pii;

pub use money::format_inr;
pub use pii::Masked;

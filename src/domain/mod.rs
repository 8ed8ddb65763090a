pub mod member;
pub mod payment;
pub mod plan;

pub use member::*;
pub use payment::*;
pub use plan::*;

pub mod claims;
pub mod clock;
pub mod error;
pub mod jwt;
pub mod token_class;

pub use claims::Claims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::TokenError;
pub use token_class::TokenClass;

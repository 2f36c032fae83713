pub mod contest;
pub mod payment;
pub mod platform;
pub mod pot;
pub mod tournament;

pub use contest::*;
pub use payment::*;
pub use platform::*;
pub use pot::*;
pub use tournament::*;

mod instance;
pub use instance::*;

mod peer;
pub use peer::*;

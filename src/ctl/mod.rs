mod ctl;
pub use ctl::*;

mod board;
pub use board::*;

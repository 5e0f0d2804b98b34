mod lock;
pub use lock::*;

#[cfg(test)]
mod test_lock;

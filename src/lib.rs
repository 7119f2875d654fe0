pub mod estimate;
mod error;
pub mod interp;
pub mod persist;
pub mod report;
pub mod trace;

pub use error::Error;

#[cfg(test)]
mod test;

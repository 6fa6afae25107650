#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod bitmap;

mod equalizer;
pub use equalizer::*;

mod error;
pub use error::*;

mod limiter;
pub use limiter::*;

mod offset;
pub use offset::*;

mod slider;
pub use slider::*;

mod sweeper;

mod token_bucket;
pub use token_bucket::*;

#[cfg(test)]
mod tests;

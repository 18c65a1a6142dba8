
pub use assertions::*;
#[cfg(test)]
pub use client::*;
pub use constants::*;
pub use helpers::*;

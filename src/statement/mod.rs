mod classify;
mod scanner;
mod types;

pub use classify::*;
pub use scanner::*;
pub use types::*;

#[cfg(test)]
mod classify_tests;

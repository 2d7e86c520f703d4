//! Example boards used by shellboard demos.

/// Settings board example.
pub mod board;

#[cfg(test)]
mod tests;

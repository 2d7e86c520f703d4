/// Settings board tests.
mod board;

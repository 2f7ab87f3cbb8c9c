pub mod cli;
pub mod jobs;
pub mod sheet;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod tests;

//! Scripts for deploying and initializing the Neon staking contracts.

#![deny(missing_docs)]

pub mod cli;
mod commands;
pub mod constants;
pub mod errors;
mod solidity;
pub mod types;
pub mod utils;

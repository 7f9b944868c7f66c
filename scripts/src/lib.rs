//! Scripts for deploying and initializing a vault & its yield-farming strategy.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod chain;
pub mod cli;
mod commands;
pub mod constants;
pub mod deployments;
pub mod errors;
mod solidity;
pub mod types;
pub mod utils;

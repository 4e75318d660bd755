//! # lrg-bootstrap
//!
//! Governance bootstrap for LiteRide, written against the [`ChainClient`]
//! capability so the same code runs on a development node and on the
//! in-process simulated chain.
//!
//! - [`ContractDeployer`]: deploy-and-confirm for a single account
//! - [`distribution`]: token distribution and self-delegation
//! - [`ownership`]: application ownership transfer and the residual sweep
//! - [`handoff`]: timelock role grants and the admin revoke
//! - [`Bootstrap`]: the phase orchestrator, with journaling and resume
//! - [`ops`]: auxiliary operations (create token, register schema, balances,
//!   queue proposal, cast votes, export ABIs)
//!
//! [`ChainClient`]: lrg_chain::ChainClient

pub mod contracts;
pub mod deployer;
pub mod distribution;
pub mod error;
pub mod handoff;
pub mod observer;
pub mod ops;
pub mod orchestrator;
pub mod ownership;
pub mod settings;

pub use deployer::ContractDeployer;
pub use distribution::DistributionAmounts;
pub use error::BootstrapError;
pub use handoff::HandOffOutcome;
pub use observer::{BootstrapObserver, NoopObserver};
pub use orchestrator::Bootstrap;
pub use settings::BootstrapSettings;

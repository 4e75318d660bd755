//! Contract deployer.

use ethers::abi::Token;
use ethers::types::Address;
use lrg_chain::ChainClient;
use lrg_core::contracts::{ContractRef, DeployedContract};
use lrg_core::enums::ContractKind;

use crate::error::BootstrapError;

/// Deploys contracts from a single account and waits for confirmation.
pub struct ContractDeployer<'a, C> {
    chain: &'a C,
    from: Address,
}

impl<'a, C: ChainClient> ContractDeployer<'a, C> {
    #[must_use]
    pub const fn new(chain: &'a C, from: Address) -> Self {
        Self { chain, from }
    }

    #[must_use]
    pub const fn from(&self) -> Address {
        self.from
    }

    /// Deploy `artifact` as the `kind` contract.
    ///
    /// Returns only once the deployment is confirmed.
    ///
    /// # Errors
    ///
    /// Any chain failure (revert, dropped transaction, missing contract
    /// address) is returned unchanged; nothing is retried.
    pub async fn deploy(
        &self,
        kind: ContractKind,
        artifact: &str,
        args: Vec<Token>,
    ) -> Result<DeployedContract, BootstrapError> {
        tracing::debug!(%kind, artifact, args = args.len(), "deploying");
        let address = self.chain.deploy(self.from, artifact, args).await?;
        tracing::info!(%kind, artifact, address = ?address, "contract deployed");
        Ok(DeployedContract {
            kind,
            handle: ContractRef::new(artifact, address),
        })
    }
}

//! Deployed contract handles and value parsing helpers.

use ethers::types::{Address, H256, U256};
use ethers::utils::{format_units, parse_ether, to_checksum};
use serde::{Deserialize, Serialize};

use crate::enums::ContractKind;
use crate::errors::CoreError;

/// Everything a chain client needs to talk to one contract: the artifact whose
/// ABI describes it and the address it lives at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractRef {
    pub artifact: String,
    pub address: Address,
}

impl ContractRef {
    #[must_use]
    pub fn new(artifact: impl Into<String>, address: Address) -> Self {
        Self {
            artifact: artifact.into(),
            address,
        }
    }
}

/// Result of a confirmed deployment.
///
/// Created once per bootstrap run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub kind: ContractKind,
    pub handle: ContractRef,
}

impl DeployedContract {
    #[must_use]
    pub const fn address(&self) -> Address {
        self.handle.address
    }

    #[must_use]
    pub fn artifact(&self) -> &str {
        &self.handle.artifact
    }
}

/// EIP-55 checksummed rendering, as written to the address book.
#[must_use]
pub fn checksum(address: Address) -> String {
    to_checksum(&address, None)
}

/// Parse a hex address, with or without `0x`.
///
/// # Errors
///
/// Returns `CoreError::Parse` naming `field` when the value is not 20 hex bytes.
pub fn parse_address(field: &str, value: &str) -> Result<Address, CoreError> {
    value.trim().parse::<Address>().map_err(|e| CoreError::Parse {
        field: field.to_string(),
        reason: format!("'{value}' is not an address ({e})"),
    })
}

/// Parse a 32-byte hex value such as a description hash.
///
/// # Errors
///
/// Returns `CoreError::Parse` naming `field` on malformed input.
pub fn parse_h256(field: &str, value: &str) -> Result<H256, CoreError> {
    value.trim().parse::<H256>().map_err(|e| CoreError::Parse {
        field: field.to_string(),
        reason: format!("'{value}' is not a 32-byte hex value ({e})"),
    })
}

/// Parse a decimal ether-denominated amount into 18-decimal base units.
///
/// # Errors
///
/// Returns `CoreError::Parse` naming `field` on malformed input.
pub fn parse_token_amount(field: &str, value: &str) -> Result<U256, CoreError> {
    parse_ether(value.trim()).map_err(|e| CoreError::Parse {
        field: field.to_string(),
        reason: format!("'{value}' is not a decimal amount ({e})"),
    })
}

/// Render base units as a decimal ether-denominated string.
#[must_use]
pub fn format_token_amount(amount: U256) -> String {
    format_units(amount, "ether").unwrap_or_else(|_| amount.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn checksum_matches_eip55() {
        let address =
            parse_address("addr", "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap();
        assert_eq!(checksum(address), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn parse_address_reports_field() {
        let err = parse_address("distribution.participants[0]", "0xnope").unwrap_err();
        assert!(err.to_string().contains("distribution.participants[0]"));
    }

    #[test]
    fn token_amounts_use_eighteen_decimals() {
        let ten = parse_token_amount("amount", "10").unwrap();
        assert_eq!(ten, U256::from(10u64) * U256::exp10(18));
        let half = parse_token_amount("amount", "0.5").unwrap();
        assert_eq!(half, U256::exp10(17) * 5);
        assert_eq!(format_token_amount(ten), "10.000000000000000000");
    }

    #[test]
    fn deployed_contract_exposes_handle() {
        let deployed = DeployedContract {
            kind: ContractKind::Timelock,
            handle: ContractRef::new("LiteRideTimelock", Address::repeat_byte(0x11)),
        };
        assert_eq!(deployed.address(), Address::repeat_byte(0x11));
        assert_eq!(deployed.artifact(), "LiteRideTimelock");
    }
}

//! # lrg-ledger
//!
//! Boundary files of the LiteRide governance bootstrap:
//!
//! - the **address book** (`scripts/addresses.json` by default), a flat
//!   name → checksummed address object;
//! - the **artifact store**, Hardhat build output read by contract name;
//! - the **ABI bundle**, address-book entries joined with their ABIs;
//! - the **phase journal**, one JSONL file per bootstrap run.

pub mod abi_bundle;
pub mod address_book;
pub mod artifacts;
pub mod error;
pub mod journal;

pub use abi_bundle::{AbiBundle, AbiEntry};
pub use address_book::{AddressBook, previous_path};
pub use artifacts::{Artifact, ArtifactStore};
pub use error::LedgerError;
pub use journal::{Journal, RunHistory};

pub mod balances;
pub mod create_token;
pub mod deploy;
pub mod dispatch;
pub mod export_abis;
pub mod proposal;
pub mod register_schema;

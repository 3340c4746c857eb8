//! Offline builder for Merkle airdrop rounds: allowlist in, root and
//! per-account proofs out.

pub mod build;
pub mod error;
pub mod files;
pub mod input;
pub mod logging;
pub mod verify;

pub use build::{build_round, write_artifacts, BuildOptions, RoundArtifacts};
pub use error::BuildError;
pub use files::{read_json, write_json_atomic, write_json_pair};
pub use input::{load_allowlist, parse_allowlist, InputFormat};
pub use verify::{verify_address, verify_round, VerifyReport};

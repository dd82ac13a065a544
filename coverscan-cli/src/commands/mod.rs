//! CLI command implementations, one module per subcommand.

pub mod hash;
pub mod identify;
pub mod index;

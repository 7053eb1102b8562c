/// Attribute blob inspection command.
pub mod attrs;
/// File-level information command.
pub mod info;
/// Metadata side map listing command.
pub mod meta;
/// Instance property listing command.
pub mod props;
/// Shared string table listing command.
pub mod strings;
/// Tree rendering command.
pub mod tree;
/// Shared output and selector helpers.
pub mod util;

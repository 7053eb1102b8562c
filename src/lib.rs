//! Decoder and inspection helpers for Roblox binary model/place files.

/// Binary container decoding and the reconstructed instance tree.
pub mod rbx;

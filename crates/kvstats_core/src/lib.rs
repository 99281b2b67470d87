//! Public library API for reading binary keyed value trees and resolving Steam achievement completion.

/// Keyed value tree decoding, node access, achievement resolution, and Steam file lookup.
pub mod kv;

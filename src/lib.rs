//! Public library API for reading binary API trace captures.

/// Trace container detection, streaming parser, and the typed call model.
pub mod trace;

/// Call stream dump command.
pub mod dump;
/// Trace-level information command.
pub mod info;
pub(crate) mod util;

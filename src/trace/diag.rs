//! Fatal diagnostic path for unrecoverable stream corruption.

/// Emit a fatal diagnostic and abort the process.
///
/// The wire format is not self-synchronizing: past a bad tag byte every
/// further read would be garbage, so there is no recoverable error to
/// return.
pub(crate) fn fatal(message: std::fmt::Arguments<'_>) -> ! {
	log::error!("{message}");
	eprintln!("error: {message}");
	std::process::exit(1);
}

/// Command modules for the `infragraph` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the parsed arguments and returns `Ok(())` on success or
/// a [`crate::error::CliError`] on failure.
pub mod cycles;
pub mod direction;
pub mod impact;
pub mod layout;

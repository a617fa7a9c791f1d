//! Library backing the `stockroom` binary.
//!
//! The binary is a thin wrapper: argument parsing lives in [`cli`], command
//! execution in [`commands`], and shell formatting in [`output`]. Keeping the
//! logic here lets the tests drive commands without spawning processes.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

//! Process exit codes shared by every subcommand. A run without defects returns 0.

/// At least one defect at or above the failure threshold
pub const VIOLATIONS_FOUND: i32 = 1;

/// Invalid arguments, unreadable files or configuration errors
pub const TOOL_ERROR: i32 = 2;

/// Helpers terminating the process with one of the codes above
pub mod exit {
    use super::*;

    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND);
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}

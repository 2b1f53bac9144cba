// ABOUTME: Fixed strings the REPL and CLI surface to the user

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PROMPT: &str = "scheme> ";

pub const GOODBYE: &str = "Goodbye.";

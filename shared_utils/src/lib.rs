//! Small helpers shared by the HTTP-facing crates in this workspace.

pub mod env;
pub mod http;

//! Inputs read from the workspace.

pub mod translation;

//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod compose;

pub(crate) use check::CheckArgs;
pub(crate) use compose::ComposeArgs;

//! Navigation configuration errors.

/// Error raised while composing a navigation tree.
///
/// Every variant is fatal: composition stops before anything is rendered.
/// Locations are positional (`sidebar[3].items[0]`) because labels are not
/// unique.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Splice point does not address a group of the static tree.
    #[error("unknown splice point: {0}")]
    UnknownSplicePoint(String),
    /// Splice point name could not be parsed.
    #[error("invalid splice point {name:?}: {reason}")]
    InvalidSplicePoint {
        /// Name as written in the configuration.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },
    /// Entry label is empty or whitespace.
    #[error("navigation entry at {0} has an empty label")]
    EmptyLabel(String),
    /// Link target is empty.
    #[error("link at {0} has an empty target")]
    EmptyTarget(String),
    /// Group ended up without children after splicing.
    #[error("group at {0} has no children")]
    EmptyGroup(String),
}

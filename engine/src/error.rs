use thiserror::Error;

/// Structured failure conditions surfaced by the engine (§7).
///
/// `InvalidOrder`, `EmptyPartition`, and `Interrupted` are deliberately
/// absent here: a malformed order is a no-op at the book, an empty
/// partition is simply idle, and a worker interrupted by shutdown exits
/// cleanly without reporting to anyone. None of the three are conditions
/// a caller needs to catch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("symbol '{0}' is not covered by any partition")]
    UnknownSymbol(String),

    #[error("symbol '{0}' is claimed by more than one partition")]
    DuplicateSymbol(String),
}

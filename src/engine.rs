//! The embedded engine seam.
//!
//! The relay never parses or executes SQL itself. It drives an [`Engine`], created on the
//! worker thread by an [`EngineLoader`] when `init` arrives.

use crate::error::RelayError;
use crate::results::ResultSet;

/// Opaque execute/query capability of an embedded database.
pub trait Engine {
    /// Execute statements that produce no row set.
    ///
    /// # Errors
    /// Returns the engine's error for malformed or failing SQL.
    fn run(&mut self, sql: &str) -> Result<(), RelayError>;

    /// Execute statements and collect the rows of each one that produced any.
    ///
    /// # Errors
    /// Returns the engine's error for malformed or failing SQL.
    fn exec(&mut self, sql: &str) -> Result<ResultSet, RelayError>;
}

/// Produces a fresh, empty engine instance.
///
/// Loaders are moved onto the worker thread, so they must be `Send`; the engine they
/// produce never leaves that thread.
pub trait EngineLoader: Send + 'static {
    /// # Errors
    /// Returns [`RelayError`] if the engine cannot be loaded or the database cannot be created.
    fn load(&self) -> Result<Box<dyn Engine>, RelayError>;
}

impl<F> EngineLoader for F
where
    F: Fn() -> Result<Box<dyn Engine>, RelayError> + Send + 'static,
{
    fn load(&self) -> Result<Box<dyn Engine>, RelayError> {
        self()
    }
}

use serde::{Deserialize, Serialize};

use super::statement::StatementResult;

/// The structured output of a query
///
/// An ordered sequence of statement results, one per statement that produced
/// rows. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    /// Statement results, in statement order
    pub statements: Vec<StatementResult>,
}

impl ResultSet {
    /// Append the result of the next statement
    pub fn push(&mut self, statement: StatementResult) {
        self.statements.push(statement);
    }

    /// The first statement's result, which is all a single-statement query produces
    #[must_use]
    pub fn first(&self) -> Option<&StatementResult> {
        self.statements.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Total number of rows across all statements
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.statements.iter().map(StatementResult::len).sum()
    }
}

impl From<Vec<StatementResult>> for ResultSet {
    fn from(statements: Vec<StatementResult>) -> Self {
        Self { statements }
    }
}

impl IntoIterator for ResultSet {
    type Item = StatementResult;
    type IntoIter = std::vec::IntoIter<StatementResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

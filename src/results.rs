mod result_set;
mod statement;

pub use result_set::ResultSet;
pub use statement::StatementResult;

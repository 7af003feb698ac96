pub mod summary_mapper;
pub mod transaction_mapper;

pub use summary_mapper::SummaryMapper;
pub use transaction_mapper::TransactionMapper;

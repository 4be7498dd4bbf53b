pub mod error;
pub mod handlers;
pub mod indexer;
pub mod reader;
pub mod resolver;
pub mod storage;

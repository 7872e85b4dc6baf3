pub mod codec;
pub mod compression;
pub mod constants;
pub mod error;
pub mod format;
pub mod reader;
pub mod table;
pub mod writer;

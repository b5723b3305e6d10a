pub mod library;
pub mod local_quotes;
pub mod proverbs;
pub mod remote;

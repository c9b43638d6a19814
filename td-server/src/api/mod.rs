pub mod activity;
pub mod audit;
pub mod boards;
pub mod delete_response;
pub mod error;
pub mod extractors;
pub mod lists;
pub mod publish;
pub mod resolve;
pub mod tasks;
pub mod validate;

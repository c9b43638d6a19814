pub mod create_list_request;
pub mod list_list_response;
pub mod list_query;
#[allow(clippy::module_inception)]
pub mod lists;
pub mod update_list_request;

pub mod board_detail_response;
pub mod board_dto;
pub mod board_list_response;
#[allow(clippy::module_inception)]
pub mod boards;
pub mod create_board_request;
pub mod update_board_request;

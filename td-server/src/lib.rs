pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    activity::{activity::list_activity, activity_list_response::ActivityListResponse, activity_query::ActivityQuery},
    boards::{
        board_detail_response::{BoardDetailResponse, ListDetailDto},
        board_dto::BoardDto,
        board_list_response::BoardListResponse,
        boards::{create_board, delete_board, get_board, list_boards, update_board},
        create_board_request::CreateBoardRequest,
        update_board_request::UpdateBoardRequest,
    },
    delete_response::DeleteResponse,
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    lists::{
        create_list_request::CreateListRequest,
        list_list_response::ListListResponse,
        list_query::ListQuery,
        lists::{create_list, delete_list, get_list, list_lists, update_list},
        update_list_request::UpdateListRequest,
    },
    tasks::{
        create_task_request::CreateTaskRequest,
        search_tasks_query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SearchTasksQuery},
        task_search_response::TaskSearchResponse,
        tasks::{create_task, delete_task, get_task, search_tasks, update_task},
        update_task_request::UpdateTaskRequest,
    },
};

pub use crate::error::{Result as ServerResult, ServerError};
pub use crate::routes::build_router;

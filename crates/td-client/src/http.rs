use crate::{BoardApi, ClientError, MoveRequest, Result};

use td_core::{Task, TaskView};

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the taskdeck REST API
pub struct HttpBoardApi {
    base_url: String,
    /// Bearer credential; absent when the server runs with auth disabled.
    bearer: Option<String>,
    /// Identity fallback for auth-disabled servers.
    user_id: Option<String>,
    client: ReqwestClient,
}

impl HttpBoardApi {
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:5000")
    /// * `bearer` - Optional JWT included as `Authorization: Bearer ...`
    pub fn new(base_url: &str, bearer: Option<&str>) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::from)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: bearer.map(String::from),
            user_id: None,
            client,
        })
    }

    /// Include an X-User-Id header on every request (auth-disabled servers).
    pub fn with_user_id(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref bearer) = self.bearer {
            req = req.bearer_auth(bearer);
        }
        if let Some(ref user_id) = self.user_id {
            req = req.header("X-User-Id", user_id);
        }

        req
    }

    /// Execute a request, mapping the server's error envelope onto
    /// `ClientError`.
    async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope.error.message,
            Err(_) => status.to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized {
                location: ErrorLocation::from(Location::caller()),
            },
            StatusCode::NOT_FOUND => ClientError::NotFound {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
                location: ErrorLocation::from(Location::caller()),
            },
        })
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct BoardDetailResponse {
    lists: Vec<ListDetailResponse>,
}

#[derive(Deserialize)]
struct ListDetailResponse {
    tasks: Vec<TaskView>,
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn move_task(&self, request: &MoveRequest) -> Result<Task> {
        let req = self
            .request(Method::PUT, &format!("/api/tasks/{}", request.task_id))
            .json(&serde_json::json!({
                "listId": request.list_id,
                "position": request.position,
            }));

        let view: TaskView = self.execute(req).await?;
        view.into_task()
            .map_err(|e| ClientError::decode(format!("Bad task in move response: {}", e)))
    }

    async fn fetch_board_tasks(&self, board_id: Uuid) -> Result<Vec<Task>> {
        let req = self.request(Method::GET, &format!("/api/boards/{}", board_id));
        let detail: BoardDetailResponse = self.execute(req).await?;

        detail
            .lists
            .into_iter()
            .flat_map(|l| l.tasks)
            .map(|view| {
                view.into_task()
                    .map_err(|e| ClientError::decode(format!("Bad task in board response: {}", e)))
            })
            .collect()
    }
}

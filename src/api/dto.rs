//! Request bodies accepted by the HTTP adapter.

use crate::board::services::{AddCardRequest, CreateBoardRequest, UpdateCardRequest};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of `POST /boards`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBoardBody {
    /// Board title.
    #[serde(default)]
    pub title: String,
    /// Owning user.
    #[serde(default)]
    pub owner: String,
    /// Additional initial members.
    #[serde(default)]
    pub members: Vec<String>,
    /// Column titles replacing the default layout.
    pub columns: Option<Vec<String>>,
}

impl From<CreateBoardBody> for CreateBoardRequest {
    fn from(body: CreateBoardBody) -> Self {
        let request = Self::new(body.title, body.owner).with_members(body.members);
        match body.columns {
            Some(columns) => request.with_columns(columns),
            None => request,
        }
    }
}

/// Body of `POST /boards/{board_id}/columns`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddColumnBody {
    /// Column title.
    #[serde(default)]
    pub title: String,
}

/// Body of `POST .../columns/{column_id}/cards`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddCardBody {
    /// Card title.
    #[serde(default)]
    pub title: String,
    /// Optional card description.
    pub description: Option<String>,
}

impl From<AddCardBody> for AddCardRequest {
    fn from(body: AddCardBody) -> Self {
        let request = Self::new(body.title);
        match body.description {
            Some(description) => request.with_description(description),
            None => request,
        }
    }
}

/// Body of `PATCH .../cards/{card_id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCardBody {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Member to assign the card to.
    pub executor: Option<String>,
    /// Planned start date, `YYYY-MM-DD`.
    pub start_date: Option<NaiveDate>,
    /// Planned end date, `YYYY-MM-DD`.
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateCardBody> for UpdateCardRequest {
    fn from(body: UpdateCardBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(executor) = body.executor {
            request = request.with_executor(executor);
        }
        if let Some(start_date) = body.start_date {
            request = request.with_start_date(start_date);
        }
        if let Some(end_date) = body.end_date {
            request = request.with_end_date(end_date);
        }
        request
    }
}

/// Body of `POST .../cards/{card_id}/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTaskBody {
    /// Task description.
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT .../cards/{card_id}/tasks/{position}`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SetTaskCheckedBody {
    /// Whether the task is done.
    pub checked: bool,
}

/// Body of `POST .../cards/{card_id}/comments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddCommentBody {
    /// Commenting member.
    #[serde(default)]
    pub author: String,
    /// Comment text.
    #[serde(default)]
    pub text: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBody {
    /// Service name.
    pub title: &'static str,
    /// Liveness message.
    pub message: &'static str,
}

use serde::Serialize;

use crate::clients::tmdb::{MediaLookup, MovieDetail};
use crate::db::User;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub avatar_url: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar_url: user.avatar_url,
        }
    }
}

/// Watchlist page payload: each stored id resolved against both catalog
/// detail endpoints.
#[derive(Debug, Serialize)]
pub struct SavedListDto {
    pub user: UserDto,
    pub items: Vec<MediaLookup>,
}

#[derive(Debug, Serialize)]
pub struct FinishedItemDto {
    pub media_id: i64,
    pub movie: Option<MovieDetail>,
}

#[derive(Debug, Serialize)]
pub struct FinishedListDto {
    pub user: UserDto,
    pub items: Vec<FinishedItemDto>,
}

#[derive(Debug, Serialize)]
pub struct AddItemDto {
    pub media_id: i64,
    pub list: String,
    pub already_present: bool,
}

#[derive(Debug, Serialize)]
pub struct RemoveItemDto {
    pub media_id: i64,
    pub removed_from: String,
}

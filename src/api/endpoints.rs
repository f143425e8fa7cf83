//! Typed calls for the backend routes the views use.

use super::models::{
    CreateRoomRequest, Credentials, MessageResponse, RoomInfo, RoomMembershipRequest,
    RoomResponse, StartGameRequest, UserRecords,
};
use super::{ApiClient, ApiError};

/// Game mode the backend runs when none is chosen
pub const DEFAULT_GAME_MODE: &str = "poker_battle";

impl ApiClient {
    pub async fn register(&self, credentials: &Credentials) -> Result<MessageResponse, ApiError> {
        self.post_json("/register", credentials).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<MessageResponse, ApiError> {
        self.post_json("/login", credentials).await
    }

    pub async fn create_room(&self, username: &str) -> Result<RoomResponse, ApiError> {
        let body = CreateRoomRequest {
            username: username.to_string(),
        };
        self.post_json("/room/create", &body).await
    }

    pub async fn join_room(&self, room_id: &str, username: &str) -> Result<RoomResponse, ApiError> {
        self.post_json("/room/join", &membership(room_id, username)).await
    }

    pub async fn leave_room(
        &self,
        room_id: &str,
        username: &str,
    ) -> Result<RoomResponse, ApiError> {
        self.post_json("/room/leave", &membership(room_id, username)).await
    }

    pub async fn room_info(&self, room_id: &str) -> Result<RoomInfo, ApiError> {
        self.get_json_with_query("/room/info", &[("room_id", room_id)]).await
    }

    /// Ask the backend to start the game in `room_id`.
    ///
    /// The response shape depends on the game mode, so it is returned raw.
    pub async fn start_game(
        &self,
        room_id: &str,
        mode: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let body = StartGameRequest {
            room_id: room_id.to_string(),
            mode: mode.unwrap_or(DEFAULT_GAME_MODE).to_string(),
        };
        self.post_json("/game/start", &body).await
    }

    pub async fn user_records(&self, username: &str) -> Result<UserRecords, ApiError> {
        self.get_json_with_query("/user/records", &[("username", username)]).await
    }
}

fn membership(room_id: &str, username: &str) -> RoomMembershipRequest {
    RoomMembershipRequest {
        room_id: room_id.to_string(),
        username: username.to_string(),
    }
}

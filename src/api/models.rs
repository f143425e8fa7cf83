//! Wire types for the game backend's HTTP endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Login / registration body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Plain acknowledgement (`{"message": ...}`)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateRoomRequest {
    pub username: String,
}

/// Body for joining or leaving a room
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoomMembershipRequest {
    pub room_id: String,
    pub username: String,
}

/// Response of room create/join/leave
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RoomResponse {
    pub message: String,
    pub room_id: String,
}

/// A player seated in a room
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RoomPlayer {
    pub username: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub ready: bool,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RoomInfo {
    pub room_id: String,
    #[serde(default)]
    pub users: Vec<RoomPlayer>,
}

impl RoomInfo {
    pub fn all_ready(&self) -> bool {
        !self.users.is_empty() && self.users.iter().all(|u| u.ready)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StartGameRequest {
    pub room_id: String,
    pub mode: String,
}

/// Outcome of a finished game from one player's point of view
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn label(&self) -> &'static str {
        match self {
            GameResult::Win => "Win",
            GameResult::Loss => "Loss",
            GameResult::Draw => "Draw",
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameRecord {
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub game_time: NaiveDateTime,
    pub room_id: String,
    /// Comma-separated opponent usernames
    pub opponents: Option<String>,
    pub result: GameResult,
    pub score_change: i64,
}

impl GameRecord {
    pub fn opponent_list(&self) -> Vec<&str> {
        self.opponents
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `GET /user/records` response
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserRecords {
    pub id: i64,
    pub username: String,
    pub points: i64,
    #[serde(default)]
    pub game_records: Vec<GameRecord>,
}

//! Page components, one per route.

pub mod admin;
mod auth;
mod dashboard;
mod game;
mod not_found;
mod records;
mod room;

pub use admin::{AdminGameLogs, AdminRoomManagement, AdminUserQuery};
pub use auth::Auth;
pub use dashboard::Dashboard;
pub use game::GameInterface;
pub use not_found::NotFound;
pub use records::{GameRecords, RecordsTable};
pub use room::Room;

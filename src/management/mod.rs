mod auth;
mod state;

pub use auth::TokenManager;
pub use state::AppState;
pub use state::StateManager;

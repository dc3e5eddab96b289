pub mod api_utils;
pub mod export;
pub mod fetch_state;
pub mod request_guard;

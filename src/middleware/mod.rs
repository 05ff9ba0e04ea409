pub mod require_json;
pub mod response;

pub use require_json::require_json_middleware;
pub use response::{ApiResponse, ApiResult, IntoApiResponse};

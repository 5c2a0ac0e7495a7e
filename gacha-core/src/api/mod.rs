//! Backend contract: request/response plumbing and the typed client.
mod client;
mod error;
mod transport;

pub use client::GachaClient;
pub use error::{ApiError, ApiResult};
pub use transport::{
    ApiRequest, ApiResponse, ApiTransport, HttpMethod, MultipartPart, RequestBody,
    encode_query_value,
};

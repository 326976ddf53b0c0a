//! Error handling for streaming calls.
//!
//! - **Categories**: [`ErrorCategory`] drives retry decisions
//! - **Response errors**: [`ResponseError`] with the parsed [`ApiError`]
//! - **Stream errors**: [`StreamError`], the single failure surface of a call
//!
//! | Failure | Variant | Category |
//! |---------|---------|----------|
//! | Connection/read failure | `Transport` | Network |
//! | Non-2xx response | `Response` | Client / RateLimit / Server |
//! | Unparseable error body | `ErrorBody` | Protocol |
//! | Unresolved stray line | `Decode` | Protocol |

mod category;
mod response;
mod stream;

pub use category::ErrorCategory;
pub use response::{ApiError, ApiErrorBody, ResponseError};
pub use stream::{DecodeError, StreamError, StreamResult};

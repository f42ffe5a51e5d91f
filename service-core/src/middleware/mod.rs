pub mod panic;
pub mod tracing;

pub use self::panic::panic_response;
pub use self::tracing::{REQUEST_ID_HEADER, request_id_middleware};

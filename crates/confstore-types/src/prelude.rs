pub use crate::error::{ApiError, ApiResult, CsResult, Error, ErrorKind};

pub use tracing::{debug, error, info, trace, warn};

// vim: ts=4

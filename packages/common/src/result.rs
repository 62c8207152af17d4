use crate::error::CommonError;

/// Result type for decoding and id parsing
pub type CommonResult<T> = Result<T, CommonError>;

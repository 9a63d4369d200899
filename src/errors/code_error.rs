use std::error::Error;
use std::fmt;

pub type LoadTestResult<T> = Result<T, CodeErrorResp>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeError {
    pub error_code: u16,
    pub message: &'static str,
}

impl CodeError {
    pub const CONFIG_INVALID: CodeError = CodeError {
        error_code: 0,
        message: "Invalid load test configuration!",
    };
    pub const CLIENT_BUILD_ERROR: CodeError = CodeError {
        error_code: 1,
        message: "Could not build HTTP client!",
    };
    pub const PAYLOAD_SERIALIZATION_ERROR: CodeError = CodeError {
        error_code: 2,
        message: "Could not serialize signup payload!",
    };
    pub const REQUEST_BUILD_ERROR: CodeError = CodeError {
        error_code: 3,
        message: "Could not build signup request!",
    };
    pub const REQUEST_SEND_ERROR: CodeError = CodeError {
        error_code: 4,
        message: "Signup request failed before a response was received!",
    };
    pub const WORKER_JOIN_ERROR: CodeError = CodeError {
        error_code: 5,
        message: "Virtual user task panicked or was cancelled!",
    };
}

pub fn code_err<E>(cerr: CodeError, e: E) -> CodeErrorResp
where
    E: Into<anyhow::Error>,
{
    let e: anyhow::Error = e.into();
    CodeErrorResp {
        error_code: cerr.error_code,
        message: cerr.message.to_string(),
        // alternate formatting keeps the source chain (e.g. "error sending request: connection refused")
        error_message: format!("{e:#}"),
    }
}

#[derive(Debug)]
pub struct CodeErrorResp {
    pub error_code: u16,
    pub message: String,
    pub error_message: String,
}

impl CodeErrorResp {
    pub fn is(&self, cerr: CodeError) -> bool {
        self.error_code == cerr.error_code
    }
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error_message.is_empty() {
            write!(f, "[E{}] {}", self.error_code, self.message)
        } else {
            write!(
                f,
                "[E{}] {}: {}",
                self.error_code, self.message, self.error_message
            )
        }
    }
}

impl Error for CodeErrorResp {}

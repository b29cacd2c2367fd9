//! RPC status codes
//!
//! Mirrors the canonical gRPC status code space. The name table must stay
//! in exact sync with that enumeration; codes outside it render as
//! `STATUS_<n>`.

use std::fmt;

/// Canonical RPC status code
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StatusCode(pub u32);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(0);
    pub const CANCELLED: StatusCode = StatusCode(1);
    pub const UNKNOWN: StatusCode = StatusCode(2);
    pub const INVALID_ARGUMENT: StatusCode = StatusCode(3);
    pub const DEADLINE_EXCEEDED: StatusCode = StatusCode(4);
    pub const NOT_FOUND: StatusCode = StatusCode(5);
    pub const ALREADY_EXISTS: StatusCode = StatusCode(6);
    pub const PERMISSION_DENIED: StatusCode = StatusCode(7);
    pub const RESOURCE_EXHAUSTED: StatusCode = StatusCode(8);
    pub const FAILED_PRECONDITION: StatusCode = StatusCode(9);
    pub const ABORTED: StatusCode = StatusCode(10);
    pub const OUT_OF_RANGE: StatusCode = StatusCode(11);
    pub const UNIMPLEMENTED: StatusCode = StatusCode(12);
    pub const INTERNAL: StatusCode = StatusCode(13);
    pub const UNAVAILABLE: StatusCode = StatusCode(14);
    pub const DATA_LOSS: StatusCode = StatusCode(15);
    pub const UNAUTHENTICATED: StatusCode = StatusCode(16);

    /// Fixed name for defined codes
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            StatusCode::OK => "OK",
            StatusCode::CANCELLED => "CANCELLED",
            StatusCode::UNKNOWN => "UNKNOWN",
            StatusCode::INVALID_ARGUMENT => "INVALID_ARGUMENT",
            StatusCode::DEADLINE_EXCEEDED => "DEADLINE_EXCEEDED",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            StatusCode::ALREADY_EXISTS => "ALREADY_EXISTS",
            StatusCode::PERMISSION_DENIED => "PERMISSION_DENIED",
            StatusCode::RESOURCE_EXHAUSTED => "RESOURCE_EXHAUSTED",
            StatusCode::FAILED_PRECONDITION => "FAILED_PRECONDITION",
            StatusCode::ABORTED => "ABORTED",
            StatusCode::OUT_OF_RANGE => "OUT_OF_RANGE",
            StatusCode::UNIMPLEMENTED => "UNIMPLEMENTED",
            StatusCode::INTERNAL => "INTERNAL",
            StatusCode::UNAVAILABLE => "UNAVAILABLE",
            StatusCode::DATA_LOSS => "DATA_LOSS",
            StatusCode::UNAUTHENTICATED => "UNAUTHENTICATED",
            _ => return None,
        };
        Some(name)
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == StatusCode::OK
    }
}

/// Render a status code. Total over the whole code space.
pub fn grpc_code_to_string(code: StatusCode) -> String {
    match code.name() {
        Some(name) => name.to_string(),
        None => format!("STATUS_{}", code.0),
    }
}

impl fmt::Debug for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({})", grpc_code_to_string(*self))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&grpc_code_to_string(*self))
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        StatusCode(code)
    }
}

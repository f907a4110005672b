//! Error types
//!
//! Two layers:
//! - `Error` is what adapters and internal helpers return. `NotFound` is a
//!   distinguished signal so callers can tell "no record" from "store down".
//! - `ApiError` is the caller-visible error of a config operation. It carries
//!   the qualified operation id (e.g. `config.Config.Get`) and one of the five
//!   error kinds, and renders as `{"id","code","detail","status"}`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

pub type CsResult<T> = std::result::Result<T, Error>;
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError(String),
	Parse,
	ValidationError(String),
	ConfigError(String),
	Crypto(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(_err: serde_json::Error) -> Self {
		Self::Parse
	}
}

impl From<base64::DecodeError> for Error {
	fn from(_err: base64::DecodeError) -> Self {
		Self::Parse
	}
}

impl From<tokio::task::JoinError> for Error {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::Internal(format!("task failed: {}", err))
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError(msg) => write!(f, "database error: {}", msg),
			Error::Parse => write!(f, "parse error"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Crypto(msg) => write!(f, "crypto error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		match self {
			Error::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "forbidden").into_response(),
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized").into_response(),
			Error::Parse | Error::ValidationError(_) => {
				(StatusCode::BAD_REQUEST, "bad request").into_response()
			}
			_ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
		}
	}
}

// ErrorKind //
//***********//
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	BadRequest,
	Unauthorized,
	Forbidden,
	NotFound,
	InternalServerError,
}

impl ErrorKind {
	pub fn status(self) -> StatusCode {
		match self {
			ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
			ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
			ErrorKind::Forbidden => StatusCode::FORBIDDEN,
			ErrorKind::NotFound => StatusCode::NOT_FOUND,
			ErrorKind::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

// ApiError //
//**********//
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
	/// Qualified operation id, e.g. `config.Config.Set`
	pub id: &'static str,
	pub kind: ErrorKind,
	pub detail: Box<str>,
}

impl ApiError {
	pub fn new(kind: ErrorKind, id: &'static str, detail: impl Into<Box<str>>) -> Self {
		Self { id, kind, detail: detail.into() }
	}

	pub fn bad_request(id: &'static str, detail: impl Into<Box<str>>) -> Self {
		Self::new(ErrorKind::BadRequest, id, detail)
	}

	pub fn unauthorized(id: &'static str, detail: impl Into<Box<str>>) -> Self {
		Self::new(ErrorKind::Unauthorized, id, detail)
	}

	pub fn forbidden(id: &'static str, detail: impl Into<Box<str>>) -> Self {
		Self::new(ErrorKind::Forbidden, id, detail)
	}

	pub fn not_found(id: &'static str, detail: impl Into<Box<str>>) -> Self {
		Self::new(ErrorKind::NotFound, id, detail)
	}

	pub fn internal(id: &'static str, detail: impl Into<Box<str>>) -> Self {
		Self::new(ErrorKind::InternalServerError, id, detail)
	}
}

impl std::fmt::Display for ApiError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{} ({:?}): {}", self.id, self.kind, self.detail)
	}
}

impl std::error::Error for ApiError {}

#[derive(Serialize)]
struct ApiErrorBody<'a> {
	id: &'a str,
	code: u16,
	detail: &'a str,
	status: &'a str,
}

impl IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		let status = self.kind.status();
		let body = ApiErrorBody {
			id: self.id,
			code: status.as_u16(),
			detail: &self.detail,
			status: status.canonical_reason().unwrap_or_default(),
		};
		(status, Json(body)).into_response()
	}
}


// vim: ts=4

use axum::{
	middleware,
	routing::{get, post},
	Router,
};
use tower_http::trace::TraceLayer;

use crate::prelude::*;
use crate::{api, middleware::optional_auth};

pub fn init(app: App) -> Router {
	let config_router = Router::new()
		.route("/config/Config/Get", post(api::post_get))
		.route("/config/Config/Set", post(api::post_set))
		.route("/config/Config/Delete", post(api::post_delete))
		.route_layer(middleware::from_fn_with_state(app.clone(), optional_auth));

	Router::new()
		.merge(config_router)
		.route("/health", get(async || "ok"))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4

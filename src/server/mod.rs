mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};

use crate::api::API;
use crate::server::handlers::places;

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/place", get(places::list).post(places::create))
        .route("/place/:id", get(places::find).patch(places::update))
        .route("/place/:id/linkage", get(places::find_linkage))
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], 1337));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

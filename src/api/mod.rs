mod error;
mod handlers;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::booking::BookingService;

pub use error::ErrorBody;

pub fn create_router(service: BookingService) -> Router {
    let api = Router::new()
        // Rooms
        .route("/rooms", get(handlers::list_rooms))
        .route("/rooms", post(handlers::create_room))
        .route("/rooms/available", get(handlers::list_available_rooms))
        // Reservations
        .route("/reservations", get(handlers::list_reservations))
        .route("/reservations", post(handlers::create_reservation))
        .route("/reservations/{id}", get(handlers::get_reservation))
        .route("/reservations/{id}", delete(handlers::cancel_reservation))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(service)
}

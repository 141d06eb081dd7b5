use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::booking::BookingService;
use crate::error::BookingError;
use crate::models::*;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Rooms
// ============================================================

pub async fn list_rooms(
    State(service): State<BookingService>,
) -> Result<Json<Vec<Room>>, BookingError> {
    service.list_rooms().map(Json)
}

pub async fn create_room(
    State(service): State<BookingService>,
    input: Result<Json<CreateRoomInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Room>), BookingError> {
    let Json(input) = input?;
    service
        .create_room(input)
        .map(|room| (StatusCode::CREATED, Json(room)))
}

pub async fn list_available_rooms(
    State(service): State<BookingService>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<Vec<Room>>, BookingError> {
    let Query(query) = query?;
    service.list_available_rooms(query).map(Json)
}

// ============================================================
// Reservations
// ============================================================

pub async fn list_reservations(
    State(service): State<BookingService>,
    filter: Result<Query<ReservationFilter>, QueryRejection>,
) -> Result<Json<Vec<Reservation>>, BookingError> {
    let Query(filter) = filter?;
    service.list_reservations(filter).map(Json)
}

pub async fn create_reservation(
    State(service): State<BookingService>,
    input: Result<Json<CreateReservationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Reservation>), BookingError> {
    let Json(input) = input?;
    service
        .create_reservation(input)
        .map(|r| (StatusCode::CREATED, Json(r)))
}

pub async fn get_reservation(
    State(service): State<BookingService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Reservation>, BookingError> {
    let Path(id) = id?;
    service.get_reservation(id).map(Json)
}

pub async fn cancel_reservation(
    State(service): State<BookingService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, BookingError> {
    let Path(id) = id?;
    service
        .cancel_reservation(id)
        .map(|_| StatusCode::NO_CONTENT)
}

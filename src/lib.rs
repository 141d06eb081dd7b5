//! Room reservation booking service.
//!
//! Rooms are reference data; reservations are booked against them for a
//! single calendar date and a half-open `[start, end)` time interval. Two
//! reservations for the same room and date never overlap.

pub mod api;
pub mod booking;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{BookingError, Result};

// ABOUTME: Read-only catalog store for bookable tours, itineraries, and aggregates
// ABOUTME: Joins providers, ratings, and bookings into typed Tour snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ViaTour

//! Catalog repository
//!
//! Supplies the candidate set for one recommendation pass. Reads are
//! snapshot-style and side-effect free; a storage error here aborts the whole
//! pass, it is not recoverable locally.

use crate::errors::{AppError, AppResult};
use crate::models::{ItineraryDay, Tour};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

/// Catalog database operations manager
pub struct CatalogManager {
    pool: SqlitePool,
}

impl CatalogManager {
    /// Create a new catalog manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List every currently bookable tour with its aggregate statistics
    ///
    /// Ordering is average rating descending then booking count descending,
    /// which doubles as the baseline recommendation order when no keyword
    /// matches. Unrated tours get an average rating of 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_bookable_tours(&self) -> AppResult<Vec<Tour>> {
        let rows = sqlx::query(
            r"
            SELECT t.id, t.name, t.description, t.price, t.currency, t.image_url,
                   t.provider_id, p.name AS provider_name,
                   COALESCE(AVG(r.score), 0.0) AS average_rating,
                   COUNT(DISTINCT b.id) AS booking_count
            FROM tours t
            JOIN providers p ON p.id = t.provider_id
            LEFT JOIN ratings r ON r.tour_id = t.id
            LEFT JOIN bookings b ON b.tour_id = t.id
            WHERE t.available = 1
            GROUP BY t.id
            ORDER BY average_rating DESC, booking_count DESC, t.id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list tours: {e}")))?;

        let tours = rows
            .into_iter()
            .map(|r| Tour {
                id: r.get("id"),
                name: r.get("name"),
                description: r.get("description"),
                price: r.get("price"),
                currency: r.get("currency"),
                image_url: r.get("image_url"),
                provider_id: r.get("provider_id"),
                provider_name: r.get("provider_name"),
                average_rating: r.get("average_rating"),
                booking_count: r.get("booking_count"),
            })
            .collect();

        Ok(tours)
    }

    /// Load all itineraries grouped by tour, each ordered by day number
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_itineraries(&self) -> AppResult<HashMap<i64, Vec<ItineraryDay>>> {
        let rows = sqlx::query(
            r"
            SELECT tour_id, day_number, title, description
            FROM itinerary_days
            ORDER BY tour_id ASC, day_number ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list itineraries: {e}")))?;

        let mut itineraries: HashMap<i64, Vec<ItineraryDay>> = HashMap::new();
        for r in rows {
            let day = ItineraryDay {
                tour_id: r.get("tour_id"),
                day_number: r.get("day_number"),
                title: r.get("title"),
                description: r.get("description"),
            };
            itineraries.entry(day.tour_id).or_default().push(day);
        }

        Ok(itineraries)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skybook_domain::booking::{Booking, BookingStatus, Passenger};
use skybook_domain::repository::BookingRepository;
use sqlx::PgPool;
use std::error::Error;

/// Postgres-backed booking store. Booking and passenger rows are
/// written inside one transaction; the generated row id stays internal,
/// callers address bookings by PNR.
pub struct PostgresBookingRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    pnr: String,
    flight_id: i64,
    user_email: String,
    num_seats: i32,
    total_price: f64,
    status: String,
    created_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    name: String,
    age: i32,
    gender: String,
    seat_number: Option<String>,
    meal_preference: Option<String>,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_passengers(
        &self,
        booking_id: i64,
    ) -> Result<Vec<Passenger>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<PassengerRow> = sqlx::query_as(
            r#"
            SELECT name, age, gender, seat_number, meal_preference
            FROM passengers
            WHERE booking_id = $1
            ORDER BY id
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Passenger {
                name: r.name,
                age: r.age,
                gender: r.gender,
                seat_number: r.seat_number,
                meal_preference: r.meal_preference,
            })
            .collect())
    }

    async fn to_booking(&self, row: BookingRow) -> Result<Booking, Box<dyn Error + Send + Sync>> {
        let status = BookingStatus::parse(&row.status)
            .ok_or_else(|| format!("unknown booking status: {}", row.status))?;
        let passengers = self.load_passengers(row.id).await?;

        Ok(Booking {
            pnr: row.pnr,
            flight_id: row.flight_id,
            user_email: row.user_email,
            num_seats: row.num_seats,
            total_price: row.total_price,
            status,
            created_at: row.created_at,
            cancelled_at: row.cancelled_at,
            passengers,
        })
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;

        let booking_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (pnr, flight_id, user_email, num_seats, total_price, status, created_at, cancelled_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&booking.pnr)
        .bind(booking.flight_id)
        .bind(&booking.user_email)
        .bind(booking.num_seats)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.cancelled_at)
        .fetch_one(&mut *tx)
        .await?;

        for p in &booking.passengers {
            sqlx::query(
                r#"
                INSERT INTO passengers (booking_id, name, age, gender, seat_number, meal_preference)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(booking_id)
            .bind(&p.name)
            .bind(p.age)
            .bind(&p.gender)
            .bind(&p.seat_number)
            .bind(&p.meal_preference)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_pnr(
        &self,
        pnr: &str,
    ) -> Result<Option<Booking>, Box<dyn Error + Send + Sync>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, pnr, flight_id, user_email, num_seats, total_price, status, created_at, cancelled_at
            FROM bookings
            WHERE pnr = $1
            "#,
        )
        .bind(pnr)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.to_booking(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_email(
        &self,
        email: &str,
    ) -> Result<Vec<Booking>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, pnr, flight_id, user_email, num_seats, total_price, status, created_at, cancelled_at
            FROM bookings
            WHERE LOWER(user_email) = LOWER($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            bookings.push(self.to_booking(row).await?);
        }
        Ok(bookings)
    }

    async fn mark_cancelled(
        &self,
        pnr: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        sqlx::query(
            r#"
            UPDATE bookings SET status = $1, cancelled_at = $2 WHERE pnr = $3
            "#,
        )
        .bind(BookingStatus::Cancelled.as_str())
        .bind(cancelled_at)
        .bind(pnr)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

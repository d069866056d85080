use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use skybook_domain::flight::{Flight, FlightSeat};
use skybook_domain::repository::FlightRepository;
use sqlx::PgPool;
use std::error::Error;

pub struct PostgresFlightRepository {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: i64,
    flight_number: Option<String>,
    airline_name: String,
    airline_logo_url: Option<String>,
    origin: String,
    destination: String,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    price: f64,
    trip_type: String,
    total_seats: i32,
}

#[derive(sqlx::FromRow)]
struct SeatRow {
    seat_number: String,
    status: String,
    passenger_name: Option<String>,
}

impl PostgresFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_seats(&self, flight_id: i64) -> Result<Vec<FlightSeat>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<SeatRow> = sqlx::query_as(
            r#"
            SELECT seat_number, status, passenger_name
            FROM flight_seats
            WHERE flight_id = $1
            ORDER BY id
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| FlightSeat {
                seat_number: r.seat_number,
                status: r.status,
                passenger_name: r.passenger_name,
            })
            .collect())
    }

    fn to_flight(row: FlightRow, seats: Vec<FlightSeat>) -> Flight {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            airline_name: row.airline_name,
            airline_logo_url: row.airline_logo_url,
            origin: row.origin,
            destination: row.destination,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            price: row.price,
            trip_type: row.trip_type,
            total_seats: row.total_seats,
            seats,
        }
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightRepository {
    async fn create(&self, mut flight: Flight) -> Result<Flight, Box<dyn Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;

        let flight_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO flights (flight_number, airline_name, airline_logo_url, origin, destination,
                                 departure_time, arrival_time, price, trip_type, total_seats)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&flight.flight_number)
        .bind(&flight.airline_name)
        .bind(&flight.airline_logo_url)
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(flight.price)
        .bind(&flight.trip_type)
        .bind(flight.total_seats)
        .fetch_one(&mut *tx)
        .await?;

        for seat in &flight.seats {
            sqlx::query(
                r#"
                INSERT INTO flight_seats (flight_id, seat_number, status, passenger_name)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(flight_id)
            .bind(&seat.seat_number)
            .bind(&seat.status)
            .bind(&seat.passenger_name)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        flight.id = flight_id;
        Ok(flight)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Flight>, Box<dyn Error + Send + Sync>> {
        let row: Option<FlightRow> = sqlx::query_as(
            r#"
            SELECT id, flight_number, airline_name, airline_logo_url, origin, destination,
                   departure_time, arrival_time, price, trip_type, total_seats
            FROM flights
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let seats = self.load_seats(row.id).await?;
                Ok(Some(Self::to_flight(row, seats)))
            }
            None => Ok(None),
        }
    }

    async fn find_by_route_and_day(
        &self,
        origin: &str,
        destination: &str,
        day: NaiveDate,
    ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
        let start = day.and_time(chrono::NaiveTime::MIN);
        let end = start + chrono::Duration::days(1);

        let rows: Vec<FlightRow> = sqlx::query_as(
            r#"
            SELECT id, flight_number, airline_name, airline_logo_url, origin, destination,
                   departure_time, arrival_time, price, trip_type, total_seats
            FROM flights
            WHERE LOWER(origin) = LOWER($1)
              AND LOWER(destination) = LOWER($2)
              AND departure_time >= $3
              AND departure_time < $4
            ORDER BY departure_time
            "#,
        )
        .bind(origin)
        .bind(destination)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let mut flights = Vec::with_capacity(rows.len());
        for row in rows {
            let seats = self.load_seats(row.id).await?;
            flights.push(Self::to_flight(row, seats));
        }
        Ok(flights)
    }
}

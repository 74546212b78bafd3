//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `UniqueViolation` |
//! | Database (foreign key violation) | `23503` | `ForeignKeyViolation` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / RowNotFound / other | N/A | `Backend` |
//!
//! Row decoding failures (including unknown enum tags) are `Backend` errors.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use barbermatch_auth::{Account, AccountRepository, AccountView, Profile, Role};
use barbermatch_booking::{
    Appointment, AppointmentDetails, AppointmentRepository, AppointmentStatus, Barber, Barbershop,
    BarbershopDirectory, BarbershopRepository, Hairstyle, HairstyleRepository,
};
use barbermatch_core::{
    AccountId, AppointmentId, BarberId, BarbershopId, HairstyleId, StoreError, StoreResult,
};
use barbermatch_visagism::{AnalysisRepository, FaceAnalysisResult, FaceShape};

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::UniqueViolation(msg),
                Some("23503") => StoreError::ForeignKeyViolation(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => StoreError::Backend(format!("connection pool closed in {}", operation)),
        other => StoreError::Backend(format!("sqlx error in {}: {}", operation, other)),
    }
}

fn decode_error(err: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("failed to decode row: {err}"))
}

fn parse_tag<T: core::str::FromStr>(raw: String) -> StoreResult<T>
where
    T::Err: core::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| StoreError::Backend(format!("invalid stored value '{raw}': {e}")))
}

fn count_from(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

fn account_from_row(row: &PgRow) -> StoreResult<Account> {
    Ok(Account {
        id: AccountId::from_uuid(row.try_get("id").map_err(decode_error)?),
        email: row.try_get("email").map_err(decode_error)?,
        password_hash: row.try_get("password_hash").map_err(decode_error)?,
        role: parse_tag::<Role>(row.try_get("role").map_err(decode_error)?)?,
        created_at: row.try_get("created_at").map_err(decode_error)?,
    })
}

fn appointment_from_row(row: &PgRow) -> StoreResult<Appointment> {
    Ok(Appointment {
        id: AppointmentId::from_uuid(row.try_get("id").map_err(decode_error)?),
        date: row.try_get("date").map_err(decode_error)?,
        status: parse_tag::<AppointmentStatus>(row.try_get("status").map_err(decode_error)?)?,
        customer_id: AccountId::from_uuid(row.try_get("customer_id").map_err(decode_error)?),
        barber_id: BarberId::from_uuid(row.try_get("barber_id").map_err(decode_error)?),
        barbershop_id: BarbershopId::from_uuid(row.try_get("barbershop_id").map_err(decode_error)?),
    })
}

fn barber_from_row(row: &PgRow) -> StoreResult<Barber> {
    Ok(Barber {
        id: BarberId::from_uuid(row.try_get("id").map_err(decode_error)?),
        name: row.try_get("name").map_err(decode_error)?,
        specialties: row.try_get("specialties").map_err(decode_error)?,
        barbershop_id: BarbershopId::from_uuid(row.try_get("barbershop_id").map_err(decode_error)?),
    })
}

fn barbershop_from_row(row: &PgRow) -> StoreResult<Barbershop> {
    Ok(Barbershop {
        id: BarbershopId::from_uuid(row.try_get("id").map_err(decode_error)?),
        name: row.try_get("name").map_err(decode_error)?,
        address: row.try_get("address").map_err(decode_error)?,
        schedule: row.try_get("schedule").map_err(decode_error)?,
    })
}

fn hairstyle_from_row(row: &PgRow) -> StoreResult<Hairstyle> {
    Ok(Hairstyle {
        id: HairstyleId::from_uuid(row.try_get("id").map_err(decode_error)?),
        name: row.try_get("name").map_err(decode_error)?,
        description: row.try_get("description").map_err(decode_error)?,
        image_url: row.try_get("image_url").map_err(decode_error)?,
        recommended_face_shapes: row.try_get("recommended_face_shapes").map_err(decode_error)?,
    })
}

/// Decodes one row of [`DETAILS_SELECT`]; joined columns are NULL when the reference is gone.
fn details_from_row(row: &PgRow) -> StoreResult<AppointmentDetails> {
    let user = match row.try_get::<Option<Uuid>, _>("user_id").map_err(decode_error)? {
        Some(id) => Some(AccountView {
            id: AccountId::from_uuid(id),
            email: row.try_get("user_email").map_err(decode_error)?,
            role: parse_tag::<Role>(row.try_get("user_role").map_err(decode_error)?)?,
            created_at: row.try_get("user_created_at").map_err(decode_error)?,
        }),
        None => None,
    };
    let barber = match row.try_get::<Option<Uuid>, _>("b_id").map_err(decode_error)? {
        Some(id) => Some(Barber {
            id: BarberId::from_uuid(id),
            name: row.try_get("b_name").map_err(decode_error)?,
            specialties: row.try_get("b_specialties").map_err(decode_error)?,
            barbershop_id: BarbershopId::from_uuid(row.try_get("b_barbershop_id").map_err(decode_error)?),
        }),
        None => None,
    };
    let barbershop = match row.try_get::<Option<Uuid>, _>("s_id").map_err(decode_error)? {
        Some(id) => Some(Barbershop {
            id: BarbershopId::from_uuid(id),
            name: row.try_get("s_name").map_err(decode_error)?,
            address: row.try_get("s_address").map_err(decode_error)?,
            schedule: row.try_get("s_schedule").map_err(decode_error)?,
        }),
        None => None,
    };

    Ok(AppointmentDetails {
        id: AppointmentId::from_uuid(row.try_get("id").map_err(decode_error)?),
        date: row.try_get("date").map_err(decode_error)?,
        status: parse_tag::<AppointmentStatus>(row.try_get("status").map_err(decode_error)?)?,
        user,
        barber,
        barbershop,
    })
}

const DETAILS_SELECT: &str = r#"
    SELECT
        a.id, a.date, a.status,
        u.id AS user_id, u.email AS user_email, u.role AS user_role, u.created_at AS user_created_at,
        b.id AS b_id, b.name AS b_name, b.specialties AS b_specialties, b.barbershop_id AS b_barbershop_id,
        s.id AS s_id, s.name AS s_name, s.address AS s_address, s.schedule AS s_schedule
    FROM appointments a
    LEFT JOIN accounts u ON u.id = a.customer_id
    LEFT JOIN barbers b ON b.id = a.barber_id
    LEFT JOIN barbershops s ON s.id = a.barbershop_id
"#;

#[derive(Debug, Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountStore {
    #[instrument(skip(self, account), fields(account_id = %account.id), err)]
    async fn insert(&self, account: Account) -> StoreResult<Account> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_account", e))?;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let row = sqlx::query("SELECT id, email, password_hash, role, created_at FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_account_by_email", e))?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> StoreResult<Option<Account>> {
        let row = sqlx::query("SELECT id, email, password_hash, role, created_at FROM accounts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_account_by_id", e))?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn list(&self) -> StoreResult<Vec<Account>> {
        let rows = sqlx::query("SELECT id, email, password_hash, role, created_at FROM accounts ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_accounts", e))?;
        rows.iter().map(account_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: AccountId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_account", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_profile(&self, account_id: AccountId) -> StoreResult<Option<Profile>> {
        let row = sqlx::query("SELECT account_id, name, style_preferences FROM profiles WHERE account_id = $1")
            .bind(account_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_profile", e))?;
        match row {
            Some(row) => Ok(Some(Profile {
                account_id,
                name: row.try_get("name").map_err(decode_error)?,
                style_preferences: row.try_get("style_preferences").map_err(decode_error)?,
            })),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, profile), fields(account_id = %profile.account_id), err)]
    async fn save_profile(&self, profile: Profile) -> StoreResult<Profile> {
        sqlx::query(
            r#"
            INSERT INTO profiles (account_id, name, style_preferences)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id)
            DO UPDATE SET
                name = EXCLUDED.name,
                style_preferences = EXCLUDED.style_preferences
            "#,
        )
        .bind(profile.account_id.as_uuid())
        .bind(&profile.name)
        .bind(&profile.style_preferences)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_profile", e))?;
        Ok(profile)
    }

    async fn count(&self) -> StoreResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_accounts", e))?;
        Ok(count_from(n))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresAppointmentStore {
    pool: PgPool,
}

impl PostgresAppointmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentStore {
    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id), err)]
    async fn insert(&self, appointment: Appointment) -> StoreResult<Appointment> {
        let row = sqlx::query(
            r#"
            INSERT INTO appointments (id, date, status, customer_id, barber_id, barbershop_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, date, status, customer_id, barber_id, barbershop_id
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.date)
        .bind(appointment.status.as_str())
        .bind(appointment.customer_id.as_uuid())
        .bind(appointment.barber_id.as_uuid())
        .bind(appointment.barbershop_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_appointment", e))?;

        match row {
            Some(row) => appointment_from_row(&row),
            None => Err(StoreError::Backend("appointment insert returned no row".to_string())),
        }
    }

    async fn find_by_id(&self, id: AppointmentId) -> StoreResult<Option<Appointment>> {
        let row = sqlx::query(
            "SELECT id, date, status, customer_id, barber_id, barbershop_id FROM appointments WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_appointment", e))?;
        row.as_ref().map(appointment_from_row).transpose()
    }

    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id), err)]
    async fn save(&self, appointment: Appointment) -> StoreResult<Appointment> {
        let result = sqlx::query(
            r#"
            UPDATE appointments
            SET date = $2, status = $3, customer_id = $4, barber_id = $5, barbershop_id = $6
            WHERE id = $1
            "#,
        )
        .bind(appointment.id.as_uuid())
        .bind(appointment.date)
        .bind(appointment.status.as_str())
        .bind(appointment.customer_id.as_uuid())
        .bind(appointment.barber_id.as_uuid())
        .bind(appointment.barbershop_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_appointment", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Backend(format!("appointment {} vanished", appointment.id)));
        }
        Ok(appointment)
    }

    async fn list_detailed(&self) -> StoreResult<Vec<AppointmentDetails>> {
        let sql = format!("{DETAILS_SELECT} ORDER BY a.created_at, a.id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_appointments", e))?;
        rows.iter().map(details_from_row).collect()
    }

    async fn list_detailed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<AppointmentDetails>> {
        let sql = format!("{DETAILS_SELECT} WHERE a.date BETWEEN $1 AND $2 ORDER BY a.created_at, a.id");
        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_appointments_between", e))?;
        rows.iter().map(details_from_row).collect()
    }

    async fn count(&self) -> StoreResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appointments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_appointments", e))?;
        Ok(count_from(n))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresBarbershopStore {
    pool: PgPool,
}

impl PostgresBarbershopStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarbershopRepository for PostgresBarbershopStore {
    #[instrument(skip(self, barbershop), fields(barbershop_id = %barbershop.id), err)]
    async fn insert(&self, barbershop: Barbershop) -> StoreResult<Barbershop> {
        sqlx::query("INSERT INTO barbershops (id, name, address, schedule) VALUES ($1, $2, $3, $4)")
            .bind(barbershop.id.as_uuid())
            .bind(&barbershop.name)
            .bind(&barbershop.address)
            .bind(&barbershop.schedule)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_barbershop", e))?;
        Ok(barbershop)
    }

    async fn find_by_id(&self, id: BarbershopId) -> StoreResult<Option<Barbershop>> {
        let row = sqlx::query("SELECT id, name, address, schedule FROM barbershops WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_barbershop", e))?;
        row.as_ref().map(barbershop_from_row).transpose()
    }

    async fn list_directory(&self) -> StoreResult<Vec<BarbershopDirectory>> {
        let shops = sqlx::query("SELECT id, name, address, schedule FROM barbershops ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_barbershops", e))?;
        let barbers = sqlx::query("SELECT id, name, specialties, barbershop_id FROM barbers ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_barbers", e))?;
        let appointments = sqlx::query(
            "SELECT id, date, status, customer_id, barber_id, barbershop_id FROM appointments ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_shop_appointments", e))?;

        let mut barbers_by_shop: HashMap<BarbershopId, Vec<Barber>> = HashMap::new();
        for row in &barbers {
            let barber = barber_from_row(row)?;
            barbers_by_shop.entry(barber.barbershop_id).or_default().push(barber);
        }
        let mut appointments_by_shop: HashMap<BarbershopId, Vec<Appointment>> = HashMap::new();
        for row in &appointments {
            let appointment = appointment_from_row(row)?;
            appointments_by_shop
                .entry(appointment.barbershop_id)
                .or_default()
                .push(appointment);
        }

        shops
            .iter()
            .map(|row| -> StoreResult<BarbershopDirectory> {
                let barbershop = barbershop_from_row(row)?;
                Ok(BarbershopDirectory {
                    barbers: barbers_by_shop.remove(&barbershop.id).unwrap_or_default(),
                    appointments: appointments_by_shop.remove(&barbershop.id).unwrap_or_default(),
                    barbershop,
                })
            })
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: BarbershopId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM barbershops WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_barbershop", e))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, barber), fields(barber_id = %barber.id), err)]
    async fn insert_barber(&self, barber: Barber) -> StoreResult<Barber> {
        sqlx::query("INSERT INTO barbers (id, name, specialties, barbershop_id) VALUES ($1, $2, $3, $4)")
            .bind(barber.id.as_uuid())
            .bind(&barber.name)
            .bind(&barber.specialties)
            .bind(barber.barbershop_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_barber", e))?;
        Ok(barber)
    }

    async fn count(&self) -> StoreResult<u64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM barbershops")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_barbershops", e))?;
        Ok(count_from(n))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresHairstyleStore {
    pool: PgPool,
}

impl PostgresHairstyleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HairstyleRepository for PostgresHairstyleStore {
    #[instrument(skip(self, hairstyle), fields(hairstyle_id = %hairstyle.id), err)]
    async fn insert(&self, hairstyle: Hairstyle) -> StoreResult<Hairstyle> {
        sqlx::query(
            r#"
            INSERT INTO hairstyles (id, name, description, image_url, recommended_face_shapes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(hairstyle.id.as_uuid())
        .bind(&hairstyle.name)
        .bind(&hairstyle.description)
        .bind(&hairstyle.image_url)
        .bind(&hairstyle.recommended_face_shapes)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_hairstyle", e))?;
        Ok(hairstyle)
    }

    async fn list(&self) -> StoreResult<Vec<Hairstyle>> {
        let rows = sqlx::query(
            "SELECT id, name, description, image_url, recommended_face_shapes FROM hairstyles ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_hairstyles", e))?;
        rows.iter().map(hairstyle_from_row).collect()
    }

    async fn find_by_face_shape(&self, face_shape: &str) -> StoreResult<Vec<Hairstyle>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, image_url, recommended_face_shapes
            FROM hairstyles
            WHERE $1 = ANY(recommended_face_shapes)
            ORDER BY created_at, id
            "#,
        )
        .bind(face_shape)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("filter_hairstyles", e))?;
        rows.iter().map(hairstyle_from_row).collect()
    }
}

#[derive(Debug, Clone)]
pub struct PostgresAnalysisStore {
    pool: PgPool,
}

impl PostgresAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for PostgresAnalysisStore {
    #[instrument(skip(self, result), fields(analysis_id = %result.id), err)]
    async fn insert(&self, result: FaceAnalysisResult) -> StoreResult<FaceAnalysisResult> {
        let row = sqlx::query(
            r#"
            INSERT INTO face_analysis_results (id, face_shape, confidence)
            VALUES ($1, $2, $3)
            RETURNING face_shape
            "#,
        )
        .bind(result.id.as_uuid())
        .bind(result.face_shape.as_str())
        .bind(result.confidence)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_face_analysis", e))?;

        let stored: FaceShape = parse_tag(row.try_get("face_shape").map_err(decode_error)?)?;
        Ok(FaceAnalysisResult {
            face_shape: stored,
            ..result
        })
    }
}

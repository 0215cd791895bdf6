use wellness_backend::{
    api::router::create_router,
    config::Config,
    domain::models::auth::Claims,
    domain::models::user::{NewUser, ProviderType, Role, User},
    domain::ports::NotificationService,
    error::AppError,
    infra::repositories::{
        sqlite_appointment_repo::SqliteAppointmentRepo,
        sqlite_availability_repo::SqliteAvailabilityRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// Captures notifications instead of delivering them, so tests can assert
/// on recipients and message content.
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl NotificationService for RecordingNotifier {
    async fn notify(&self, recipient_id: i64, message: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient_id, message.to_string()));
        Ok(())
    }
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(i64, String)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifier: Arc<RecordingNotifier>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            notify_service_url: "http://localhost".to_string(),
            notify_service_token: "token".to_string(),
            jwt_secret: "test-secret".to_string(),
        };

        let notifier = Arc::new(RecordingNotifier {
            sent: Mutex::new(Vec::new()),
        });

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            availability_repo: Arc::new(SqliteAvailabilityRepo::new(pool.clone())),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            notifier: notifier.clone(),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            notifier,
        }
    }

    pub async fn seed_user(
        &self,
        username: &str,
        role: Role,
        provider_type: Option<ProviderType>,
    ) -> User {
        self.state
            .user_repo
            .create(&NewUser {
                username: username.to_string(),
                role,
                provider_type,
            })
            .await
            .expect("Failed to seed user")
    }

    pub fn token_for(&self, user: &User) -> String {
        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: (Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.state.config.jwt_secret.as_bytes()),
        )
        .unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

/// First Monday of the given month; slot computation has no dependency on
/// "now", so tests use fixed future months.
#[allow(dead_code)]
pub fn first_weekday_of(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let mut date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

use barbermatch_api::app::build_app;
use barbermatch_api::config::ApiConfig;
use barbermatch_auth::{JwtClaims, Role};
use barbermatch_core::AccountId;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

const SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Same router as prod, in-memory stores, ephemeral port.
        let app = build_app(ApiConfig::in_memory(jwt_secret))
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut req = self.client.post(self.url(path)).json(&body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        read(req.send().await.unwrap()).await
    }

    async fn put(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap();
        read(res).await
    }

    async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        read(req.send().await.unwrap()).await
    }

    async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        read(res).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn read(res: reqwest::Response) -> (StatusCode, Value) {
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    let body = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, body)
}

fn mint_jwt(jwt_secret: &str, role: Role) -> String {
    let claims = JwtClaims::for_account(
        AccountId::new(),
        format!("{role}@example.com"),
        role,
        Utc::now(),
        Duration::minutes(10),
    );

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn booking(date: &str) -> Value {
    json!({
        "date": date,
        "customerId": AccountId::new().to_string(),
        "barberId": AccountId::new().to_string(),
        "barbershopId": AccountId::new().to_string(),
    })
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(SECRET).await;
    let (status, _) = srv.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn(SECRET).await;

    let (status, body) = srv.get("/appointments", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = srv.get("/appointments", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Signed with another secret.
    let forged = mint_jwt("other-secret", Role::Admin);
    let (status, _) = srv.get("/admin/dashboard", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_use_the_issued_token() {
    let srv = TestServer::spawn(SECRET).await;
    let creds = json!({ "email": "ana@example.com", "password": "s3cret!", "role": "client" });

    let (status, session) = srv.post("/auth/register", None, creds.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["account"]["email"], "ana@example.com");
    assert_eq!(session["account"]["role"], "client");
    assert!(session["account"].get("passwordHash").is_none());
    assert!(session["account"].get("password").is_none());

    let (status, body) = srv.post("/auth/register", None, creds.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (status, session) = srv
        .post(
            "/auth/login",
            None,
            json!({ "email": "ana@example.com", "password": "s3cret!" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = session["token"].as_str().unwrap().to_string();
    let account_id = session["account"]["id"].as_str().unwrap().to_string();

    let (status, me) = srv.get("/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], account_id.as_str());
    assert_eq!(me["profile"], Value::Null);

    let (status, profile) = srv
        .put(
            &format!("/users/profile/{account_id}"),
            &token,
            json!({ "name": "Ana", "stylePreferences": "short fade" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Ana");
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let srv = TestServer::spawn(SECRET).await;
    srv.post(
        "/auth/register",
        None,
        json!({ "email": "leo@example.com", "password": "s3cret!", "role": "barber" }),
    )
    .await;

    for creds in [
        json!({ "email": "leo@example.com", "password": "wrong-password" }),
        json!({ "email": "nobody@example.com", "password": "s3cret!" }),
    ] {
        let (status, body) = srv.post("/auth/login", None, creds).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid credentials");
    }
}

#[tokio::test]
async fn another_users_profile_is_forbidden() {
    let srv = TestServer::spawn(SECRET).await;
    let token = mint_jwt(SECRET, Role::Client);

    let path = format!("/users/profile/{}", AccountId::new());
    let (status, _) = srv.put(&path, &token, json!({ "name": "Mallory" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admins pass the ownership check and see the missing account.
    let admin = mint_jwt(SECRET, Role::Admin);
    let (status, _) = srv.put(&path, &admin, json!({ "name": "Mallory" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn appointment_lifecycle() {
    let srv = TestServer::spawn(SECRET).await;
    let token = mint_jwt(SECRET, Role::Client);

    let (status, created) = srv
        .post("/appointments", Some(&token), booking("2025-09-10T10:00:00.000Z"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["date"], "2025-09-10T10:00:00.000Z");
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = srv
        .put(&format!("/appointments/{id}"), &token, json!({ "status": "confirmed" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "confirmed");
    assert_eq!(updated["date"], "2025-09-10T10:00:00.000Z");

    let (status, cancelled) = srv.delete(&format!("/appointments/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");

    // Cancelled bookings stay listed.
    let (status, list) = srv.get("/appointments", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["status"], "cancelled");
    assert_eq!(list[0]["user"], Value::Null);
}

#[tokio::test]
async fn invalid_appointment_date_is_bad_request() {
    let srv = TestServer::spawn(SECRET).await;
    let token = mint_jwt(SECRET, Role::Client);

    let (status, body) = srv.post("/appointments", Some(&token), booking("not-a-date")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date format");

    let (_, list) = srv.get("/appointments", Some(&token)).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_appointment_is_not_found() {
    let srv = TestServer::spawn(SECRET).await;
    let token = mint_jwt(SECRET, Role::Client);
    let path = format!("/appointments/{}", AccountId::new());

    let (status, _) = srv.put(&path, &token, json!({ "status": "confirmed" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = srv.delete(&path, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = srv.delete("/appointments/42", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The date is checked before the lookup.
    let (status, body) = srv.put(&path, &token, json!({ "date": "not-a-date" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid date format");

    let (status, _) = srv.post(&format!("{path}/remind"), Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reminders_are_sent_for_booked_slots() {
    let srv = TestServer::spawn(SECRET).await;
    let token = mint_jwt(SECRET, Role::Client);

    let (_, created) = srv
        .post("/appointments", Some(&token), booking("2025-09-10T10:00:00.000Z"))
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = srv
        .post(&format!("/appointments/{id}/remind"), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "delivered": true }));

    let (status, _) = srv.post(&format!("/appointments/{id}/remind"), None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_registration_is_rejected() {
    let srv = TestServer::spawn(SECRET).await;
    for (email, password) in [("ana@example..com", "s3cret!"), ("ana@example.com", "12345")] {
        let (status, body) = srv
            .post(
                "/auth/register",
                None,
                json!({ "email": email, "password": password, "role": "client" }),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
        assert_eq!(body["error"], "validation_error");
    }
}

#[tokio::test]
async fn appointments_filter_by_inclusive_range() {
    let srv = TestServer::spawn(SECRET).await;
    let token = mint_jwt(SECRET, Role::Client);
    for date in ["2025-09-01T00:00:00.000Z", "2025-09-15T12:00:00.000Z", "2025-10-01T00:00:00.000Z"] {
        srv.post("/appointments", Some(&token), booking(date)).await;
    }

    let (status, list) = srv
        .get(
            "/appointments?startDate=2025-09-01T00:00:00.000Z&endDate=2025-09-30T23:59:59.999Z",
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    // Only one bound: no filtering.
    let (_, list) = srv.get("/appointments?startDate=2025-09-02", Some(&token)).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let srv = TestServer::spawn(SECRET).await;
    let client = mint_jwt(SECRET, Role::Client);
    let admin = mint_jwt(SECRET, Role::Admin);

    for path in ["/admin/users", "/admin/barbershops", "/admin/appointments", "/admin/dashboard"] {
        let (status, body) = srv.get(path, Some(&client)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
        assert_eq!(body["error"], "forbidden");

        let (status, _) = srv.get(path, Some(&admin)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn dashboard_counts_and_admin_deletions() {
    let srv = TestServer::spawn(SECRET).await;
    let admin = mint_jwt(SECRET, Role::Admin);

    let (_, session) = srv
        .post(
            "/auth/register",
            None,
            json!({ "email": "ana@example.com", "password": "s3cret!", "role": "client" }),
        )
        .await;
    let user_id = session["account"]["id"].as_str().unwrap().to_string();

    let (status, shop) = srv
        .post(
            "/barbershops",
            Some(&admin),
            json!({ "name": "Fade Factory", "address": "Calle 1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let shop_id = shop["id"].as_str().unwrap().to_string();
    srv.post("/appointments", Some(&admin), booking("2025-09-10T10:00:00.000Z"))
        .await;

    let (status, stats) = srv.get("/admin/dashboard", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!({ "users": 1, "appointments": 1, "barbershops": 1 }));

    let (status, body) = srv.delete(&format!("/admin/users/{user_id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    let (status, _) = srv.delete(&format!("/admin/users/{user_id}"), &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = srv.delete(&format!("/admin/barbershops/{shop_id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Barbershop deleted successfully");

    let (_, stats) = srv.get("/admin/dashboard", Some(&admin)).await;
    assert_eq!(stats, json!({ "users": 0, "appointments": 1, "barbershops": 0 }));
}

#[tokio::test]
async fn barbershops_and_barbers() {
    let srv = TestServer::spawn(SECRET).await;
    let admin = mint_jwt(SECRET, Role::Admin);
    let barber = mint_jwt(SECRET, Role::Barber);

    let (status, _) = srv
        .post("/barbershops", Some(&barber), json!({ "name": "Nope", "address": "Calle 2" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = srv
        .post("/barbershops", Some(&admin), json!({ "name": " ", "address": "Calle 2" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, shop) = srv
        .post(
            "/barbershops",
            Some(&admin),
            json!({ "name": "Fade Factory", "address": "Calle 1", "schedule": "Mon-Sat 9:00-19:00" }),
        )
        .await;
    let shop_id = shop["id"].as_str().unwrap().to_string();

    let (status, added) = srv
        .post(
            &format!("/barbershops/{shop_id}/barbers"),
            Some(&barber),
            json!({ "name": "Leo", "specialties": ["fade", "beard"] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(added["barbershopId"], shop_id.as_str());

    let (status, _) = srv
        .post(
            &format!("/barbershops/{}/barbers", AccountId::new()),
            Some(&barber),
            json!({ "name": "Leo" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = srv.get("/barbershops", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Fade Factory");
    assert_eq!(list[0]["barbers"][0]["name"], "Leo");
}

#[tokio::test]
async fn hairstyle_catalog_filter() {
    let srv = TestServer::spawn(SECRET).await;
    let admin = mint_jwt(SECRET, Role::Admin);

    for (name, shapes) in [("Pompadour", json!(["oval", "square"])), ("Buzz cut", json!(["round"]))] {
        let (status, _) = srv
            .post(
                "/hairstyles",
                Some(&admin),
                json!({ "name": name, "recommendedFaceShapes": shapes }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = srv.get("/hairstyles/filter?faceShape=oval", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Pompadour");

    let (_, list) = srv.get("/hairstyles/filter?faceShape=heart", None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = srv.get("/hairstyles/filter", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, all) = srv.get("/hairstyles", None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn visagism_analysis_recommends_hairstyles() {
    let srv = TestServer::spawn(SECRET).await;
    let admin = mint_jwt(SECRET, Role::Admin);
    let client = mint_jwt(SECRET, Role::Client);

    srv.post(
        "/hairstyles",
        Some(&admin),
        json!({ "name": "Quiff", "recommendedFaceShapes": ["oval"] }),
    )
    .await;

    let (status, analysis) = srv
        .post("/visagism/analyze", Some(&client), json!({ "image": "data:image/png;base64,AAAA" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(analysis["faceShape"], "oval");
    assert_eq!(analysis["confidence"], 0.95);
    assert_eq!(analysis["recommendedHairstyles"][0]["name"], "Quiff");

    let (status, _) = srv
        .post("/visagism/analyze", Some(&client), json!({ "image": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

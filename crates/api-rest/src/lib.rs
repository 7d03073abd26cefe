//! # API REST
//!
//! REST surface for the clinic workflow.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! All business rules live in `clinic-core`; handlers translate between
//! wire DTOs and core operations and map `WorkflowError` onto HTTP
//! statuses. The core never retries; any retry affordance is the
//! client's.

#![warn(rust_2018_idioms)]

use std::str::FromStr;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use clinic_core::{
    seed, Appointment, ClinicService, MedicalRecord, NonEmptyText, Role, TriagePriority, User,
    WorkflowError,
};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ClinicService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_users,
        update_user_status,
        user_dashboard,
        register_patient,
        triage_queue,
        next_in_queue,
        accept_appointment,
        update_rough_notes,
        record_consultation,
        appointment_record,
        doctor_appointments,
        patient_appointments,
        sign_record,
        seed_demo,
    ),
    components(schemas(
        HealthRes,
        UserRes,
        UsersRes,
        StatusReq,
        DashboardRes,
        RegisterPatientReq,
        RegisterPatientRes,
        AppointmentRes,
        QueueRes,
        NextRes,
        AcceptReq,
        NotesReq,
        RecordConsultationReq,
        RecordRes,
        SeedRes,
    ))
)]
struct ApiDoc;

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct UserRes {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: String,
}

impl From<User> for UserRes {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.to_string(),
            role: user.role.to_string(),
            status: user.status,
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct UsersRes {
    pub users: Vec<UserRes>,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct StatusReq {
    pub status: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct DashboardRes {
    pub destination: String,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct RegisterPatientReq {
    pub patient_name: String,
    pub triage_priority: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct RegisterPatientRes {
    pub patient: UserRes,
    pub appointment: AppointmentRes,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct AppointmentRes {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub priority: String,
    pub status: String,
    pub rough_notes: String,
    pub created_at: String,
}

impl From<Appointment> for AppointmentRes {
    fn from(apt: Appointment) -> Self {
        Self {
            id: apt.id.to_string(),
            patient_id: apt.patient_id.to_string(),
            doctor_id: apt.doctor_id.map(|id| id.to_string()),
            priority: apt.priority.to_string(),
            status: apt.status.to_string(),
            rough_notes: apt.rough_notes,
            created_at: apt.created_at.to_rfc3339(),
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct QueueRes {
    pub appointments: Vec<AppointmentRes>,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct NextRes {
    pub appointment: Option<AppointmentRes>,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct AcceptReq {
    pub doctor_id: String,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct NotesReq {
    pub rough_notes: String,
}

#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct RecordConsultationReq {
    pub rough_notes: String,
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct RecordRes {
    pub id: String,
    pub appointment_id: String,
    pub soap_note: String,
    pub patient_summary: String,
    pub prescription: Option<String>,
    pub signed: bool,
}

impl From<MedicalRecord> for RecordRes {
    fn from(record: MedicalRecord) -> Self {
        Self {
            id: record.id.to_string(),
            appointment_id: record.appointment_id.to_string(),
            soap_note: record.soap_note,
            patient_summary: record.patient_summary,
            prescription: record.prescription,
            signed: record.signed,
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct SeedRes {
    pub users: Vec<UserRes>,
}

#[derive(serde::Deserialize)]
pub struct UsersQuery {
    pub role: Option<String>,
}

type Rejection = (StatusCode, String);

/// Maps a core failure onto an HTTP status. Provider failures become 502
/// so clients can tell "the service behind us failed" apart from their
/// own bad requests.
fn reject(err: WorkflowError) -> Rejection {
    let status = match &err {
        WorkflowError::NotFound { .. } => StatusCode::NOT_FOUND,
        WorkflowError::InvalidTransition { .. } => StatusCode::CONFLICT,
        WorkflowError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        WorkflowError::Provider(_) => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
        tracing::error!("workflow error: {err}");
    } else {
        tracing::warn!("workflow rejection: {err}");
    }
    (status, err.to_string())
}

fn bad_request(message: impl Into<String>) -> Rejection {
    (StatusCode::BAD_REQUEST, message.into())
}

/// Where a user lands after role switch. Pure mapping from role to
/// destination; no branching buried in handlers.
pub fn dashboard_destination(role: Role, user_id: Uuid) -> String {
    match role {
        Role::Doctor => format!("/doctors/{user_id}/appointments"),
        Role::Nurse => "/queue".to_string(),
        Role::Patient => format!("/patients/{user_id}/appointments"),
    }
}

/// Builds the clinic REST router with all workflow routes, Swagger UI
/// and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users))
        .route("/users/:id/status", post(update_user_status))
        .route("/users/:id/dashboard", get(user_dashboard))
        .route("/patients", post(register_patient))
        .route("/queue", get(triage_queue))
        .route("/queue/next", get(next_in_queue))
        .route("/appointments/:id/accept", post(accept_appointment))
        .route("/appointments/:id/notes", put(update_rough_notes))
        .route("/appointments/:id/record", post(record_consultation))
        .route("/appointments/:id/record", get(appointment_record))
        .route("/doctors/:id/appointments", get(doctor_appointments))
        .route("/patients/:id/appointments", get(patient_appointments))
        .route("/records/:id/sign", post(sign_record))
        .route("/seed", post(seed_demo))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "clinic REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/users",
    params(("role" = Option<String>, Query, description = "Filter by role")),
    responses(
        (status = 200, description = "Users, optionally filtered by role", body = UsersRes),
        (status = 400, description = "Unrecognised role")
    )
)]
/// Lists users, optionally restricted to a single role.
#[axum::debug_handler]
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersRes>, Rejection> {
    let users = match query.role {
        Some(raw) => {
            let role = Role::from_str(&raw).map_err(|e| bad_request(e.to_string()))?;
            state.service.users_with_role(role)
        }
        None => [Role::Doctor, Role::Nurse, Role::Patient]
            .into_iter()
            .flat_map(|role| state.service.users_with_role(role))
            .collect(),
    };
    Ok(Json(UsersRes {
        users: users.into_iter().map(UserRes::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/users/{id}/status",
    request_body = StatusReq,
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Updated user", body = UserRes),
        (status = 404, description = "User not found")
    )
)]
/// Updates a staff member's free-text availability status.
#[axum::debug_handler]
async fn update_user_status(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<StatusReq>,
) -> Result<Json<UserRes>, Rejection> {
    let user = state
        .service
        .update_staff_status(id, &req.status)
        .map_err(reject)?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/users/{id}/dashboard",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Dashboard destination for the user's role", body = DashboardRes),
        (status = 404, description = "User not found")
    )
)]
/// Role switcher: resolves the user's role to their dashboard route.
#[axum::debug_handler]
async fn user_dashboard(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<DashboardRes>, Rejection> {
    let user = state.service.user(id).map_err(reject)?;
    Ok(Json(DashboardRes {
        destination: dashboard_destination(user.role, user.id),
    }))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = RegisterPatientReq,
    responses(
        (status = 200, description = "Patient registered into the triage queue", body = RegisterPatientRes),
        (status = 400, description = "Empty name or unrecognised priority")
    )
)]
/// Nurse registration: creates the patient and a WAITING appointment
/// with the given triage priority.
#[axum::debug_handler]
async fn register_patient(
    State(state): State<AppState>,
    Json(req): Json<RegisterPatientReq>,
) -> Result<Json<RegisterPatientRes>, Rejection> {
    let name = NonEmptyText::new(&req.patient_name)
        .map_err(|_| bad_request("patient_name cannot be empty"))?;
    let priority = TriagePriority::from_str(&req.triage_priority)
        .map_err(|e| bad_request(e.to_string()))?;

    let (patient, appointment) = state.service.register_patient(name, priority);
    Ok(Json(RegisterPatientRes {
        patient: patient.into(),
        appointment: appointment.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/queue",
    responses(
        (status = 200, description = "WAITING appointments in triage order", body = QueueRes)
    )
)]
/// The triage queue: HIGH before MEDIUM before LOW, registration order
/// within a priority.
#[axum::debug_handler]
async fn triage_queue(State(state): State<AppState>) -> Json<QueueRes> {
    Json(QueueRes {
        appointments: state
            .service
            .triage_queue()
            .into_iter()
            .map(AppointmentRes::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/queue/next",
    responses(
        (status = 200, description = "The next appointment to call in, or null when nobody waits", body = NextRes)
    )
)]
/// Head of the triage queue. An empty queue is an empty result, not an
/// error.
#[axum::debug_handler]
async fn next_in_queue(State(state): State<AppState>) -> Json<NextRes> {
    Json(NextRes {
        appointment: state.service.next_in_queue().map(AppointmentRes::from),
    })
}

#[utoipa::path(
    post,
    path = "/appointments/{id}/accept",
    request_body = AcceptReq,
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment moved to IN_CONSULT", body = AppointmentRes),
        (status = 404, description = "Appointment or doctor not found"),
        (status = 409, description = "Appointment is not WAITING")
    )
)]
/// A doctor takes the case. Exactly one of two concurrent accepts can
/// succeed.
#[axum::debug_handler]
async fn accept_appointment(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<AcceptReq>,
) -> Result<Json<AppointmentRes>, Rejection> {
    let doctor_id =
        Uuid::parse_str(&req.doctor_id).map_err(|_| bad_request("doctor_id is not a UUID"))?;
    let accepted = state.service.accept(id, doctor_id).map_err(reject)?;
    Ok(Json(accepted.into()))
}

#[utoipa::path(
    put,
    path = "/appointments/{id}/notes",
    request_body = NotesReq,
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Rough notes updated", body = AppointmentRes),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Appointment already documented")
    )
)]
/// Updates the dictated rough notes; they stay mutable until the
/// consultation is documented.
#[axum::debug_handler]
async fn update_rough_notes(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<NotesReq>,
) -> Result<Json<AppointmentRes>, Rejection> {
    let updated = state
        .service
        .record_rough_notes(id, &req.rough_notes)
        .map_err(reject)?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    post,
    path = "/appointments/{id}/record",
    request_body = RecordConsultationReq,
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Medical record generated and appointment completed", body = RecordRes),
        (status = 404, description = "Appointment not found"),
        (status = 409, description = "Appointment is not IN_CONSULT"),
        (status = 502, description = "Completion provider failed; nothing was persisted")
    )
)]
/// Runs the documentation pipeline. On provider failure nothing is
/// persisted and the appointment stays IN_CONSULT, so the call can be
/// retried as-is.
#[axum::debug_handler]
async fn record_consultation(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
    Json(req): Json<RecordConsultationReq>,
) -> Result<Json<RecordRes>, Rejection> {
    let rough_notes = NonEmptyText::new(&req.rough_notes)
        .map_err(|_| bad_request("rough_notes cannot be empty"))?;
    let record = state
        .service
        .generate_and_save(id, rough_notes)
        .await
        .map_err(reject)?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}/record",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment's medical record", body = RecordRes),
        (status = 404, description = "No record exists for this appointment")
    )
)]
/// Fetches the medical record of a documented appointment.
#[axum::debug_handler]
async fn appointment_record(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<RecordRes>, Rejection> {
    match state.service.record_for_appointment(id) {
        Some(record) => Ok(Json(record.into())),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("no medical record for appointment {id}"),
        )),
    }
}

#[utoipa::path(
    get,
    path = "/doctors/{id}/appointments",
    params(("id" = String, Path, description = "Doctor id")),
    responses(
        (status = 200, description = "Appointments assigned to the doctor", body = QueueRes)
    )
)]
#[axum::debug_handler]
async fn doctor_appointments(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Json<QueueRes> {
    Json(QueueRes {
        appointments: state
            .service
            .doctor_appointments(id)
            .into_iter()
            .map(AppointmentRes::from)
            .collect(),
    })
}

#[utoipa::path(
    get,
    path = "/patients/{id}/appointments",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's appointments", body = QueueRes)
    )
)]
#[axum::debug_handler]
async fn patient_appointments(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Json<QueueRes> {
    Json(QueueRes {
        appointments: state
            .service
            .patient_appointments(id)
            .into_iter()
            .map(AppointmentRes::from)
            .collect(),
    })
}

#[utoipa::path(
    post,
    path = "/records/{id}/sign",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Signed record; re-signing is a no-op", body = RecordRes),
        (status = 404, description = "Record not found")
    )
)]
/// Signs a medical record. Idempotent, so safe to retry.
#[axum::debug_handler]
async fn sign_record(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<Uuid>,
) -> Result<Json<RecordRes>, Rejection> {
    let record = state.service.sign(id).map_err(reject)?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    post,
    path = "/seed",
    responses(
        (status = 200, description = "Demo users created", body = SeedRes)
    )
)]
/// Seeds sample doctors, a nurse and patients for local development.
#[axum::debug_handler]
async fn seed_demo(State(state): State<AppState>) -> Result<Json<SeedRes>, Rejection> {
    let users = seed::seed_demo_data(state.service.store().as_ref()).map_err(reject)?;
    Ok(Json(SeedRes {
        users: users.into_iter().map(UserRes::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use clinic_core::{CompletionProvider, MemoryStore, ProviderError};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct CannedProvider {
        fail: bool,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        async fn draft_clinical_note(&self, _rough: &str) -> Result<String, ProviderError> {
            Ok("S: fever. O: 38.5C. A: flu. P: rest".into())
        }

        async fn simplify_for_patient(&self, _note: &str) -> Result<String, ProviderError> {
            Ok("You have the flu.".into())
        }

        async fn extract_prescription(
            &self,
            _note: &str,
        ) -> Result<Option<String>, ProviderError> {
            if self.fail {
                return Err(ProviderError::MalformedReply("scripted failure".into()));
            }
            Ok(None)
        }
    }

    fn app(fail_provider: bool) -> Router {
        let service = ClinicService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(CannedProvider {
                fail: fail_provider,
            }),
        );
        router(AppState { service })
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(req).await.expect("request should run");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should read")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };
        (status, json)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build")
    }

    async fn register(app: &Router, name: &str, priority: &str) -> String {
        let (status, body) = send(
            app,
            post_json(
                "/patients",
                serde_json::json!({ "patient_name": name, "triage_priority": priority }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["appointment"]["id"]
            .as_str()
            .expect("appointment id")
            .to_string()
    }

    async fn seed_doctor(app: &Router) -> String {
        let (status, body) = send(app, post_json("/seed", serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        body["users"][0]["id"].as_str().expect("doctor id").to_string()
    }

    #[tokio::test]
    async fn test_health_is_ok() {
        let app = app(false);
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_priority() {
        let app = app(false);
        let (status, _) = send(
            &app,
            post_json(
                "/patients",
                serde_json::json!({ "patient_name": "John", "triage_priority": "URGENT" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_queue_orders_by_priority() {
        let app = app(false);
        let low = register(&app, "A", "LOW").await;
        let high = register(&app, "B", "HIGH").await;

        let (status, body) = send(&app, get("/queue")).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["appointments"]
            .as_array()
            .expect("array")
            .iter()
            .map(|a| a["id"].as_str().expect("id"))
            .collect();
        assert_eq!(ids, vec![high.as_str(), low.as_str()]);

        let (status, body) = send(&app, get("/queue/next")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["appointment"]["id"], high.as_str());
    }

    #[tokio::test]
    async fn test_queue_next_empty_is_null_not_error() {
        let app = app(false);
        let (status, body) = send(&app, get("/queue/next")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["appointment"].is_null());
    }

    #[tokio::test]
    async fn test_full_workflow_accept_record_sign() {
        let app = app(false);
        let doctor = seed_doctor(&app).await;
        let appointment = register(&app, "John Doe", "HIGH").await;

        let (status, body) = send(
            &app,
            post_json(
                &format!("/appointments/{appointment}/accept"),
                serde_json::json!({ "doctor_id": doctor }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "IN_CONSULT");
        assert_eq!(body["doctor_id"], doctor.as_str());

        let (status, body) = send(
            &app,
            post_json(
                &format!("/appointments/{appointment}/record"),
                serde_json::json!({ "rough_notes": "fever, cough" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["signed"], false);
        assert!(body["prescription"].is_null());
        let record_id = body["id"].as_str().expect("record id").to_string();

        let (status, body) = send(
            &app,
            post_json(&format!("/records/{record_id}/sign"), serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["signed"], true);

        // Signing twice is a no-op, not an error.
        let (status, body) = send(
            &app,
            post_json(&format!("/records/{record_id}/sign"), serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["signed"], true);
    }

    #[tokio::test]
    async fn test_second_accept_conflicts() {
        let app = app(false);
        let doctor = seed_doctor(&app).await;
        let appointment = register(&app, "John Doe", "LOW").await;
        let accept = |doc: String| {
            post_json(
                &format!("/appointments/{appointment}/accept"),
                serde_json::json!({ "doctor_id": doc }),
            )
        };

        let (status, _) = send(&app, accept(doctor.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, accept(doctor)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_provider_failure_is_bad_gateway_and_nothing_persists() {
        let app = app(true);
        let doctor = seed_doctor(&app).await;
        let appointment = register(&app, "John Doe", "HIGH").await;

        let (status, _) = send(
            &app,
            post_json(
                &format!("/appointments/{appointment}/accept"),
                serde_json::json!({ "doctor_id": doctor }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            post_json(
                &format!("/appointments/{appointment}/record"),
                serde_json::json!({ "rough_notes": "fever" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = send(&app, get(&format!("/appointments/{appointment}/record"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_destination_covers_all_roles() {
        let id = Uuid::new_v4();
        assert!(dashboard_destination(Role::Doctor, id).starts_with("/doctors/"));
        assert_eq!(dashboard_destination(Role::Nurse, id), "/queue");
        assert!(dashboard_destination(Role::Patient, id).starts_with("/patients/"));
    }

    #[tokio::test]
    async fn test_users_filter_rejects_unknown_role() {
        let app = app(false);
        let (status, _) = send(&app, get("/users?role=WIZARD")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(&app, post_json("/seed", serde_json::json!({}))).await;
        let (status, body) = send(&app, get("/users?role=DOCTOR")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["users"].as_array().expect("array").len(), 2);
    }
}

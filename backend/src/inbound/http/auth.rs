//! Registration and login handlers.
//!
//! ```text
//! POST /api/auth/register {"name":"Ada","email":"a@x.com","password":"p"}
//! POST /api/auth/login {"email":"a@x.com","password":"p"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AuthSession, Error, LoginCredentials, LoginValidationError, RegistrationDetails,
    RegistrationValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{ApiResponse, ErrorEnvelope};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidationCode, field_error};

const REGISTER_REQUIRED_MESSAGE: &str = "Name, email, and password are required";
const LOGIN_REQUIRED_MESSAGE: &str = "Email and password are required";

/// Request body for `POST /api/auth/register`.
///
/// Fields are optional at the wire level so a missing field yields the same
/// 400 as a blank one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<RegisterRequest> for RegistrationDetails {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref().unwrap_or_default(),
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Public view of an authenticated user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Absent when the stored record carries no name.
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// `data` payload returned by register and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Signed bearer token valid for one day.
    pub token: String,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        let (user, token) = session.into_parts();
        Self {
            user: UserResponse {
                id: user.id().to_string(),
                name: user.display_name().map(|name| name.as_ref().to_owned()),
                email: user.email().as_ref().to_owned(),
            },
            token: token.into(),
        }
    }
}

/// Register a new account and return a token for it.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let details = RegistrationDetails::try_from(payload.into_inner())
        .map_err(|err| required_field_error(REGISTER_REQUIRED_MESSAGE, err.field().as_str()))?;
    let session = state.auth.register(details).await?;
    Ok(ApiResponse::created(AuthResponse::from(session)))
}

/// Exchange credentials for a token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Missing fields", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| required_field_error(LOGIN_REQUIRED_MESSAGE, err.field().as_str()))?;
    let session = state.auth.login(credentials).await?;
    Ok(ApiResponse::ok(AuthResponse::from(session)))
}

fn required_field_error(message: &str, field: &str) -> Error {
    field_error(message, field, ValidationCode::MissingField)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAuthService;
    use crate::domain::{AccessToken, DisplayName, EmailAddress, ErrorCode, User, UserId};
    use crate::inbound::http::test_utils::{HttpStateBuilder, read_json};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn session_for(email: &str, name: Option<&str>) -> AuthSession {
        let user = User::new(
            UserId::random(),
            EmailAddress::new(email).expect("email"),
            name.map(|value| DisplayName::new(value).expect("name")),
        );
        AuthSession::new(user, AccessToken::new("signed.token.value"))
    }

    async fn post_json(auth: MockAuthService, uri: &str, body: Value) -> (StatusCode, Value) {
        let state = HttpStateBuilder::default().auth(auth).build();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/auth").service(register).service(login)),
        )
        .await;
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let status = response.status();
        (status, read_json(response).await)
    }

    #[actix_web::test]
    async fn register_returns_created_envelope() {
        let mut auth = MockAuthService::new();
        auth.expect_register()
            .withf(|details| {
                details.email().as_ref() == "a@x.com" && details.display_name().as_ref() == "Ada"
            })
            .times(1)
            .returning(|_| Ok(session_for("a@x.com", Some("Ada"))));

        let (status, body) = post_json(
            auth,
            "/api/auth/register",
            json!({"name": "Ada", "email": "a@x.com", "password": "p"}),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["user"]["email"], json!("a@x.com"));
        assert_eq!(body["data"]["user"]["name"], json!("Ada"));
        assert_eq!(body["data"]["token"], json!("signed.token.value"));
        assert!(body["data"]["user"].get("password").is_none());
    }

    #[rstest]
    #[case(json!({"email": "a@x.com", "password": "p"}), "name")]
    #[case(json!({"name": "Ada", "email": "", "password": "p"}), "email")]
    #[case(json!({"name": "Ada", "email": "a@x.com"}), "password")]
    #[actix_web::test]
    async fn register_requires_every_field(#[case] body: Value, #[case] field: &str) {
        let mut auth = MockAuthService::new();
        auth.expect_register().never();

        let (status, body) = post_json(auth, "/api/auth/register", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Bad Request"));
        assert_eq!(body["message"], json!(REGISTER_REQUIRED_MESSAGE));
        assert_eq!(body["details"]["field"], json!(field));
        assert_eq!(body["details"]["code"], json!("missing_field"));
    }

    #[actix_web::test]
    async fn register_conflict_is_bad_request() {
        let mut auth = MockAuthService::new();
        auth.expect_register()
            .returning(|_| Err(Error::conflict("User with this email already exists")));

        let (status, body) = post_json(
            auth,
            "/api/auth/register",
            json!({"name": "Ada", "email": "a@x.com", "password": "p"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!("User with this email already exists"));
        assert_eq!(body["code"], json!("conflict"));
    }

    #[actix_web::test]
    async fn login_returns_ok_envelope() {
        let mut auth = MockAuthService::new();
        auth.expect_login()
            .withf(|creds| creds.email().as_ref() == "a@x.com" && creds.password() == "p")
            .returning(|_| Ok(session_for("a@x.com", None)));

        let (status, body) = post_json(
            auth,
            "/api/auth/login",
            json!({"email": "a@x.com", "password": "p"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["user"]["name"], Value::Null);
        assert_eq!(body["data"]["token"], json!("signed.token.value"));
    }

    #[rstest]
    #[case(json!({"password": "p"}))]
    #[case(json!({"email": "a@x.com", "password": ""}))]
    #[actix_web::test]
    async fn login_requires_both_fields(#[case] body: Value) {
        let mut auth = MockAuthService::new();
        auth.expect_login().never();

        let (status, body) = post_json(auth, "/api/auth/login", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], json!(LOGIN_REQUIRED_MESSAGE));
    }

    #[actix_web::test]
    async fn login_failure_is_unauthorised() {
        let mut auth = MockAuthService::new();
        auth.expect_login()
            .returning(|_| Err(Error::unauthorized("Invalid credentials")));

        let (status, body) = post_json(
            auth,
            "/api/auth/login",
            json!({"email": "a@x.com", "password": "wrong"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!("Unauthorized"));
        assert_eq!(body["code"], json!(ErrorCode::Unauthorized));
        assert_eq!(body["message"], json!("Invalid credentials"));
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account details read from the credentials file.
///
/// Registration posts the whole file, so fields other than the login pair are
/// kept verbatim in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(c: &'a Credentials) -> Self {
        Self {
            username: &c.username,
            password: &c.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantMembership {
    pub id: i64,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: SessionUser,
    #[serde(default)]
    pub tenants: Vec<TenantMembership>,
    pub current_tenant: Option<i64>,
}

/// Error payload returned by failing API routes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

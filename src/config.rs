use anyhow::Context;

/// Longest accepted verification-token lifetime: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub starttls: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
    /// Front-end origin the verification link points at.
    pub base_url: String,
    pub cors_origin: Option<String>,
    pub admin_token: Option<String>,
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("{key} must be set"))
}

fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parses the token lifetime, defaulting to one hour and clamped to
/// `1..=MAX_TTL_MINUTES`.
fn ttl_minutes(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(60)
        .clamp(1, MAX_TTL_MINUTES)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "userhub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "userhub-verify".into()),
            ttl_minutes: ttl_minutes(std::env::var("VERIFY_TOKEN_TTL_MINUTES").ok()),
        };

        let username = required("EMAIL_USER")?;
        let mail = MailConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.ethereal.email".into()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            password: required("EMAIL_PASSWORD")?,
            from: optional("EMAIL_FROM").unwrap_or_else(|| username.clone()),
            starttls: std::env::var("SMTP_STARTTLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            username,
        };

        let base_url = std::env::var("BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            jwt,
            mail,
            base_url,
            cors_origin: optional("CORS_ORIGIN"),
            admin_token: optional("ADMIN_TOKEN"),
        })
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/auth/verify?token={}", self.base_url, token)
    }
}

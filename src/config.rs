use std::env;

/// SMTP relay settings. Absent entirely when mail is unconfigured, in which
/// case the process runs with the no-op notifier.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    pub host: String,
    pub user: String,
    pub password: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub upload_dir: String,
    pub admin_email: String,
    pub from_email: String,
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://coursehub.db?mode=rwc".to_string());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@coursehub.local".to_string());

        let from_email =
            env::var("FROM_EMAIL").unwrap_or_else(|_| "noreply@coursehub.local".to_string());

        let smtp = env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
            host,
            user: env::var("SMTP_USER").unwrap_or_default(),
            password: env::var("SMTP_PASS").unwrap_or_default(),
        });

        Self {
            port,
            database_url,
            upload_dir,
            admin_email,
            from_email,
            smtp,
        }
    }
}

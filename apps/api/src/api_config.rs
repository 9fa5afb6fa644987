use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use dancerealmx_core::{AppError, AppResult};
use dancerealmx_domain::Role;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub access_policy_path: Option<PathBuf>,
    pub default_registration_role: Role,
    pub subscription_sweep_interval: Duration,
    pub dev_seed: bool,
}

impl ApiConfig {
    pub fn load() -> AppResult<Self> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let access_policy_path = env::var("ACCESS_POLICY_PATH")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let default_registration_role = match env::var("DEFAULT_REGISTRATION_ROLE") {
            Ok(value) => parse_registration_role(value.as_str())?,
            Err(_) => Role::Student,
        };

        let sweep_interval_seconds = parse_env_u64("SUBSCRIPTION_SWEEP_INTERVAL_SECONDS", 300)?;
        if sweep_interval_seconds == 0 {
            return Err(AppError::Validation(
                "SUBSCRIPTION_SWEEP_INTERVAL_SECONDS must be greater than zero".to_owned(),
            ));
        }

        let dev_seed = env::var("DEV_SEED")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            access_policy_path,
            default_registration_role,
            subscription_sweep_interval: Duration::from_secs(sweep_interval_seconds),
            dev_seed,
        })
    }

    pub fn socket_address(&self) -> AppResult<SocketAddr> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_registration_role(value: &str) -> AppResult<Role> {
    match Role::from_transport(value.trim())? {
        role @ (Role::Student | Role::GuestUser) => Ok(role),
        other => Err(AppError::Validation(format!(
            "DEFAULT_REGISTRATION_ROLE must be STUDENT or GUEST_USER, got '{other}'"
        ))),
    }
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use dancerealmx_core::AppError;
    use dancerealmx_domain::Role;

    use super::parse_registration_role;

    #[test]
    fn registration_role_accepts_student_and_guest() {
        assert!(matches!(parse_registration_role("STUDENT"), Ok(Role::Student)));
        assert!(matches!(
            parse_registration_role(" GUEST_USER "),
            Ok(Role::GuestUser)
        ));
    }

    #[test]
    fn registration_role_rejects_privileged_roles() {
        assert!(matches!(
            parse_registration_role("ADMIN"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_registration_role("NOT_A_ROLE"),
            Err(AppError::Validation(_))
        ));
    }
}

use serde::Deserialize;

use gymdash_core::config::Config;

/// Roles service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct RolesConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HS256 key shared with the identity bridge that signs session tokens.
    pub session_secret: String,
    /// TCP port for the HTTP server (default 3120). Env var: `ROLES_PORT`.
    #[serde(default = "default_roles_port")]
    pub roles_port: u16,
}

fn default_roles_port() -> u16 {
    3120
}

impl Config for RolesConfig {}

impl std::fmt::Debug for RolesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RolesConfig")
            .field("database_url", &"[redacted]")
            .field("session_secret", &"[redacted]")
            .field("roles_port", &self.roles_port)
            .finish()
    }
}

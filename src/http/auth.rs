use base64::Engine as _;

/// Basic-auth credential pair. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    #[must_use]
    pub const fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub(crate) fn basic_auth_header(credentials: &Credentials) -> String {
    let token = format!("{}:{}", credentials.username(), credentials.password());
    let encoded = base64::engine::general_purpose::STANDARD.encode(token.as_bytes());
    format!("Basic {}", encoded)
}

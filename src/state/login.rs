// Login form state.
// Collects credentials and decides locally whether a login attempt succeeds.

/// Field of the login form with input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Login form. Failure handling lives here; the session only sees success.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focused: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_focus(&mut self) {
        self.focused = match self.focused {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn input_char(&mut self, c: char) {
        match self.focused {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.focused {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Masked password for display.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Attempt a login. On success the credentials are cleared.
    pub fn submit(&mut self) -> bool {
        if self.username.trim().is_empty() {
            self.error = Some("Bitte Benutzernamen eingeben".to_string());
            self.focused = LoginField::Username;
            return false;
        }
        if self.password.is_empty() {
            self.error = Some("Bitte Passwort eingeben".to_string());
            self.focused = LoginField::Password;
            return false;
        }

        *self = Self::default();
        true
    }
}

use serde::Serialize;

pub const SUCCESS_CLASS: &str = "form-success";
pub const SUCCESS_MESSAGE: &str = "Your message has been sent successfully!";

/// What the visitor typed. Nothing is validated or sent anywhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// Builds a submission from a field lookup; absent fields read as empty.
    pub fn from_fields(mut field: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            name: field("name").unwrap_or_default(),
            email: field("email").unwrap_or_default(),
            message: field("message").unwrap_or_default(),
        }
    }

    pub fn log_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

//! Input validation functions
//!
//! Server-side checks for account, onboarding, task and catalog input.

use crate::errors::ModelError;
use chrono::NaiveTime;

/// Longest accepted task title
pub const MAX_TASK_TITLE_LEN: usize = 200;

/// Longest accepted display name
pub const MAX_DISPLAY_NAME_LEN: usize = 80;

/// Longest accepted message text
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    match regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
        Ok(re) if re.is_match(email) => Ok(()),
        _ => Err("Invalid email format".to_string()),
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate the name entered during onboarding
pub fn validate_display_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(format!("Name must be at most {} characters", MAX_DISPLAY_NAME_LEN));
    }
    Ok(())
}

/// Validate a morning task title
pub fn validate_task_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Task title cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_TASK_TITLE_LEN {
        return Err(format!("Task title must be at most {} characters", MAX_TASK_TITLE_LEN));
    }
    Ok(())
}

/// Parse a wake time in 24-hour `HH:MM` form
pub fn parse_wake_time(value: &str) -> Result<NaiveTime, ModelError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ModelError::InvalidWakeTime(value.to_string()))
}

/// Validate catalog message text
pub fn validate_message_text(text: &str) -> Result<(), String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Message text cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_MESSAGE_LEN {
        return Err(format!("Message text must be at most {} characters", MAX_MESSAGE_LEN));
    }
    Ok(())
}

/// Validate message tags: non-empty, no whitespace
pub fn validate_tags(tags: &[String]) -> Result<(), String> {
    for tag in tags {
        if tag.is_empty() {
            return Err("Tags cannot be empty".to_string());
        }
        if tag.chars().any(char::is_whitespace) {
            return Err(format!("Tag '{}' must not contain whitespace", tag));
        }
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "email" => "Email",
        "password" => "Password",
        "name" | "display_name" => "Name",
        "wake_time" => "Wake Time",
        "title" => "Task",
        "text" => "Message",
        "tags" => "Tags",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

//! Registration lead validation for the hero form.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Country prefix added to validated mobile numbers.
pub const MOBILE_PREFIX: &str = "+91";

fn email_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("invalid email regex")
  })
}

fn mobile_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"^[6-9]\d{9}$").expect("invalid mobile regex"))
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadFieldError {
  /// Name shorter than two characters.
  #[error("Full name must be at least 2 characters long.")]
  NameTooShort,
  /// Name longer than 100 characters.
  #[error("Full name must be at most 100 characters long.")]
  NameTooLong,
  /// Email not shaped like `local@domain.tld`.
  #[error("Please provide a valid email address.")]
  InvalidEmail,
  /// Email longer than 255 characters.
  #[error("Email address must be at most 255 characters long.")]
  EmailTooLong,
  /// Mobile number not exactly ten characters.
  #[error("Mobile number must be exactly 10 digits.")]
  MobileLength,
  /// Mobile number outside the `6`-`9` leading digit range.
  #[error("Please enter a valid 10-digit Indian mobile number.")]
  InvalidMobile,
}

/// Every field error found in a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lead form rejected: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "))]
pub struct LeadErrors(pub Vec<LeadFieldError>);

/// Raw registration form as typed by the visitor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
  /// Visitor's full name.
  pub full_name: String,
  /// Contact email.
  pub email: String,
  /// Ten-digit mobile number without country code.
  pub mobile_phone: String,
}

/// Validated lead ready to hand to a registration backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
  /// Trimmed full name.
  pub full_name: String,
  /// Trimmed email.
  pub email: String,
  /// Mobile number including [`MOBILE_PREFIX`].
  pub mobile_phone: String,
}

impl LeadForm {
  /// Build a form from the three raw inputs.
  pub fn new(
    full_name: impl Into<String>,
    email: impl Into<String>,
    mobile_phone: impl Into<String>,
  ) -> Self {
    Self {
      full_name: full_name.into(),
      email: email.into(),
      mobile_phone: mobile_phone.into(),
    }
  }

  /// Check every field and build the submission, or report all failures at once.
  pub fn validate(&self) -> Result<LeadSubmission, LeadErrors> {
    let full_name = self.full_name.trim();
    let email = self.email.trim();
    let mobile = self.mobile_phone.trim();
    let mut errors = Vec::new();

    match full_name.chars().count() {
      0..=1 => errors.push(LeadFieldError::NameTooShort),
      101.. => errors.push(LeadFieldError::NameTooLong),
      _ => {}
    }

    if !email_pattern().is_match(email) {
      errors.push(LeadFieldError::InvalidEmail);
    }
    if email.chars().count() > 255 {
      errors.push(LeadFieldError::EmailTooLong);
    }

    if mobile.chars().count() != 10 {
      errors.push(LeadFieldError::MobileLength);
    }
    if !mobile_pattern().is_match(mobile) {
      errors.push(LeadFieldError::InvalidMobile);
    }

    if !errors.is_empty() {
      return Err(LeadErrors(errors));
    }

    Ok(LeadSubmission {
      full_name: full_name.to_string(),
      email: email.to_string(),
      mobile_phone: format!("{MOBILE_PREFIX}{mobile}"),
    })
  }
}

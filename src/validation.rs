//! Submission validation.
//!
//! Raw payloads are checked in a fixed order: required fields first (all
//! missing ones reported together), then email format, then enumerations
//! and room dimensions. The first failing stage wins.

use crate::errors::AppError;
use crate::models::{
    ContactPayload, ContactSubmission, QuotePayload, QuoteSubmission, RoomDimensions,
    RoomDimensionsPayload,
};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validate email address shape (`local@domain.tld`).
///
/// No whitespace, exactly one `@` separating two
/// non-empty parts, and a dot somewhere after the `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// A required string is present when it has at least one non-whitespace char.
fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Collect the names of the required fields whose check failed, in order.
fn missing_fields(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| *name)
        .collect()
}

/// Parse a form slug into its enumeration.
fn parse_enum<T: DeserializeOwned>(field: &'static str, value: &str) -> Result<T, AppError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| AppError::InvalidField(field))
}

/// Parse an optional enumeration. Blank strings count as absent; padded
/// slugs are rejected like any other unknown value.
fn parse_optional_enum<T: DeserializeOwned>(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, AppError> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => parse_enum(field, v).map(Some),
        None => Ok(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_email(email: &str) -> Result<(), AppError> {
    if !is_valid_email(email) {
        tracing::warn!("Invalid email format: {}", email);
        return Err(AppError::bad_request("Invalid email format"));
    }
    Ok(())
}

/// Validate a contact form body.
pub fn validate_contact(payload: ContactPayload) -> Result<ContactSubmission, AppError> {
    let missing = missing_fields(&[
        ("name", present(&payload.name)),
        ("email", present(&payload.email)),
        ("phone", present(&payload.phone)),
        ("subject", present(&payload.subject)),
        ("message", present(&payload.message)),
    ]);
    if !missing.is_empty() {
        return Err(AppError::MissingFields(missing));
    }

    let ContactPayload {
        name: Some(name),
        email: Some(email),
        phone: Some(phone),
        subject: Some(subject),
        message: Some(message),
        preferred_contact,
        project_type,
    } = payload
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    check_email(&email)?;

    Ok(ContactSubmission {
        subject: parse_enum("subject", &subject)?,
        preferred_contact: parse_optional_enum("preferredContact", preferred_contact.as_deref())?,
        project_type: parse_optional_enum("projectType", project_type.as_deref())?,
        name,
        email,
        phone,
        message,
    })
}

/// Validate room dimensions when the object was supplied.
///
/// A missing or zero side makes the object incomplete. Negative or
/// non-finite sides, or sides whose area or volume overflows, are rejected
/// separately.
pub fn validate_dimensions(dims: &RoomDimensionsPayload) -> Result<RoomDimensions, AppError> {
    let sides = [dims.length, dims.width, dims.height];
    if sides.iter().any(|s| s.map_or(true, |v| v == 0.0)) {
        return Err(AppError::bad_request("Incomplete room dimensions"));
    }

    let [Some(length), Some(width), Some(height)] = sides else {
        return Err(AppError::bad_request("Incomplete room dimensions"));
    };

    if [length, width, height].iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(AppError::bad_request("Invalid room dimensions"));
    }

    let area = length * width;
    if !area.is_finite() || !(area * height).is_finite() {
        tracing::warn!("Room dimensions overflow: {} x {} x {}", length, width, height);
        return Err(AppError::bad_request("Invalid room dimensions"));
    }

    Ok(RoomDimensions {
        length,
        width,
        height,
    })
}

/// Validate a quote form body.
pub fn validate_quote(payload: QuotePayload) -> Result<QuoteSubmission, AppError> {
    let missing = missing_fields(&[
        ("name", present(&payload.name)),
        ("email", present(&payload.email)),
        ("phone", present(&payload.phone)),
        ("address", present(&payload.address)),
        ("projectType", present(&payload.project_type)),
        ("cabinetStyle", present(&payload.cabinet_style)),
        ("finish", present(&payload.finish)),
        ("budget", present(&payload.budget)),
        ("timeline", present(&payload.timeline)),
    ]);
    if !missing.is_empty() {
        tracing::debug!("Quote request missing fields: {:?}", missing);
        return Err(AppError::MissingFields(missing));
    }

    let QuotePayload {
        name: Some(name),
        email: Some(email),
        phone: Some(phone),
        address: Some(address),
        project_type: Some(project_type),
        room_dimensions,
        cabinet_style: Some(cabinet_style),
        finish: Some(finish),
        features,
        budget: Some(budget),
        timeline: Some(timeline),
        existing_cabinets,
        renovation_type,
        additional_notes,
        preferred_contact,
        visit_required,
    } = payload
    else {
        return Err(AppError::bad_request("Missing required fields"));
    };

    check_email(&email)?;

    let room_dimensions = room_dimensions
        .as_ref()
        .map(validate_dimensions)
        .transpose()?;

    Ok(QuoteSubmission {
        project_type: parse_enum("projectType", &project_type)?,
        cabinet_style: parse_enum("cabinetStyle", &cabinet_style)?,
        finish: parse_enum("finish", &finish)?,
        budget: parse_enum("budget", &budget)?,
        timeline: parse_enum("timeline", &timeline)?,
        renovation_type: parse_optional_enum("renovationType", renovation_type.as_deref())?,
        preferred_contact: parse_optional_enum("preferredContact", preferred_contact.as_deref())?,
        features: features
            .unwrap_or_default()
            .into_iter()
            .filter(|f| !f.trim().is_empty())
            .collect(),
        existing_cabinets: existing_cabinets.unwrap_or(false),
        visit_required: visit_required.unwrap_or(false),
        additional_notes: non_empty(additional_notes),
        room_dimensions,
        name,
        email,
        phone,
        address,
    })
}

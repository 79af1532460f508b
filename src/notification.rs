//! HTML notification emails sent to the business inbox.
//!
//! Submitted values are embedded as typed. Optional fields get a block only
//! when they were provided.

use crate::estimate::CostEstimate;
use crate::formatting::{format_htg, normalize_haiti_phone, title_case_slug, whatsapp_link};
use crate::i18n::{self, Language};
use crate::models::{ContactSubmission, PreferredContact, QuoteSubmission};
use chrono::{DateTime, Locale, Utc};
use chrono_tz::America::PortauPrince;
use serde::Serialize;

const BRAND: &str = "PVC Cabinets Haiti";
const FOOTER: &str = r#"
    <div class="footer">
      <p>PVC Cabinets Haiti by Zewo | Professional PVC Cabinet Installation</p>
      <p>+509 3212 3456 | info@pvchaiti.com</p>
    </div>"#;

/// Sender and recipient of every notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub to: String,
    pub from: String,
}

/// A rendered email, ready for an `EmailSender`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
}

/// Render a timestamp the way the office reads it: French full date and
/// medium time in Port-au-Prince local time.
pub fn format_submission_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&PortauPrince)
        .format_localized("%A %-d %B %Y à %H:%M:%S", Locale::fr_FR)
        .to_string()
}

fn field(label: &str, value: &str) -> String {
    format!(
        r#"
        <div class="field">
          <div class="label">{}:</div>
          <div class="value">{}</div>
        </div>"#,
        label, value
    )
}

fn multiline_field(label: &str, value: &str) -> String {
    format!(
        r#"
        <div class="field">
          <div class="label">{}:</div>
          <div class="value" style="white-space: pre-line;">{}</div>
        </div>"#,
        label, value
    )
}

/// Phone number, linked with `tel:` when it can be normalized.
/// Escape a value for a double-quoted attribute.
fn attr_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

fn phone_value(phone: &str) -> String {
    match normalize_haiti_phone(phone) {
        Some(e164) => format!(r#"<a href="tel:{}">{}</a>"#, e164, phone),
        None => phone.to_string(),
    }
}

fn document(title: &str, extra_css: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .header {{ background: #0E7C66; color: white; padding: 20px; text-align: center; }}
    .field {{ margin-bottom: 15px; }}
    .label {{ font-weight: bold; color: #0E7C66; }}
    .value {{ margin-top: 5px; }}
    .footer {{ background: #333; color: white; padding: 15px; text-align: center; font-size: 12px; }}
{extra_css}
  </style>
</head>
<body>
  <div class="container">
{body}
{footer}
  </div>
</body>
</html>
"#,
        footer = FOOTER
    )
}

/// Build the notification for a contact form submission.
pub fn render_contact(
    submission: &ContactSubmission,
    mailbox: &Mailbox,
    submitted_at: DateTime<Utc>,
) -> Notification {
    let mut body = String::new();

    body.push_str(&format!(
        r#"    <div class="header">
      <h1>{}</h1>
      <p>New Contact Form Submission</p>
    </div>
    <div class="content">"#,
        BRAND
    ));

    body.push_str(&field("Name", &submission.name));
    body.push_str(&field("Email", &submission.email));
    body.push_str(&field("Phone", &phone_value(&submission.phone)));
    body.push_str(&field("Subject", submission.subject.as_str()));

    if let Some(preferred) = submission.preferred_contact {
        body.push_str(&field("Preferred Contact Method", preferred.as_str()));
    }
    if let Some(project_type) = submission.project_type {
        body.push_str(&field("Project Type", project_type.as_str()));
    }

    body.push_str(&multiline_field("Message", &submission.message));
    body.push_str(&field("Submitted", &format_submission_time(submitted_at)));
    body.push_str("\n    </div>");

    let css = r#"    .container { max-width: 600px; margin: 0 auto; padding: 20px; }
    .content { background: #f9f9f9; padding: 20px; }"#;

    Notification {
        to: mailbox.to.clone(),
        from: mailbox.from.clone(),
        subject: format!(
            "{} - {}: {}",
            BRAND,
            submission.subject.as_str(),
            submission.name
        ),
        html: document("New Contact Form Submission", css, &body),
    }
}

fn section(title: &str, inner: &str) -> String {
    format!(
        r#"
    <div class="section">
      <h3>{}</h3>{}
    </div>"#,
        title, inner
    )
}

/// Build the notification for a quote request.
///
/// `estimate` must be the figures computed for this very submission.
pub fn render_quote(
    submission: &QuoteSubmission,
    estimate: &CostEstimate,
    mailbox: &Mailbox,
    submitted_at: DateTime<Utc>,
) -> Notification {
    let project_type = submission.project_type.as_str();
    let mut body = String::new();

    body.push_str(&format!(
        r#"    <div class="header">
      <h1>{}</h1>
      <p>New Quote Request - {}</p>
    </div>"#,
        BRAND,
        project_type.to_uppercase()
    ));

    // Customer information
    let mut customer = String::from(r#"
      <div class="grid">"#);
    customer.push_str(&field("Name", &submission.name));
    customer.push_str(&field("Email", &submission.email));
    customer.push_str(&field("Phone", &phone_value(&submission.phone)));
    if let Some(preferred) = submission.preferred_contact {
        customer.push_str(&field("Preferred Contact", preferred.as_str()));
    }
    customer.push_str("\n      </div>");
    customer.push_str(&field("Address", &submission.address));
    body.push_str(&section("Customer Information", &customer));

    // Project details
    let mut project = String::from(r#"
      <div class="grid">"#);
    project.push_str(&field("Project Type", project_type));
    project.push_str(&field("Cabinet Style", submission.cabinet_style.as_str()));
    project.push_str(&field("Finish", submission.finish.as_str()));
    if let Some(renovation) = submission.renovation_type {
        project.push_str(&field("Renovation Type", renovation.as_str()));
    }
    project.push_str("\n      </div>");

    if let Some(dims) = &submission.room_dimensions {
        project.push_str(&field(
            "Room Dimensions",
            &format!(
                "{} ft × {} ft × {} ft<br><strong>Floor Area:</strong> {:.1} sq ft<br><strong>Volume:</strong> {:.1} cubic ft",
                dims.length, dims.width, dims.height, estimate.area, estimate.volume
            ),
        ));
    }

    if !submission.features.is_empty() {
        let items: String = submission
            .features
            .iter()
            .map(|f| {
                format!(
                    r#"<li data-feature="{}">{}</li>"#,
                    attr_escape(f),
                    title_case_slug(f)
                )
            })
            .collect();
        project.push_str(&field(
            "Additional Features",
            &format!(r#"<ul style="margin: 5px 0; padding-left: 20px;">{}</ul>"#, items),
        ));
    }
    body.push_str(&section("Project Details", &project));

    // Budget and timeline
    let mut budget = String::from(r#"
      <div class="grid">"#);
    budget.push_str(&field(
        "Budget Range",
        &format!("{} HTG", submission.budget.as_str()),
    ));
    budget.push_str(&field("Timeline", submission.timeline.as_str()));
    budget.push_str("\n      </div>");
    body.push_str(&section("Budget & Timeline", &budget));

    if let Some(per_sqft) = estimate.price_per_sqft() {
        body.push_str(&format!(
            r#"
    <div class="estimate">
      <h3 style="margin-top: 0;">Preliminary Estimate</h3>
      <p><strong>Estimated Cost:</strong> {} ({:.0} HTG/sq ft)</p>
      <p style="font-size: 12px; color: #666;">
        *This is a preliminary estimate based on basic calculations.
        Final quote will be provided after consultation and precise measurements.
      </p>
    </div>"#,
            format_htg(estimate.estimated_cost),
            per_sqft
        ));
    }

    // Additional information
    let mut additional = field(
        "Existing Cabinets Removal",
        if submission.existing_cabinets {
            "Yes - Customer has existing cabinets that need removal"
        } else {
            "No - New installation"
        },
    );
    additional.push_str(&field(
        "In-Home Consultation",
        if submission.visit_required {
            "Yes - Customer requests in-home consultation"
        } else {
            "No - Remote consultation preferred"
        },
    ));
    if let Some(notes) = &submission.additional_notes {
        additional.push_str(&multiline_field("Additional Notes", notes));
    }
    body.push_str(&section("Additional Information", &additional));

    if submission.timeline.is_urgent() {
        body.push_str(
            r#"
    <div class="section urgent">
      <h3>⚡ URGENT REQUEST</h3>
      <p>Customer needs work completed as soon as possible. Priority follow-up required!</p>
    </div>"#,
        );
    }

    body.push_str(&section(
        "Next Steps",
        &next_steps(submission, format_submission_time(submitted_at)),
    ));

    let css = r#"    .container { max-width: 700px; margin: 0 auto; padding: 20px; }
    .section { background: #f9f9f9; margin: 20px 0; padding: 20px; border-left: 4px solid #0E7C66; }
    .section h3 { margin-top: 0; color: #0E7C66; }
    .estimate { background: #e8f5f3; padding: 15px; border-radius: 5px; margin: 15px 0; }
    .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 15px; }
    .urgent { background: #fff3cd; border-left-color: #f4a340; }"#;

    Notification {
        to: mailbox.to.clone(),
        from: mailbox.from.clone(),
        subject: format!(
            "{} - Quote Request: {} ({})",
            BRAND, submission.name, project_type
        ),
        html: document("New Quote Request", css, &body),
    }
}

fn next_steps(submission: &QuoteSubmission, submitted: String) -> String {
    let contact_step = match submission.preferred_contact {
        Some(PreferredContact::Whatsapp) => {
            let greeting = i18n::t(
                Language::default(),
                "whatsapp.greeting",
                &[("name", &submission.name)],
            );
            match whatsapp_link(&submission.phone, &greeting) {
                Ok(link) => format!(
                    r#"Contact customer within 24 hours via <a href="{}">whatsapp</a>"#,
                    link
                ),
                Err(_) => "Contact customer within 24 hours via whatsapp".to_string(),
            }
        }
        Some(other) => format!("Contact customer within 24 hours via {}", other.as_str()),
        None => "Contact customer within 24 hours".to_string(),
    };

    let consultation = if submission.visit_required {
        "Schedule in-home consultation"
    } else {
        "Conduct remote consultation"
    };

    format!(
        r#"
      <ul>
        <li>{}</li>
        <li>{}</li>
        <li>Provide detailed quote with 3D renderings</li>
        <li>Discuss timeline and installation schedule</li>
      </ul>
      <p><strong>Submission Time:</strong> {}</p>"#,
        contact_step, consultation, submitted
    )
}

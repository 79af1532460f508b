use phonenumber::country::Id as CountryId;
use phonenumber::Mode;
use url::Url;

/// Haiti's international calling code.
const HAITI_CALLING_CODE: &str = "509";

/// Group digits by thousands with commas (`54000` -> `54,000`).
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Amount in Haitian gourdes, e.g. `65,340 HTG`.
pub fn format_htg(amount: i64) -> String {
    format!("{} HTG", format_amount(amount))
}

/// Turn a form slug into a label: `under-cabinet-lighting` -> `Under Cabinet Lighting`.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a Haitian phone number to E.164 (`+50932123456`).
///
/// Numbers without a country code are read as Haitian. Returns `None` when
/// the input cannot be parsed as a phone number at all.
pub fn normalize_haiti_phone(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    match phonenumber::parse(Some(CountryId::HT), raw) {
        Ok(number) => {
            let formatted = number.format().mode(Mode::E164).to_string();
            tracing::debug!("Normalized phone: {} -> {}", raw, formatted);
            Some(formatted)
        }
        Err(e) => {
            tracing::debug!("Could not parse phone '{}': {:?}", raw, e);
            None
        }
    }
}

/// Build a `wa.me` click-to-chat link with a prefilled message.
///
/// Non-digits are stripped and the Haitian calling code is prepended when
/// the number does not already carry it.
pub fn whatsapp_link(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let full = if digits.starts_with(HAITI_CALLING_CODE) {
        digits
    } else {
        format!("{}{}", HAITI_CALLING_CODE, digits)
    };

    Url::parse_with_params(&format!("https://wa.me/{}", full), &[("text", message)])
}

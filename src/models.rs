use crate::projection::{ProjectionSummary, YearlyCostProjection};
use serde::{Deserialize, Serialize};

// ============ Enumerations ============

/// Topic selected on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    General,
    Quote,
    Support,
    Partnership,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::General => "general",
            Subject::Quote => "quote",
            Subject::Support => "support",
            Subject::Partnership => "partnership",
        }
    }
}

/// Channel the customer wants to be contacted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferredContact {
    Email,
    Phone,
    Whatsapp,
}

impl PreferredContact {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredContact::Email => "email",
            PreferredContact::Phone => "phone",
            PreferredContact::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    Kitchen,
    Office,
    Closet,
    Vanity,
    Custom,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Kitchen => "kitchen",
            ProjectType::Office => "office",
            ProjectType::Closet => "closet",
            ProjectType::Vanity => "vanity",
            ProjectType::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CabinetStyle {
    Modern,
    Traditional,
    Transitional,
    Contemporary,
}

impl CabinetStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinetStyle::Modern => "modern",
            CabinetStyle::Traditional => "traditional",
            CabinetStyle::Transitional => "transitional",
            CabinetStyle::Contemporary => "contemporary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Finish {
    White,
    WoodGrain,
    Gray,
    Espresso,
    Custom,
}

impl Finish {
    pub fn as_str(&self) -> &'static str {
        match self {
            Finish::White => "white",
            Finish::WoodGrain => "wood-grain",
            Finish::Gray => "gray",
            Finish::Espresso => "espresso",
            Finish::Custom => "custom",
        }
    }
}

/// Budget bracket in HTG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Budget {
    #[serde(rename = "15000-30000")]
    From15kTo30k,
    #[serde(rename = "30000-50000")]
    From30kTo50k,
    #[serde(rename = "50000-75000")]
    From50kTo75k,
    #[serde(rename = "75000-100000")]
    From75kTo100k,
    #[serde(rename = "100000+")]
    Over100k,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::From15kTo30k => "15000-30000",
            Budget::From30kTo50k => "30000-50000",
            Budget::From50kTo75k => "50000-75000",
            Budget::From75kTo100k => "75000-100000",
            Budget::Over100k => "100000+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Timeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "2-3-months")]
    TwoToThreeMonths,
    #[serde(rename = "3-6-months")]
    ThreeToSixMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Timeline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Asap => "asap",
            Timeline::OneMonth => "1-month",
            Timeline::TwoToThreeMonths => "2-3-months",
            Timeline::ThreeToSixMonths => "3-6-months",
            Timeline::Flexible => "flexible",
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Timeline::Asap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenovationType {
    NewConstruction,
    FullRenovation,
    CabinetReplacement,
    PartialUpdate,
}

impl RenovationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenovationType::NewConstruction => "new-construction",
            RenovationType::FullRenovation => "full-renovation",
            RenovationType::CabinetReplacement => "cabinet-replacement",
            RenovationType::PartialUpdate => "partial-update",
        }
    }
}

// ============ Request Payloads ============

/// Raw contact form body as posted by the website.
///
/// Every field is optional at this stage so that missing values can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub preferred_contact: Option<String>,
    pub project_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomDimensionsPayload {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Raw quote form body as posted by the website.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub project_type: Option<String>,
    pub room_dimensions: Option<RoomDimensionsPayload>,
    pub cabinet_style: Option<String>,
    pub finish: Option<String>,
    pub features: Option<Vec<String>>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub existing_cabinets: Option<bool>,
    pub renovation_type: Option<String>,
    pub additional_notes: Option<String>,
    pub preferred_contact: Option<String>,
    pub visit_required: Option<bool>,
}

// ============ Validated Submissions ============

/// A contact request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: Subject,
    pub message: String,
    pub preferred_contact: Option<PreferredContact>,
    pub project_type: Option<ProjectType>,
}

/// Room measurements in feet. All three values are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A quote request that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub project_type: ProjectType,
    pub room_dimensions: Option<RoomDimensions>,
    pub cabinet_style: CabinetStyle,
    pub finish: Finish,
    pub features: Vec<String>,
    pub budget: Budget,
    pub timeline: Timeline,
    pub existing_cabinets: bool,
    pub renovation_type: Option<RenovationType>,
    pub additional_notes: Option<String>,
    pub preferred_contact: Option<PreferredContact>,
    pub visit_required: bool,
}

// ============ Responses ============

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub success: bool,
    pub message: String,
    pub estimated_cost: i64,
    pub estimated_area: f64,
}

/// Body of `GET /api/projection`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub years: Vec<YearlyCostProjection>,
    #[serde(flatten)]
    pub summary: ProjectionSummary,
}

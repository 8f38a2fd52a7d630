use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How hard the provider is asked to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastIntensity {
    Light,
    #[default]
    Medium,
    Savage,
}

impl RoastIntensity {
    pub const ALL: [RoastIntensity; 3] = [Self::Light, Self::Medium, Self::Savage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Savage => "savage",
        }
    }
}

impl fmt::Display for RoastIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown roast intensity '{0}' (expected light, medium or savage)")]
pub struct UnknownIntensity(pub String);

impl FromStr for RoastIntensity {
    type Err = UnknownIntensity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "medium" => Ok(Self::Medium),
            "savage" => Ok(Self::Savage),
            other => Err(UnknownIntensity(other.to_string())),
        }
    }
}

/// The frozen hand-off from the form to the session.
/// Field names match the service's JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub name: String,
    pub age: String,
    #[serde(default)]
    pub appearance: String,
    #[serde(default)]
    pub hobbies: String,
    #[serde(default)]
    pub personality: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub embarrassing_fact: String,
    #[serde(default)]
    pub roast_intensity: RoastIntensity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Age,
    Appearance,
    Hobbies,
    Personality,
    Occupation,
    EmbarrassingFact,
}

impl FormField {
    /// Prompt order used by the terminal form.
    pub const ORDER: [FormField; 7] = [
        Self::Name,
        Self::Age,
        Self::Occupation,
        Self::Appearance,
        Self::Hobbies,
        Self::Personality,
        Self::EmbarrassingFact,
    ];

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Name | Self::Age)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Age => "Age",
            Self::Appearance => "Appearance",
            Self::Hobbies => "Hobbies",
            Self::Personality => "Personality",
            Self::Occupation => "Occupation",
            Self::EmbarrassingFact => "Embarrassing fact",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "What should we call you while destroying you?",
            Self::Age => "How long have you been disappointing people?",
            Self::Appearance => "Describe your look (be honest, we'll find out anyway)",
            Self::Hobbies => "What do you waste your time on?",
            Self::Personality => "How would your friends describe you (when you're not around)?",
            Self::Occupation => "What do you pretend to do for a living?",
            Self::EmbarrassingFact => "Something you'd rather we didn't know",
        }
    }
}

/// Mutable form state. Edits are free-form; only `submit` enforces anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub age: String,
    pub appearance: String,
    pub hobbies: String,
    pub personality: String,
    pub occupation: String,
    pub embarrassing_fact: String,
    pub roast_intensity: Option<RoastIntensity>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Age => self.age = value,
            FormField::Appearance => self.appearance = value,
            FormField::Hobbies => self.hobbies = value,
            FormField::Personality => self.personality = value,
            FormField::Occupation => self.occupation = value,
            FormField::EmbarrassingFact => self.embarrassing_fact = value,
        }
    }

    pub fn with(mut self, field: FormField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_intensity(mut self, intensity: RoastIntensity) -> Self {
        self.roast_intensity = Some(intensity);
        self
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Appearance => &self.appearance,
            FormField::Hobbies => &self.hobbies,
            FormField::Personality => &self.personality,
            FormField::Occupation => &self.occupation,
            FormField::EmbarrassingFact => &self.embarrassing_fact,
        }
    }

    /// Whether the submit control is live. Age is only checked for presence.
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty() && !self.age.trim().is_empty()
    }

    /// Freezes the draft into a record, or `None` when the submit control is inert.
    /// Values are handed off exactly as typed.
    pub fn submit(&self) -> Option<SubmissionRecord> {
        if !self.is_submittable() {
            return None;
        }

        Some(SubmissionRecord {
            name: self.name.clone(),
            age: self.age.clone(),
            appearance: self.appearance.clone(),
            hobbies: self.hobbies.clone(),
            personality: self.personality.clone(),
            occupation: self.occupation.clone(),
            embarrassing_fact: self.embarrassing_fact.clone(),
            roast_intensity: self.roast_intensity.unwrap_or_default(),
        })
    }
}

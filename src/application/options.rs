//! Enumerated option sets shared by the wizard and the notification emails.
//!
//! Codes are what travels over the wire; labels are what people read. The
//! emails always go through [`OptionSet::display_label`], which falls back to
//! the raw value for codes it does not know.

use chrono::Weekday;

/// A closed set of selectable options with stable codes
pub trait OptionSet: Copy + 'static {
    fn all() -> &'static [Self];

    fn code(&self) -> &'static str;

    fn label(&self) -> &'static str;

    /// Case-insensitive lookup by code
    fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|option| option.code().eq_ignore_ascii_case(code))
    }

    /// Label for a code, or the code itself when unrecognized
    fn display_label(code: &str) -> String {
        Self::from_code(code)
            .map(|option| option.label().to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

/// Australian states and territories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AustralianState {
    Nsw,
    Vic,
    Qld,
    Wa,
    Sa,
    Tas,
    Act,
    Nt,
}

impl OptionSet for AustralianState {
    fn all() -> &'static [Self] {
        &[
            AustralianState::Nsw,
            AustralianState::Vic,
            AustralianState::Qld,
            AustralianState::Wa,
            AustralianState::Sa,
            AustralianState::Tas,
            AustralianState::Act,
            AustralianState::Nt,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            AustralianState::Nsw => "nsw",
            AustralianState::Vic => "vic",
            AustralianState::Qld => "qld",
            AustralianState::Wa => "wa",
            AustralianState::Sa => "sa",
            AustralianState::Tas => "tas",
            AustralianState::Act => "act",
            AustralianState::Nt => "nt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AustralianState::Nsw => "New South Wales",
            AustralianState::Vic => "Victoria",
            AustralianState::Qld => "Queensland",
            AustralianState::Wa => "Western Australia",
            AustralianState::Sa => "South Australia",
            AustralianState::Tas => "Tasmania",
            AustralianState::Act => "Australian Capital Territory",
            AustralianState::Nt => "Northern Territory",
        }
    }
}

/// Country of the applicant's highest qualification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Australia,
    Nepal,
    India,
    UnitedStates,
    UnitedKingdom,
    Canada,
    /// Free-text country in `otherCountry`
    Other,
}

impl OptionSet for Country {
    fn all() -> &'static [Self] {
        &[
            Country::Australia,
            Country::Nepal,
            Country::India,
            Country::UnitedStates,
            Country::UnitedKingdom,
            Country::Canada,
            Country::Other,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            Country::Australia => "au",
            Country::Nepal => "np",
            Country::India => "in",
            Country::UnitedStates => "us",
            Country::UnitedKingdom => "uk",
            Country::Canada => "ca",
            Country::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Country::Australia => "Australia",
            Country::Nepal => "Nepal",
            Country::India => "India",
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::Canada => "Canada",
            Country::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
}

impl OptionSet for EducationLevel {
    fn all() -> &'static [Self] {
        &[
            EducationLevel::HighSchool,
            EducationLevel::Associate,
            EducationLevel::Bachelor,
            EducationLevel::Master,
        ]
    }

    fn code(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "high-school",
            EducationLevel::Associate => "associate",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Associate => "Associate Degree (Diploma)",
            EducationLevel::Bachelor => "Bachelor Degree",
            EducationLevel::Master => "Master Degree",
        }
    }
}

/// Course offerings with their fixed durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Course {
    HelpdeskL1,
    SupportL2,
    CyberSecurity,
}

impl Course {
    /// Weekday on which intakes for this course start
    pub fn intake_weekday(&self) -> Weekday {
        match self {
            Course::CyberSecurity => Weekday::Thu,
            Course::HelpdeskL1 | Course::SupportL2 => Weekday::Sun,
        }
    }
}

impl OptionSet for Course {
    fn all() -> &'static [Self] {
        &[Course::HelpdeskL1, Course::SupportL2, Course::CyberSecurity]
    }

    fn code(&self) -> &'static str {
        match self {
            Course::HelpdeskL1 => "helpdesk-l1",
            Course::SupportL2 => "support-l2",
            Course::CyberSecurity => "cyber-security",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Course::HelpdeskL1 => "IT Helpdesk Support (L1) - 6 weeks",
            Course::SupportL2 => "IT Support and Networking (L2) - 10 weeks",
            Course::CyberSecurity => "Cyber Security - 10 weeks",
        }
    }
}

/// Answer to "Do you have experience in IT?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItExperience {
    Yes,
    No,
}

impl OptionSet for ItExperience {
    fn all() -> &'static [Self] {
        &[ItExperience::Yes, ItExperience::No]
    }

    fn code(&self) -> &'static str {
        match self {
            ItExperience::Yes => "yes",
            ItExperience::No => "no",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ItExperience::Yes => "Yes",
            ItExperience::No => "No",
        }
    }
}

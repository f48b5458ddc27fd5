use crate::round::{Classification, TagSet};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Risk indicators a player can mark on a scam scenario.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum RedFlag {
    Urgency,
    TooGood,
    SuspiciousLink,
    Emotional,
    Payment,
    UnknownSender,
    Grammar,
    FakeAuthority,
    PersonalInfo,
    Threats,
    Unsolicited,
    RequestsSecrecy,
}

impl RedFlag {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Urgency => "Urgency",
            Self::TooGood => "Too Good to Be True",
            Self::SuspiciousLink => "Suspicious Link",
            Self::Emotional => "Emotional Manipulation",
            Self::Payment => "Payment Request",
            Self::UnknownSender => "Unknown Sender",
            Self::Grammar => "Grammar Mistakes",
            Self::FakeAuthority => "Fake Authority",
            Self::PersonalInfo => "Personal Info Request",
            Self::Threats => "Threats",
            Self::Unsolicited => "Unsolicited Contact",
            Self::RequestsSecrecy => "Requests Secrecy",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Urgency => "Act now or else...",
            Self::TooGood => "Unrealistic rewards",
            Self::SuspiciousLink => "Misspelled or odd URL",
            Self::Emotional => "Fear, flattery, guilt",
            Self::Payment => "Gift cards / crypto",
            Self::UnknownSender => "Not in contacts",
            Self::Grammar => "Poor language",
            Self::FakeAuthority => "Pretending to be official",
            Self::PersonalInfo => "SSN, passwords, etc.",
            Self::Threats => "Legal action or consequences",
            Self::Unsolicited => "You didn't request this",
            Self::RequestsSecrecy => "Don't tell anyone",
        }
    }
}

/// Legitimacy indicators a player can mark on a safe scenario.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum SafetyIndicator {
    VerifiedSender,
    OfficialDomain,
    NoPressure,
    ContactInfo,
    ExpectedCommunication,
    ProfessionalTone,
    SecureMethods,
    TransparentTerms,
    VerifiableInfo,
    NoSensitiveRequest,
    ProperBranding,
    ReasonableRequest,
}

impl SafetyIndicator {
    pub fn label(&self) -> &'static str {
        match self {
            Self::VerifiedSender => "Verified Sender",
            Self::OfficialDomain => "Official Domain",
            Self::NoPressure => "No Pressure",
            Self::ContactInfo => "Valid Contact Info",
            Self::ExpectedCommunication => "Expected Communication",
            Self::ProfessionalTone => "Professional Tone",
            Self::SecureMethods => "Secure Payment Methods",
            Self::TransparentTerms => "Transparent Terms",
            Self::VerifiableInfo => "Verifiable Information",
            Self::NoSensitiveRequest => "No Sensitive Requests",
            Self::ProperBranding => "Proper Branding",
            Self::ReasonableRequest => "Reasonable Request",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::VerifiedSender => "Known legitimate source",
            Self::OfficialDomain => "Correct company URL",
            Self::NoPressure => "Reasonable timeframe",
            Self::ContactInfo => "Real phone/email provided",
            Self::ExpectedCommunication => "You initiated this",
            Self::ProfessionalTone => "Clear, proper language",
            Self::SecureMethods => "Standard payment options",
            Self::TransparentTerms => "Clear policies stated",
            Self::VerifiableInfo => "Details can be confirmed",
            Self::NoSensitiveRequest => "Doesn't ask for passwords/SSN",
            Self::ProperBranding => "Correct logos and formatting",
            Self::ReasonableRequest => "Makes logical sense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Vocabulary {
    Risk,
    Safety,
}

impl Vocabulary {
    /// Which vocabulary a tag id belongs to. `None` for ids in neither.
    pub fn of(tag: &str) -> Option<Vocabulary> {
        if RedFlag::from_str(tag).is_ok() {
            Some(Vocabulary::Risk)
        } else if SafetyIndicator::from_str(tag).is_ok() {
            Some(Vocabulary::Safety)
        } else {
            None
        }
    }

    /// The vocabulary a scenario with this ground truth draws its tags from.
    pub fn for_truth(is_scam: bool) -> Vocabulary {
        if is_scam {
            Vocabulary::Risk
        } else {
            Vocabulary::Safety
        }
    }

    pub fn for_classification(classification: Classification) -> Vocabulary {
        match classification {
            Classification::Unsafe => Vocabulary::Risk,
            Classification::Safe => Vocabulary::Safety,
        }
    }

    pub fn ids(self) -> Vec<&'static str> {
        match self {
            Vocabulary::Risk => RedFlag::iter().map(<&'static str>::from).collect(),
            Vocabulary::Safety => SafetyIndicator::iter().map(<&'static str>::from).collect(),
        }
    }

    /// (id, label, description) rows for rendering a tag board.
    pub fn catalogue(self) -> Vec<(&'static str, &'static str, &'static str)> {
        match self {
            Vocabulary::Risk => RedFlag::iter()
                .map(|f| (<&'static str>::from(f), f.label(), f.description()))
                .collect(),
            Vocabulary::Safety => SafetyIndicator::iter()
                .map(|s| (<&'static str>::from(s), s.label(), s.description()))
                .collect(),
        }
    }

    pub fn contains(self, tag: &str) -> bool {
        Vocabulary::of(tag) == Some(self)
    }
}

/// Builds a [`TagSet`] from string slices, trimming blanks.
pub fn tag_set<I, S>(tags: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses a comma separated list such as `"urgency, payment"`.
pub fn parse_tag_list(s: &str) -> TagSet {
    tag_set(s.split(','))
}

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Classification of an organisation object, taken from its `org-type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrgType {
    /// Internet Assigned Numbers Authority
    Iana,
    /// Regional Internet Registry
    Rir,
    /// National Internet Registry
    Nir,
    /// Local Internet Registry
    Lir,
    Other,
    Whitepages,
}

impl OrgType {
    pub const ALL: [OrgType; 6] = [
        OrgType::Iana,
        OrgType::Rir,
        OrgType::Nir,
        OrgType::Lir,
        OrgType::Other,
        OrgType::Whitepages,
    ];

    /// Looks up an `org-type` value, ignoring case and surrounding whitespace.
    pub fn from_rpsl(value: &str) -> Option<OrgType> {
        let value = value.trim();
        OrgType::ALL
            .into_iter()
            .find(|t| t.as_rpsl().eq_ignore_ascii_case(value))
    }

    /// The attribute value as it appears in the database.
    pub const fn as_rpsl(&self) -> &'static str {
        match self {
            OrgType::Iana => "IANA",
            OrgType::Rir => "RIR",
            OrgType::Nir => "NIR",
            OrgType::Lir => "LIR",
            OrgType::Other => "OTHER",
            OrgType::Whitepages => "WHITEPAGES",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            OrgType::Iana => "Internet Assigned Numbers Authority",
            OrgType::Rir => "Regional Internet Registry",
            OrgType::Nir => "National Internet Registry",
            OrgType::Lir => "Local Internet Registry",
            OrgType::Other => "Other",
            OrgType::Whitepages => "Whitepages",
        }
    }
}

impl Display for OrgType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_rpsl())
    }
}

/// An organisation object maintained by a [Maintainer](super::Maintainer).
///
/// `org_type` is `None` when the object carried no `org-type` attribute, or one
/// that is not a known [OrgType].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub name: String,
    pub org_type: Option<OrgType>,
}

impl Organisation {
    pub fn new(name: impl Into<String>) -> Organisation {
        Organisation {
            name: name.into(),
            org_type: None,
        }
    }
}

impl Display for Organisation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.org_type {
            Some(t) => write!(f, "{} ({})", self.name, t),
            None => write!(f, "{}", self.name),
        }
    }
}

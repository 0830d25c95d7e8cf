use serde::{Deserialize, Serialize};

/// Document classification derived from recognized text.
///
/// `Unknown` means neither layout announced itself; extraction then falls
/// back to trying every rule, so an unlabeled scan still yields whatever
/// fields its text happens to carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Passport,
    License,
    Unknown,
}

impl DocumentKind {
    /// The `ID Type` value this classification contributes, if any.
    pub fn id_type_label(self) -> Option<&'static str> {
        match self {
            DocumentKind::Passport => Some("PASSPORT"),
            DocumentKind::License => Some("LICENSE"),
            DocumentKind::Unknown => None,
        }
    }

    /// Whether passport-layout rules apply to a document of this kind.
    pub fn may_be_passport(self) -> bool {
        !matches!(self, DocumentKind::License)
    }

    /// Whether license-layout rules apply to a document of this kind.
    pub fn may_be_license(self) -> bool {
        !matches!(self, DocumentKind::Passport)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Passport => write!(f, "passport"),
            DocumentKind::License => write!(f, "license"),
            DocumentKind::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passport" => Ok(DocumentKind::Passport),
            "license" => Ok(DocumentKind::License),
            "unknown" => Ok(DocumentKind::Unknown),
            other => Err(format!("Unknown document kind: '{other}'")),
        }
    }
}

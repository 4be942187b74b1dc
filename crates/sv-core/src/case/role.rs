use serde::{Deserialize, Serialize};

/// Position of the filing party in the dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseRole {
    /// Claimant (demandeur): initiates the procedure.
    #[serde(rename = "DEM")]
    Claimant,
    /// Defendant (défendeur): answers a claim.
    #[serde(rename = "DEF")]
    Defendant,
}

impl CaseRole {
    pub fn code(self) -> &'static str {
        match self {
            Self::Claimant => "DEM",
            Self::Defendant => "DEF",
        }
    }
}

impl std::fmt::Display for CaseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

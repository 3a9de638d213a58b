// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Transfer Fit Method
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed set of transfer-function models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransferError;

/// Which model produces T(k).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFitMethod {
    /// Delegated to an attached Boltzmann-code engine.
    ComputedExternally,
    /// Eisenstein & Hu 1998 (astro-ph/9709112), with baryon wiggles.
    EisensteinHu,
    /// Eisenstein & Hu 1998 zero-wiggle approximation.
    EisensteinHuNoWiggle,
    /// Bardeen, Bond, Kaiser & Szalay 1986.
    Bbks,
    /// Spline through a tabulated (k, T) file.
    FromFile,
}

impl TransferFitMethod {
    pub const ALL: [TransferFitMethod; 5] = [
        TransferFitMethod::ComputedExternally,
        TransferFitMethod::EisensteinHu,
        TransferFitMethod::EisensteinHuNoWiggle,
        TransferFitMethod::Bbks,
        TransferFitMethod::FromFile,
    ];

    /// True when the method needs a table file.
    pub fn requires_file(self) -> bool {
        matches!(self, TransferFitMethod::FromFile)
    }

    /// True for the closed-form fitting formulas.
    pub fn is_analytic(self) -> bool {
        matches!(
            self,
            TransferFitMethod::EisensteinHu
                | TransferFitMethod::EisensteinHuNoWiggle
                | TransferFitMethod::Bbks
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransferFitMethod::ComputedExternally => "computed_externally",
            TransferFitMethod::EisensteinHu => "eisenstein_hu",
            TransferFitMethod::EisensteinHuNoWiggle => "eisenstein_hu_no_wiggle",
            TransferFitMethod::Bbks => "bbks",
            TransferFitMethod::FromFile => "from_file",
        }
    }
}

impl fmt::Display for TransferFitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferFitMethod {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "computed_externally" | "external" | "class" => Ok(TransferFitMethod::ComputedExternally),
            "eisenstein_hu" | "eh" => Ok(TransferFitMethod::EisensteinHu),
            "eisenstein_hu_no_wiggle" | "eh_no_wiggle" | "no_wiggle" => {
                Ok(TransferFitMethod::EisensteinHuNoWiggle)
            }
            "bbks" => Ok(TransferFitMethod::Bbks),
            "from_file" | "file" => Ok(TransferFitMethod::FromFile),
            _ => Err(TransferError::Config(format!(
                "unknown transfer fit method '{s}'"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{K_MAX_DEFAULT, K_MIN_DEFAULT};
use crate::error::{TransferError, TransferResult};
use crate::method::TransferFitMethod;
use crate::params::CosmoParams;

/// Top-level cosmology configuration.
/// Maps 1:1 to the JSON files under `configs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmologyConfig {
    pub name: String,
    pub params: CosmoParams,
    pub transfer: TransferConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
}

/// Transfer-function selection and amplitude.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    pub method: TransferFitMethod,
    /// Table path, required iff `method` is `from_file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// 1-based column holding k (h/Mpc).
    #[serde(default = "default_k_column")]
    pub k_column: usize,
    /// 1-based column holding T(k).
    #[serde(default = "default_t_column")]
    pub t_column: usize,
    #[serde(default)]
    pub interpolation: SplineKind,
    /// Target σ8. When absent the amplitude implied by `delta_h` (or the
    /// COBE fit) is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma8: Option<f64>,
    /// Explicit δ_H; overrides the COBE fit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_h: Option<f64>,
}

fn default_k_column() -> usize {
    1
}
fn default_t_column() -> usize {
    2
}

impl TransferConfig {
    pub fn new(method: TransferFitMethod) -> Self {
        TransferConfig {
            method,
            file: None,
            k_column: default_k_column(),
            t_column: default_t_column(),
            interpolation: SplineKind::default(),
            sigma8: None,
            delta_h: None,
        }
    }
}

/// Interpolation scheme for tabulated data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineKind {
    /// C2 cubic with zero second derivative at both ends. Can ring near
    /// sharp features.
    Natural,
    /// Fritsch-Carlson monotone cubic (PCHIP). No overshoot between knots.
    #[default]
    Monotone,
}

/// Quadrature settings for the mass-variance integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Lower wavenumber limit (h/Mpc).
    #[serde(default = "default_k_min")]
    pub k_min: f64,
    /// Upper wavenumber limit (h/Mpc).
    #[serde(default = "default_k_max")]
    pub k_max: f64,
    /// Relative tolerance per panel.
    #[serde(default = "default_rel_tol")]
    pub rel_tol: f64,
    /// Maximum bisection depth of the adaptive rule.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Equal-width panels in ln k, each refined independently.
    #[serde(default = "default_panels")]
    pub panels: usize,
}

fn default_k_min() -> f64 {
    K_MIN_DEFAULT
}
fn default_k_max() -> f64 {
    K_MAX_DEFAULT
}
fn default_rel_tol() -> f64 {
    1e-6
}
fn default_max_depth() -> usize {
    40
}
fn default_panels() -> usize {
    64
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig {
            k_min: default_k_min(),
            k_max: default_k_max(),
            rel_tol: default_rel_tol(),
            max_depth: default_max_depth(),
            panels: default_panels(),
        }
    }
}

impl IntegrationConfig {
    pub fn validate(&self) -> TransferResult<()> {
        if !(self.k_min.is_finite() && self.k_min > 0.0) {
            return Err(TransferError::Config(format!(
                "integration.k_min must be finite and > 0, got {}",
                self.k_min
            )));
        }
        if !(self.k_max.is_finite() && self.k_max > self.k_min) {
            return Err(TransferError::Config(format!(
                "integration.k_max must be finite and > k_min ({}), got {}",
                self.k_min, self.k_max
            )));
        }
        if !(self.rel_tol.is_finite() && self.rel_tol > 0.0) {
            return Err(TransferError::Config(format!(
                "integration.rel_tol must be > 0, got {}",
                self.rel_tol
            )));
        }
        if self.max_depth == 0 || self.panels == 0 {
            return Err(TransferError::Config(
                "integration.max_depth and integration.panels must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl CosmologyConfig {
    /// Load from JSON file.
    ///
    /// A relative `transfer.file` is resolved against the directory that
    /// holds the config.
    pub fn from_file(path: impl AsRef<Path>) -> TransferResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&contents)?;
        if let (Some(file), Some(dir)) = (config.transfer.file.as_ref(), path.parent()) {
            if file.is_relative() {
                config.transfer.file = Some(dir.join(file));
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TransferResult<()> {
        self.params.validate()?;
        self.integration.validate()?;

        let transfer = &self.transfer;
        if transfer.method.requires_file() != transfer.file.is_some() {
            return Err(TransferError::Config(format!(
                "transfer.file must be given if and only if method is from_file (method = {})",
                transfer.method
            )));
        }
        if transfer.k_column == 0 || transfer.t_column == 0 {
            return Err(TransferError::Config(
                "transfer column indices are 1-based".to_string(),
            ));
        }
        if transfer.k_column == transfer.t_column {
            return Err(TransferError::Config(format!(
                "transfer.k_column and transfer.t_column must differ (both {})",
                transfer.k_column
            )));
        }
        for (name, value) in [("sigma8", transfer.sigma8), ("delta_h", transfer.delta_h)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(TransferError::Config(format!(
                        "transfer.{name} must be finite and > 0, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/cosmo-types/, the fixtures live
    /// two levels up.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    fn config_path(relative: &str) -> PathBuf {
        project_root().join("configs").join(relative)
    }

    #[test]
    fn test_load_planck_config() {
        let cfg = CosmologyConfig::from_file(config_path("planck15_eh.json")).unwrap();
        assert_eq!(cfg.name, "Planck15-EH");
        assert_eq!(cfg.transfer.method, TransferFitMethod::EisensteinHu);
        assert!((cfg.params.omega0_m - 0.3089).abs() < 1e-12);
        assert_eq!(cfg.transfer.sigma8, Some(0.8159));
        assert_eq!(cfg.transfer.interpolation, SplineKind::Monotone);
        assert_eq!(cfg.integration, IntegrationConfig::default());
    }

    #[test]
    fn test_load_tabulated_config_resolves_relative_path() {
        let cfg = CosmologyConfig::from_file(config_path("tabulated.json")).unwrap();
        assert_eq!(cfg.transfer.method, TransferFitMethod::FromFile);
        let file = cfg.transfer.file.as_ref().unwrap();
        assert!(file.ends_with("data/eh_planck15_tk.dat"), "{}", file.display());
        assert!(file.starts_with(config_path("")));
        assert_eq!(cfg.transfer.k_column, 1);
        assert_eq!(cfg.transfer.t_column, 2);
    }

    #[test]
    fn test_file_only_with_from_file() {
        let mut cfg = CosmologyConfig {
            name: "t".to_string(),
            params: CosmoParams::default(),
            transfer: TransferConfig::new(TransferFitMethod::Bbks),
            integration: IntegrationConfig::default(),
        };
        assert!(cfg.validate().is_ok());

        cfg.transfer.file = Some(PathBuf::from("tk.dat"));
        assert!(matches!(cfg.validate(), Err(TransferError::Config(_))));

        cfg.transfer.method = TransferFitMethod::FromFile;
        assert!(cfg.validate().is_ok());

        cfg.transfer.file = None;
        assert!(matches!(cfg.validate(), Err(TransferError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_columns_and_amplitudes() {
        let mut cfg = CosmologyConfig {
            name: "t".to_string(),
            params: CosmoParams::default(),
            transfer: TransferConfig::new(TransferFitMethod::EisensteinHu),
            integration: IntegrationConfig::default(),
        };
        cfg.transfer.k_column = 0;
        assert!(cfg.validate().is_err());
        cfg.transfer.k_column = 2;
        assert!(cfg.validate().is_err());
        cfg.transfer.k_column = 1;
        cfg.transfer.sigma8 = Some(-0.8);
        assert!(cfg.validate().is_err());
        cfg.transfer.sigma8 = Some(0.8);
        cfg.integration.k_max = cfg.integration.k_min;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = CosmologyConfig::from_file(config_path("planck15_eh.json")).unwrap();
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: CosmologyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.name, cfg2.name);
        assert_eq!(cfg.params, cfg2.params);
        assert_eq!(cfg.transfer.method, cfg2.transfer.method);
        assert_eq!(cfg.transfer.sigma8, cfg2.transfer.sigma8);
    }
}

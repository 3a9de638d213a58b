// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Property-Based Tests (proptest) for cosmo-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for cosmo-types using proptest.
//!
//! Covers: method names, parameter validation, config validation.

use cosmo_types::config::{CosmologyConfig, IntegrationConfig, SplineKind, TransferConfig};
use cosmo_types::error::{check_wavenumber, TransferError};
use cosmo_types::method::TransferFitMethod;
use cosmo_types::params::{validate_params, CosmoParams, CosmologyParams};
use proptest::prelude::*;

fn any_method() -> impl Strategy<Value = TransferFitMethod> {
    prop::sample::select(TransferFitMethod::ALL.to_vec())
}

// ── Method Names ─────────────────────────────────────────────────────

proptest! {
    /// Canonical names parse back to the same method, also with dashes
    /// and upper case.
    #[test]
    fn method_name_parses_back(method in any_method()) {
        let name = method.as_str();
        prop_assert_eq!(name.parse::<TransferFitMethod>().unwrap(), method);
        let dashed = name.replace('_', "-").to_uppercase();
        prop_assert_eq!(dashed.parse::<TransferFitMethod>().unwrap(), method);
    }

    /// Only from_file needs a table, and it is not analytic.
    #[test]
    fn file_requirement_excludes_analytic(method in any_method()) {
        prop_assert!(!(method.requires_file() && method.is_analytic()));
    }
}

// ── Parameter Validation ─────────────────────────────────────────────

proptest! {
    /// Any physical parameter set passes and derives consistent densities.
    #[test]
    fn physical_params_validate(
        omega0_m in 0.05f64..1.5,
        f_baryon in 0.001f64..1.0,
        h in 0.3f64..1.2,
    ) {
        let params = CosmoParams::new(omega0_m, f_baryon * omega0_m, h);
        prop_assert!(validate_params(&params).is_ok());
        let sum = params.omega0_cdm() + params.omega0_b();
        prop_assert!((sum - omega0_m).abs() < 1e-12);
        prop_assert!((params.baryon_fraction() - f_baryon).abs() < 1e-12);
        prop_assert!((params.omega_m_hh() - omega0_m * h * h).abs() < 1e-12);
    }

    /// More baryons than matter is rejected.
    #[test]
    fn baryons_exceeding_matter_rejected(omega0_m in 0.05f64..1.0, excess in 1.001f64..3.0) {
        let params = CosmoParams::new(omega0_m, excess * omega0_m, 0.7);
        prop_assert!(matches!(validate_params(&params), Err(TransferError::Precondition(_))));
    }

    /// Non-positive wavenumbers are precondition failures.
    #[test]
    fn nonpositive_wavenumber_rejected(k in -1e3f64..=0.0) {
        prop_assert!(matches!(check_wavenumber(k), Err(TransferError::Precondition(_))));
    }
}

// ── Config Validation ────────────────────────────────────────────────

proptest! {
    /// Identical k and T columns are refused.
    #[test]
    fn same_column_rejected(col in 1usize..20) {
        let mut transfer = TransferConfig::new(TransferFitMethod::FromFile);
        transfer.file = Some("tk.dat".into());
        transfer.k_column = col;
        transfer.t_column = col;
        let config = CosmologyConfig {
            name: "same-column".to_string(),
            params: CosmoParams::default(),
            transfer,
            integration: IntegrationConfig::default(),
        };
        prop_assert!(matches!(config.validate(), Err(TransferError::Config(_))));
    }

    /// Any ordered positive wavenumber range with sane tolerances is valid.
    #[test]
    fn ordered_integration_range_valid(k_min in 1e-7f64..1e-2, span in 10.0f64..1e6) {
        let integration = IntegrationConfig {
            k_min,
            k_max: k_min * span,
            ..IntegrationConfig::default()
        };
        prop_assert!(integration.validate().is_ok());
        let reversed = IntegrationConfig { k_min: k_min * span, k_max: k_min, ..integration };
        prop_assert!(reversed.validate().is_err());
    }
}

#[test]
fn default_spline_is_monotone() {
    assert_eq!(SplineKind::default(), SplineKind::Monotone);
}

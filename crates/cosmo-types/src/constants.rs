// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Hubble distance c/H0 in Mpc/h.
pub const C_OVER_H0: f64 = 2997.92458;

/// CMB temperature today (K), Fixsen 2009.
pub const T_CMB_DEFAULT: f64 = 2.7255;

/// Reference temperature used by the Eisenstein & Hu fits: Θ_2.7 = T_cmb / 2.7.
pub const T_CMB_FIT_REFERENCE: f64 = 2.7;

/// Top-hat radius defining σ8 (Mpc/h).
pub const SIGMA8_RADIUS: f64 = 8.0;

/// Lower wavenumber limit of the variance integral (h/Mpc).
pub const K_MIN_DEFAULT: f64 = 1e-5;

/// Upper wavenumber limit of the variance integral (h/Mpc).
pub const K_MAX_DEFAULT: f64 = 1e3;

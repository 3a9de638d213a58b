// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Cosmo Math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Numerical primitives for the transfer core.

pub mod quad;
pub mod spline;
pub mod tridiag;

pub use cosmo_types::config::SplineKind;

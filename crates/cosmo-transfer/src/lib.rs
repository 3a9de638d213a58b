// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Cosmo Transfer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Linear matter transfer function T(k) and its σ8 normalization.
//!
//! Analytic fits (Eisenstein & Hu with and without baryon oscillations,
//! BBKS), tabulated transfer functions read from text files, an external
//! engine hook, and the [`TransferFunction`] facade tying them together.

pub mod engine;
pub mod fits;
pub mod normalize;
pub mod tabulated;
pub mod transfer;

pub use engine::{FnEngine, TransferEngine};
pub use normalize::Normalization;
pub use tabulated::TabulatedTransfer;
pub use transfer::{TransferFunction, TransferModel};

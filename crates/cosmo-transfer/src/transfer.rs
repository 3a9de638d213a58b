// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Transfer Function
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Unified T(k) facade over the analytic fits, tabulated data and an
//! external engine, plus the σ8 normalization of the linear spectrum.
//!
//! Replacing the model (`set_transfer_function`, `load_transfer_function`)
//! builds the new model completely before swapping it in: a failed reload
//! leaves the previous model and its interpolant untouched.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use cosmo_types::config::{CosmologyConfig, IntegrationConfig, SplineKind};
use cosmo_types::constants::SIGMA8_RADIUS;
use cosmo_types::error::{check_wavenumber, TransferError, TransferResult};
use cosmo_types::method::TransferFitMethod;
use cosmo_types::params::{validate_params, CosmoParams, CosmologyParams};
use ndarray::Array1;
use tracing::info;

use crate::engine::TransferEngine;
use crate::fits::{Bbks, BaryonShape, EisensteinHu, NoWiggle};
use crate::normalize::{self, check_positive, cobe_delta_h, Normalization};
use crate::tabulated::TabulatedTransfer;

/// The active model, carrying exactly the state it needs.
#[derive(Clone)]
pub enum TransferModel {
    /// Forwarded to the engine attached to the facade.
    External,
    EisensteinHu(EisensteinHu),
    NoWiggle(NoWiggle),
    Bbks(Bbks),
    FromFile(TabulatedTransfer),
}

impl TransferModel {
    pub fn method(&self) -> TransferFitMethod {
        match self {
            TransferModel::External => TransferFitMethod::ComputedExternally,
            TransferModel::EisensteinHu(_) => TransferFitMethod::EisensteinHu,
            TransferModel::NoWiggle(_) => TransferFitMethod::EisensteinHuNoWiggle,
            TransferModel::Bbks(_) => TransferFitMethod::Bbks,
            TransferModel::FromFile(_) => TransferFitMethod::FromFile,
        }
    }
}

impl fmt::Debug for TransferModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferModel::FromFile(table) => f
                .debug_struct("FromFile")
                .field("source", &table.source())
                .field("rows", &table.len())
                .finish(),
            other => f.write_str(other.method().as_str()),
        }
    }
}

/// Transfer function of a cosmology, with its power-spectrum amplitude.
pub struct TransferFunction<P: CosmologyParams> {
    params: Arc<P>,
    model: TransferModel,
    engine: Option<Arc<dyn TransferEngine>>,
    interpolation: SplineKind,
    integration: IntegrationConfig,
    normalization: Normalization,
}

impl<P: CosmologyParams> TransferFunction<P> {
    /// Select `method` (with `file` iff `FromFile`) and start from the
    /// COBE-normalised δ_H.
    ///
    /// `ComputedExternally` needs an engine; use [`Self::with_engine`].
    pub fn new(params: Arc<P>, method: TransferFitMethod, file: Option<&Path>) -> TransferResult<Self> {
        let mut tf = Self::unselected(params, None, SplineKind::default())?;
        tf.set_transfer_function(method, file)?;
        Ok(tf)
    }

    /// Start with `ComputedExternally` backed by `engine`.
    pub fn with_engine(params: Arc<P>, engine: Arc<dyn TransferEngine>) -> TransferResult<Self> {
        let mut tf = Self::unselected(params, Some(engine), SplineKind::default())?;
        tf.set_transfer_function(TransferFitMethod::ComputedExternally, None)?;
        Ok(tf)
    }

    /// Validated params and COBE amplitude; the caller selects a model next.
    fn unselected(
        params: Arc<P>,
        engine: Option<Arc<dyn TransferEngine>>,
        interpolation: SplineKind,
    ) -> TransferResult<Self> {
        validate_params(params.as_ref())?;
        let normalization = Normalization::from_delta_h(cobe_delta_h(params.as_ref()))?;
        Ok(TransferFunction {
            params,
            model: TransferModel::External,
            engine,
            interpolation,
            integration: IntegrationConfig::default(),
            normalization,
        })
    }

    /// Switch to `method`. `file` must be given iff `method` is `FromFile`
    /// (read with k in column 1 and T in column 2).
    pub fn set_transfer_function(
        &mut self,
        method: TransferFitMethod,
        file: Option<&Path>,
    ) -> TransferResult<()> {
        let model = match (method, file) {
            (TransferFitMethod::FromFile, Some(path)) => {
                TransferModel::FromFile(TabulatedTransfer::load(path, 1, 2, self.interpolation)?)
            }
            (TransferFitMethod::FromFile, None) => {
                return Err(TransferError::Precondition(
                    "from_file transfer requires a table path".to_string(),
                ));
            }
            (_, Some(path)) => {
                return Err(TransferError::Precondition(format!(
                    "a table path ({}) is only valid for from_file, not {method}",
                    path.display()
                )));
            }
            (TransferFitMethod::ComputedExternally, None) => {
                if self.engine.is_none() {
                    return Err(TransferError::Precondition(
                        "computed_externally requires an attached transfer engine".to_string(),
                    ));
                }
                TransferModel::External
            }
            (analytic, None) => self.analytic_model(analytic)?,
        };
        self.replace_model(model);
        Ok(())
    }

    /// Load (or reload) a table with explicit 1-based columns and select it.
    pub fn load_transfer_function(
        &mut self,
        path: impl AsRef<Path>,
        k_column: usize,
        t_column: usize,
    ) -> TransferResult<()> {
        let table = TabulatedTransfer::load(path, k_column, t_column, self.interpolation)?;
        self.replace_model(TransferModel::FromFile(table));
        Ok(())
    }

    /// Select an already-built table.
    pub fn set_table(&mut self, table: TabulatedTransfer) {
        self.replace_model(TransferModel::FromFile(table));
    }

    fn analytic_model(&self, method: TransferFitMethod) -> TransferResult<TransferModel> {
        let shape = BaryonShape::new(self.params.as_ref())?;
        Ok(match method {
            TransferFitMethod::EisensteinHu => TransferModel::EisensteinHu(EisensteinHu::from_shape(shape)),
            TransferFitMethod::EisensteinHuNoWiggle => TransferModel::NoWiggle(NoWiggle::from_shape(shape)),
            TransferFitMethod::Bbks => TransferModel::Bbks(Bbks::new(self.params.as_ref())?),
            other => {
                return Err(TransferError::Precondition(format!(
                    "{other} is not an analytic fit"
                )))
            }
        })
    }

    fn replace_model(&mut self, model: TransferModel) {
        info!(method = %model.method(), "transfer function selected");
        self.model = model;
    }

    pub fn attach_engine(&mut self, engine: Arc<dyn TransferEngine>) {
        info!(engine = engine.name(), "transfer engine attached");
        self.engine = Some(engine);
    }

    /// Remove the engine. While `ComputedExternally` stays selected,
    /// evaluation then fails with `InvalidState`.
    pub fn detach_engine(&mut self) -> Option<Arc<dyn TransferEngine>> {
        self.engine.take()
    }

    /// Spline scheme used by subsequent table loads.
    pub fn set_interpolation(&mut self, kind: SplineKind) {
        self.interpolation = kind;
    }

    pub fn set_integration(&mut self, config: IntegrationConfig) -> TransferResult<()> {
        config.validate()?;
        self.integration = config;
        Ok(())
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn method(&self) -> TransferFitMethod {
        self.model.method()
    }

    pub fn model(&self) -> &TransferModel {
        &self.model
    }

    /// The loaded table, if `FromFile` is selected.
    pub fn table(&self) -> Option<&TabulatedTransfer> {
        match &self.model {
            TransferModel::FromFile(table) => Some(table),
            _ => None,
        }
    }

    pub fn interpolation(&self) -> SplineKind {
        self.interpolation
    }

    pub fn integration(&self) -> &IntegrationConfig {
        &self.integration
    }

    /// Normalization of the linear power spectrum at z = 0.
    pub fn delta_h(&self) -> f64 {
        self.normalization.delta_h
    }

    /// σ8 last normalised to, if any.
    pub fn sigma8(&self) -> Option<f64> {
        self.normalization.sigma8
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// T(k), k in h/Mpc.
    pub fn evaluate(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        match &self.model {
            TransferModel::External => match &self.engine {
                Some(engine) => engine.transfer(k),
                None => Err(TransferError::InvalidState(
                    "computed_externally selected but no transfer engine is attached".to_string(),
                )),
            },
            TransferModel::EisensteinHu(eh) => eh.transfer(k),
            TransferModel::NoWiggle(nw) => nw.transfer(k),
            TransferModel::Bbks(bbks) => bbks.transfer(k),
            TransferModel::FromFile(table) => table.evaluate(k),
        }
    }

    pub fn evaluate_array(&self, k: &Array1<f64>) -> TransferResult<Array1<f64>> {
        let values = k
            .iter()
            .map(|&k| self.evaluate(k))
            .collect::<TransferResult<Vec<f64>>>()?;
        Ok(Array1::from_vec(values))
    }

    /// Linear matter power P(k) at z = 0 in (Mpc/h)³.
    pub fn linear_power(&self, k: f64) -> TransferResult<f64> {
        let t = self.evaluate(k)?;
        Ok(normalize::linear_power(k, t, self.params.n_s(), self.delta_h()))
    }

    /// rms linear fluctuation in top-hat spheres of `radius` Mpc/h at z = 0.
    pub fn sigma_r(&self, radius: f64) -> TransferResult<f64> {
        normalize::sigma_r(
            |k| self.evaluate(k),
            self.params.n_s(),
            self.delta_h(),
            radius,
            &self.integration,
        )
    }

    /// σ8 implied by amplitude `delta_h` and the active transfer function.
    pub fn sigma8_for(&self, delta_h: f64) -> TransferResult<f64> {
        normalize::sigma_r(
            |k| self.evaluate(k),
            self.params.n_s(),
            delta_h,
            SIGMA8_RADIUS,
            &self.integration,
        )
    }

    /// Normalization matching `target_sigma8`. Leaves `self` untouched;
    /// assign the result with [`Self::apply_normalization`].
    pub fn normalize(&self, target_sigma8: f64) -> TransferResult<Normalization> {
        check_positive("target sigma8", target_sigma8)?;
        let current = self.sigma8_for(self.delta_h())?;
        let delta_h = normalize::rescaled_delta_h(self.delta_h(), current, target_sigma8);
        info!(
            method = %self.method(),
            sigma8_current = current,
            sigma8_target = target_sigma8,
            delta_h,
            "normalized transfer function"
        );
        Ok(Normalization {
            delta_h,
            sigma8: Some(target_sigma8),
        })
    }

    pub fn apply_normalization(&mut self, normalization: Normalization) -> TransferResult<()> {
        check_positive("delta_h", normalization.delta_h)?;
        if let Some(s) = normalization.sigma8 {
            check_positive("sigma8", s)?;
        }
        self.normalization = normalization;
        Ok(())
    }

    /// [`Self::normalize`] then [`Self::apply_normalization`].
    pub fn normalize_in_place(&mut self, target_sigma8: f64) -> TransferResult<Normalization> {
        let normalization = self.normalize(target_sigma8)?;
        self.apply_normalization(normalization)?;
        Ok(normalization)
    }
}

impl TransferFunction<CosmoParams> {
    /// Build from a validated config. `engine` is required when the config
    /// selects `computed_externally`.
    pub fn from_config(
        config: &CosmologyConfig,
        engine: Option<Arc<dyn TransferEngine>>,
    ) -> TransferResult<Self> {
        config.validate()?;
        let transfer = &config.transfer;
        let params = Arc::new(config.params.clone());

        let mut tf = Self::unselected(params, engine, transfer.interpolation)?;
        tf.set_integration(config.integration)?;
        match (transfer.method, transfer.file.as_deref()) {
            (TransferFitMethod::FromFile, Some(path)) => {
                tf.load_transfer_function(path, transfer.k_column, transfer.t_column)?
            }
            (method, file) => tf.set_transfer_function(method, file)?,
        }

        if let Some(delta_h) = transfer.delta_h {
            tf.apply_normalization(Normalization::from_delta_h(delta_h)?)?;
        }
        if let Some(sigma8) = transfer.sigma8 {
            tf.normalize_in_place(sigma8)?;
        }
        info!(
            name = %config.name,
            method = %tf.method(),
            delta_h = tf.delta_h(),
            "cosmology transfer function ready"
        );
        Ok(tf)
    }
}

impl<P: CosmologyParams + fmt::Debug> fmt::Debug for TransferFunction<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferFunction")
            .field("params", &self.params)
            .field("model", &self.model)
            .field("engine", &self.engine.as_ref().map(|e| e.name().to_string()))
            .field("normalization", &self.normalization)
            .finish()
    }
}

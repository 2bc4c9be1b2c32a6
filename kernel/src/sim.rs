use crate::{curve, error::Result, mech::Sweep, CurveCfg, Error, Mechanism};

impl Mechanism {
    /// Sweep the shock from full extension to full compression.
    ///
    /// Return the `(vertical axle displacement, leverage ratio)` samples in
    /// simulation units.
    pub fn raw_curve(&self, cfg: &CurveCfg) -> Result<Vec<[f64; 2]>> {
        self.raw_curve_with(cfg, |_| ())
    }

    /// Same as [`Mechanism::raw_curve`], the callback receives each finished
    /// step number.
    pub fn raw_curve_with<C>(&self, cfg: &CurveCfg, mut callback: C) -> Result<Vec<[f64; 2]>>
    where
        C: FnMut(usize),
    {
        let steps = cfg.sim.steps;
        if steps < 2 {
            return Err(Error::Cfg("simulation steps must be 2 or greater"));
        }
        let mut sweep = Sweep::new(self);
        let axle0 = sweep.platform.joint(self.axle).y;
        let mut prev_shock = sweep.platform.length(self.shock);
        let mut prev_axle = axle0;
        let mut curve = Vec::with_capacity(steps);
        for i in 1..=steps {
            let iter = sweep.compress(i as f64 / steps as f64, &cfg.solver)?;
            let shock = sweep.platform.length(self.shock);
            // Vertical wheel travel only
            let axle = sweep.platform.joint(self.axle).y;
            let leverage = ((axle - prev_axle) / (shock - prev_shock)).abs();
            tracing::trace!(step = i, iter, leverage, "travel step");
            curve.push([axle - axle0, leverage]);
            prev_shock = shock;
            prev_axle = axle;
            callback(i);
        }
        Ok(curve)
    }

    /// The raw curve scaled to the wheel travel and corrected against the
    /// stroke.
    pub fn corrected_curve(&self, cfg: &CurveCfg) -> Result<Vec<[f64; 2]>> {
        self.corrected_curve_with(cfg, |_| ())
    }

    /// Same as [`Mechanism::corrected_curve`] with a step callback.
    pub fn corrected_curve_with<C>(&self, cfg: &CurveCfg, callback: C) -> Result<Vec<[f64; 2]>>
    where
        C: FnMut(usize),
    {
        let raw = self.raw_curve_with(cfg, callback)?;
        let scaled = curve::scale_travel(&raw, self.params.travel)?;
        Ok(curve::correct(&scaled, self.params.stroke, &cfg.correct))
    }

    /// The leverage curve quantized to `cfg.res` points.
    pub fn leverage_curve(&self, cfg: &CurveCfg) -> Result<Vec<[f64; 2]>> {
        self.leverage_curve_with(cfg, |_| ())
    }

    /// Same as [`Mechanism::leverage_curve`] with a step callback.
    pub fn leverage_curve_with<C>(&self, cfg: &CurveCfg, callback: C) -> Result<Vec<[f64; 2]>>
    where
        C: FnMut(usize),
    {
        if cfg.res < 2 {
            return Err(Error::Cfg("resolution must be 2 or greater"));
        }
        let raw = self.corrected_curve_with(cfg, callback)?;
        self.leverage_curve_from(&raw, cfg)
    }

    /// Quantize a curve from [`Mechanism::corrected_curve`] and correct it
    /// again at the new resolution.
    pub fn leverage_curve_from(&self, raw: &[[f64; 2]], cfg: &CurveCfg) -> Result<Vec<[f64; 2]>> {
        if cfg.res < 2 {
            return Err(Error::Cfg("resolution must be 2 or greater"));
        }
        if raw.len() < 2 {
            return Err(Error::Cfg("curve must have 2 samples or more"));
        }
        let stroke = self.params.stroke;
        let curve = curve::correct(&curve::quantize(raw, cfg.res), stroke, &cfg.correct);
        tracing::info!(
            res = cfg.res,
            error = curve::stroke_error(&curve, stroke),
            "leverage curve quantized"
        );
        if cfg.normalized {
            Ok(curve::normalize(&curve, self.avg_leverage()))
        } else {
            Ok(curve)
        }
    }
}

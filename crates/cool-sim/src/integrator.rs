//! Fixed-step time integrators.

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::model::TransientModel;

/// Advances a model state by one step.
pub trait Integrator {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Explicit first-order Euler: one rhs call per step.
#[derive(Clone, Copy, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}

/// Kutta's third-order method.
#[derive(Clone, Copy, Debug)]
pub struct Rk3;

impl Integrator for Rk3 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        // x3 = x - dt*k1 + 2*dt*k2
        let x3 = model.add(
            x,
            &model.add(&model.scale(&k1, -dt), &model.scale(&k2, 2.0 * dt)),
        );
        let k3 = model.rhs(t + dt, &x3)?;

        let k_sum = model.add(&model.add(&k1, &model.scale(&k2, 4.0)), &k3);
        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Classical fourth-order Runge-Kutta.
#[derive(Clone, Copy, Debug)]
pub struct Rk4;

impl Integrator for Rk4 {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let k1 = model.rhs(t, x)?;

        let x2 = model.add(x, &model.scale(&k1, 0.5 * dt));
        let k2 = model.rhs(t + 0.5 * dt, &x2)?;

        let x3 = model.add(x, &model.scale(&k2, 0.5 * dt));
        let k3 = model.rhs(t + 0.5 * dt, &x3)?;

        let x4 = model.add(x, &model.scale(&k3, dt));
        let k4 = model.rhs(t + dt, &x4)?;

        let k_sum = model.add(
            &model.add(&k1, &model.scale(&k2, 2.0)),
            &model.add(&model.scale(&k3, 2.0), &k4),
        );
        Ok(model.add(x, &model.scale(&k_sum, dt / 6.0)))
    }
}

/// Integrator selection for transient runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    Euler,
    Rk3,
    #[default]
    Rk4,
}

impl IntegratorKind {
    /// Stage evaluations per step.
    pub fn stages(self) -> usize {
        match self {
            IntegratorKind::Euler => 1,
            IntegratorKind::Rk3 => 3,
            IntegratorKind::Rk4 => 4,
        }
    }
}

impl Integrator for IntegratorKind {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        match self {
            IntegratorKind::Euler => ForwardEuler.step(model, t, x, dt),
            IntegratorKind::Rk3 => Rk3.step(model, t, x, dt),
            IntegratorKind::Rk4 => Rk4.step(model, t, x, dt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// dx/dt = -x, counting rhs calls.
    struct Decay {
        calls: usize,
    }

    impl TransientModel for Decay {
        type State = f64;

        fn initial_state(&self) -> f64 {
            1.0
        }

        fn rhs(&mut self, _t: f64, x: &f64) -> SimResult<f64> {
            self.calls += 1;
            Ok(-x)
        }

        fn add(&self, a: &f64, b: &f64) -> f64 {
            a + b
        }

        fn scale(&self, a: &f64, scale: f64) -> f64 {
            a * scale
        }
    }

    fn integrate(kind: IntegratorKind, dt: f64, t_end: f64) -> (f64, usize) {
        let mut model = Decay { calls: 0 };
        let mut x = model.initial_state();
        let steps = (t_end / dt).round() as usize;
        for i in 0..steps {
            x = kind.step(&mut model, i as f64 * dt, &x, dt).unwrap();
        }
        (x, model.calls)
    }

    #[test]
    fn euler_single_step() {
        let mut model = Decay { calls: 0 };
        let x = ForwardEuler.step(&mut model, 0.0, &1.0, 0.1).unwrap();
        assert_relative_eq!(x, 0.9);
        assert_eq!(model.calls, 1);
    }

    #[test]
    fn stage_counts() {
        for kind in [IntegratorKind::Euler, IntegratorKind::Rk3, IntegratorKind::Rk4] {
            let (_, calls) = integrate(kind, 0.1, 1.0);
            assert_eq!(calls, 10 * kind.stages());
        }
    }

    #[test]
    fn accuracy_improves_with_order() {
        let exact = (-1.0_f64).exp();
        let err = |k| (integrate(k, 0.1, 1.0).0 - exact).abs();
        let (e1, e3, e4) = (
            err(IntegratorKind::Euler),
            err(IntegratorKind::Rk3),
            err(IntegratorKind::Rk4),
        );
        assert!(e1 > e3 && e3 > e4, "{e1} {e3} {e4}");
        assert!(e4 < 1e-6);
        assert!(e3 < 1e-4);
    }

    #[test]
    fn rk3_matches_its_taylor_polynomial() {
        // One step of a third-order method on x' = -x gives 1 - h + h^2/2 - h^3/6.
        let h: f64 = 0.2;
        let mut model = Decay { calls: 0 };
        let x = Rk3.step(&mut model, 0.0, &1.0, h).unwrap();
        assert_relative_eq!(x, 1.0 - h + h * h / 2.0 - h.powi(3) / 6.0, epsilon = 1e-14);
    }

    #[test]
    fn kind_serde() {
        let k: IntegratorKind = serde_json::from_str(r#""rk3""#).unwrap();
        assert_eq!(k, IntegratorKind::Rk3);
        assert_eq!(IntegratorKind::default(), IntegratorKind::Rk4);
    }
}

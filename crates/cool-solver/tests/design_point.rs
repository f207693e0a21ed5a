//! Design-point solves on the CPU cooling network.

use approx::assert_abs_diff_eq;
use cool_components::{T_CPU, cpu_system, design_method};
use cool_network::{BoundaryInputs, EvalStatus, Residual, Start};
use cool_solver::{
    BisectionConfig, Method, RootFinder, SecantNewtonConfig, SolverError, solve_design,
    solve_design_at,
};
use proptest::prelude::*;

fn worst_case(t_air: f64) -> BoundaryInputs {
    BoundaryInputs::new()
        .with("fan.T_air", t_air)
        .with(T_CPU, 80.0)
        .with("cpu.usage", 100.0)
}

fn surface_at(t_air: f64, method: &Method) -> f64 {
    let mut net = cpu_system().unwrap();
    let binding = design_method("exchanger_surface").unwrap();
    solve_design_at(&mut net, &worst_case(t_air), &binding, method)
        .unwrap()
        .value
}

#[test]
fn exchanger_surface_at_40c_air() {
    let mut net = cpu_system().unwrap();
    let binding = design_method("exchanger_surface").unwrap();
    let solution =
        solve_design_at(&mut net, &worst_case(40.0), &binding, &BisectionConfig::default()).unwrap();

    // balance = 105 - 110 * (80 - 40) * surface
    assert_abs_diff_eq!(solution.value, 105.0 / 4400.0, epsilon = 1e-9);
    assert!(solution.value > 0.01);
    assert!(solution.residual.abs() < binding.tolerance);

    // Converged value is written back and outputs are final.
    assert_eq!(net.get("exchanger.surface").unwrap(), solution.value);
    assert_eq!(net.status(), &EvalStatus::Final);
    assert!(net.get("cpu.heat_flow_balance").unwrap().abs() < binding.tolerance);
}

#[test]
fn cooler_air_needs_less_surface() {
    for method in [
        Method::Bisection(BisectionConfig::default()),
        Method::Newton(SecantNewtonConfig::default()),
    ] {
        let s30 = surface_at(30.0, &method);
        let s40 = surface_at(40.0, &method);
        assert_abs_diff_eq!(s30, 105.0 / 5500.0, epsilon = 1e-9);
        assert!(s30 < s40, "{}: {s30} !< {s40}", method.name());
    }
}

#[test]
fn starting_from_a_poor_guess() {
    let mut net = cpu_system().unwrap();
    let mut binding = design_method("exchanger_surface").unwrap();
    binding.start = Start::Guess(0.001);
    let solution =
        solve_design_at(&mut net, &worst_case(40.0), &binding, &BisectionConfig::default()).unwrap();
    assert!((solution.value - 0.001).abs() > 1e-3);
    assert_abs_diff_eq!(solution.value, 105.0 / 4400.0, epsilon = 1e-9);
}

#[test]
fn explicit_bracket_and_target_residual() {
    let mut net = cpu_system().unwrap();
    net.apply(&worst_case(40.0)).unwrap();
    net.set("cpu.expected_next_T", 80.5).unwrap();
    let binding = design_method("exchanger_surface_for_next_T").unwrap();
    let binding = cool_network::DesignBinding {
        start: Start::Bracket([0.001, 0.1]),
        ..binding
    };
    let solution = solve_design(&mut net, &binding, &BisectionConfig::default()).unwrap();
    // next_T = 80 + (105 - 4400 s) / 20 = 80.5  =>  s = 95 / 4400
    assert_abs_diff_eq!(solution.value, 95.0 / 4400.0, epsilon = 1e-7);
}

#[test]
fn no_root_is_reported() {
    // With the air hotter than the die, more surface only heats the CPU.
    let mut net = cpu_system().unwrap();
    let mut binding = design_method("exchanger_surface").unwrap();
    binding.start = Start::Bracket([0.001, 1.0]);
    let point = BoundaryInputs::new()
        .with("fan.T_air", 90.0)
        .with(T_CPU, 80.0)
        .with("cpu.usage", 100.0);
    let err = solve_design_at(&mut net, &point, &binding, &BisectionConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::NoSignChange { .. }));
}

#[test]
fn controller_threshold_is_not_an_equilibrium() {
    // The fan jumps to max tension at 60 degC, so the balance changes sign
    // across the threshold without ever crossing zero.
    let mut net = cpu_system().unwrap();
    let point = BoundaryInputs::new()
        .with("fan.T_air", 30.0)
        .with("cpu.usage", 100.0)
        .with("exchanger.surface", 0.05);
    let binding = cool_network::DesignBinding::new(
        T_CPU,
        Residual::output("cpu.heat_flow_balance"),
        Start::Bracket([50.0, 70.0]),
    );
    let err = solve_design_at(&mut net, &point, &binding, &BisectionConfig::default()).unwrap_err();
    match err {
        SolverError::Discontinuity { x, residual, .. } => {
            assert_abs_diff_eq!(x, 60.0, epsilon = 1e-6);
            assert!(residual.abs() > 1.0);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_ne!(net.status(), &EvalStatus::Stale);
}

#[test]
fn iteration_cap_leaves_last_trial() {
    let mut net = cpu_system().unwrap();
    let binding = design_method("exchanger_surface")
        .unwrap()
        .with_tolerance(1e-12);
    let config = BisectionConfig {
        max_iterations: 2,
        ..BisectionConfig::default()
    };
    let err = solve_design_at(&mut net, &worst_case(40.0), &binding, &config).unwrap_err();
    match err {
        SolverError::NotConverged {
            iterations,
            residual,
            ..
        } => {
            assert_eq!(iterations, 2);
            assert!(residual.abs() > 1e-12);
        }
        other => panic!("unexpected {other:?}"),
    }
    // The network still holds a trial surface, not the default.
    assert_ne!(net.get("exchanger.surface").unwrap(), 0.01);
}

#[test]
fn unresolved_unknown_is_a_configuration_error() {
    let mut net = cpu_system().unwrap();
    let binding = cool_network::DesignBinding::new(
        "exchanger.area",
        Residual::output("cpu.heat_flow_balance"),
        Start::Guess(0.01),
    );
    let err = solve_design(&mut net, &binding, &BisectionConfig::default()).unwrap_err();
    assert!(matches!(err, SolverError::Network(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn surface_grows_with_air_temperature(a in 0.0_f64..70.0, b in 0.0_f64..70.0) {
        prop_assume!(a + 1.0 < b);
        let method = Method::default();
        prop_assert!(surface_at(a, &method) < surface_at(b, &method));
    }
}

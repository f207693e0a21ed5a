//! Integration tests for the assembled CPU cooling network.

use approx::assert_relative_eq;
use cool_components::{T_CPU, cpu_system};
use cool_network::{BoundaryInputs, ComponentError, EvalStatus, NetworkError};
use proptest::prelude::*;

fn operating_point(t_air: f64, t_cpu: f64, usage: f64) -> BoundaryInputs {
    BoundaryInputs::new()
        .with("fan.T_air", t_air)
        .with(T_CPU, t_cpu)
        .with("cpu.usage", usage)
}

#[test]
fn evaluation_order_is_forced_by_wiring() {
    let mut net = cpu_system().unwrap();
    assert_eq!(
        net.evaluation_order().unwrap(),
        vec!["controller", "fan", "exchanger", "cpu"]
    );
}

#[test]
fn hot_cpu_activates_the_fan() {
    let mut net = cpu_system().unwrap();
    net.evaluate_with(&BoundaryInputs::new().with(T_CPU, 40.0))
        .unwrap();

    assert_eq!(net.get("controller.tension").unwrap(), 6.0);
    assert_eq!(net.get("fan.tension").unwrap(), 6.0);
    assert_eq!(net.get("fan.fl_out.mass_flow").unwrap(), 0.5);
    assert_eq!(net.get("cpu.T").unwrap(), 40.0);
    // Die and air at the same temperature: no heat is removed.
    assert_eq!(net.get("exchanger.heat_flow").unwrap(), 0.0);
    assert_relative_eq!(net.get("cpu.next_T").unwrap(), 41.05, epsilon = 1e-12);
    assert!(net.get("cpu.T").unwrap() > 20.0);
}

#[test]
fn cpu_temperature_is_set_through_its_alias() {
    let mut net = cpu_system().unwrap();
    for path in ["cpu.T", "exchanger.T_cpu", "controller.T_cpu"] {
        assert!(matches!(
            net.set(path, 50.0),
            Err(NetworkError::DrivenByAlias { alias, .. }) if alias == T_CPU
        ));
    }
    net.evaluate().unwrap();
    assert_eq!(net.get("cpu.T").unwrap(), 20.0);
    assert_eq!(net.get("exchanger.T_cpu").unwrap(), 20.0);
    assert_eq!(net.state(), vec![20.0]);

    net.set(T_CPU, 50.0).unwrap();
    net.evaluate().unwrap();
    assert_eq!(net.get("cpu.T").unwrap(), 50.0);
    assert_eq!(net.get("exchanger.T_cpu").unwrap(), 50.0);
    assert_eq!(net.get("controller.T_cpu").unwrap(), 50.0);
    assert_eq!(net.state(), vec![50.0]);
}

#[test]
fn worst_case_operating_point_is_linear_in_surface() {
    let mut net = cpu_system().unwrap();
    net.apply(&operating_point(40.0, 80.0, 100.0)).unwrap();
    for surface in [0.01, 0.02, 0.05] {
        net.set("exchanger.surface", surface).unwrap();
        net.evaluate().unwrap();
        assert_eq!(net.get("exchanger.h").unwrap(), 110.0);
        assert_relative_eq!(
            net.get("cpu.heat_flow_balance").unwrap(),
            105.0 - 4400.0 * surface,
            epsilon = 1e-9
        );
    }
}

#[test]
fn paths_expose_alias_and_ports() {
    let net = cpu_system().unwrap();
    let paths = net.paths();
    assert_eq!(paths[0], T_CPU);
    for expected in ["cpu.usage", "fan.T_air", "fan.tension", "fan.fl_out.T", "cpu.dT_dt"] {
        assert!(paths.iter().any(|p| p == expected), "missing {expected}");
    }
}

#[test]
fn driven_inputs_cannot_be_set() {
    let mut net = cpu_system().unwrap();
    assert!(matches!(
        net.set("fan.tension", 3.0),
        Err(NetworkError::DrivenByConnection { .. })
    ));
    assert!(matches!(
        net.set("cpu.power", 3.0),
        Err(NetworkError::NotWritable { .. })
    ));
    assert!(matches!(
        net.set("cpu.voltage", 3.0),
        Err(NetworkError::UnresolvedPath { .. })
    ));
}

#[test]
fn zero_heat_capacity_is_a_configuration_error() {
    let mut net = cpu_system().unwrap();
    net.set("cpu.heat_capacity", 0.0).unwrap();
    let err = net.evaluate().unwrap_err();
    assert_eq!(
        err,
        NetworkError::Component {
            name: "cpu".into(),
            source: ComponentError::NonPositive {
                what: "heat_capacity",
                value: 0.0
            },
        }
    );
    assert_eq!(
        net.status(),
        &EvalStatus::Partial {
            evaluated: 3,
            failed: "cpu".into()
        }
    );
}

#[test]
fn zero_cp_stops_at_the_exchanger() {
    let mut net = cpu_system().unwrap();
    net.set("exchanger.cp", 0.0).unwrap();
    assert!(matches!(
        net.evaluate(),
        Err(NetworkError::Component { ref name, .. }) if name == "exchanger"
    ));
}

#[test]
fn negative_heat_flow_is_a_warning() {
    let mut net = cpu_system().unwrap();
    net.evaluate_with(&operating_point(60.0, 30.0, 50.0)).unwrap();
    assert_eq!(net.status(), &EvalStatus::Final);
    assert!(net.get("exchanger.heat_flow").unwrap() < 0.0);
    assert!(net.warnings().iter().any(|w| w.component == "exchanger"));
}

#[test]
fn derivative_matches_balance_over_capacity() {
    let mut net = cpu_system().unwrap();
    let boundary = BoundaryInputs::new().with("cpu.usage", 100.0);
    let rates = net.derivative(&[30.0], &boundary).unwrap();
    net.evaluate_with(&boundary.clone().with(T_CPU, 30.0)).unwrap();
    let expected = net.get("cpu.heat_flow_balance").unwrap() / net.get("cpu.heat_capacity").unwrap();
    assert_relative_eq!(rates[0], expected, epsilon = 1e-12);
}

proptest! {
    #[test]
    fn wiring_holds_for_any_operating_point(
        t_air in 0.0_f64..60.0,
        t_cpu in 0.0_f64..120.0,
        usage in 0.0_f64..100.0,
    ) {
        let mut net = cpu_system().unwrap();
        net.evaluate_with(&operating_point(t_air, t_cpu, usage)).unwrap();
        prop_assert_eq!(net.get("exchanger.fl_in.mass_flow").unwrap(), net.get("fan.fl_out.mass_flow").unwrap());
        prop_assert_eq!(net.get("exchanger.fl_in.T").unwrap(), net.get("fan.fl_out.T").unwrap());
        prop_assert_eq!(net.get("cpu.heat_flow").unwrap(), net.get("exchanger.heat_flow").unwrap());
        prop_assert_eq!(net.get("controller.T_cpu").unwrap(), t_cpu);
        prop_assert_eq!(net.get("cpu.T").unwrap(), t_cpu);
    }

    #[test]
    fn balance_decreases_with_surface(a in 0.001_f64..0.1, b in 0.001_f64..0.1) {
        prop_assume!(a < b);
        let mut net = cpu_system().unwrap();
        net.apply(&operating_point(40.0, 80.0, 100.0)).unwrap();
        net.set("exchanger.surface", a).unwrap();
        net.evaluate().unwrap();
        let at_a = net.get("cpu.heat_flow_balance").unwrap();
        net.set("exchanger.surface", b).unwrap();
        net.evaluate().unwrap();
        let at_b = net.get("cpu.heat_flow_balance").unwrap();
        prop_assert!(at_b < at_a);
    }

    #[test]
    fn evaluation_is_idempotent(t_cpu in 0.0_f64..120.0, usage in 0.0_f64..100.0) {
        let mut net = cpu_system().unwrap();
        let boundary = operating_point(40.0, t_cpu, usage);
        net.evaluate_with(&boundary).unwrap();
        let first: Vec<f64> = net.paths().iter().map(|p| net.get(p).unwrap()).collect();
        net.evaluate().unwrap();
        let second: Vec<f64> = net.paths().iter().map(|p| net.get(p).unwrap()).collect();
        prop_assert_eq!(first, second);
    }
}

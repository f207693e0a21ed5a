//! Transient runs of the CPU cooling network.

use approx::assert_relative_eq;
use cool_components::{T_CPU, cpu_system};
use cool_network::{BoundaryInputs, Network, NetworkError};
use cool_sim::{
    IntegratorKind, Scenario, Schedule, Schedules, Selection, SimError, TIME, TransientOptions,
    run_transient,
};

fn heating_scenario() -> Scenario {
    // Degraded convection: the exchanger pulls far less than the die makes.
    let init = BoundaryInputs::new()
        .with(T_CPU, 10.0)
        .with("exchanger.h_adder", -30.0)
        .with("fan.T_air", 40.0);
    let schedules = Schedules::new().with("cpu.usage", Schedule::constant(100.0));
    Scenario::new(init, schedules)
}

fn options(integrator: IntegratorKind) -> TransientOptions {
    TransientOptions {
        t_start: 0.0,
        t_end: 30.0,
        dt: 1.0,
        integrator,
        ..TransientOptions::default()
    }
}

fn columns() -> Selection {
    Selection::paths([T_CPU, "cpu.T", "cpu.heat_flow_balance", "fan.T_air", "cpu.usage"])
}

#[test]
fn temperature_rises_while_heat_accumulates() {
    for kind in [IntegratorKind::Euler, IntegratorKind::Rk3, IntegratorKind::Rk4] {
        let mut net = cpu_system().unwrap();
        let rec = run_transient(&mut net, &heating_scenario(), &options(kind), &columns()).unwrap();

        assert_eq!(rec.len(), 31);
        assert_eq!(rec.columns[0], TIME);
        let temps = rec.column(T_CPU).unwrap();
        let balance = rec.column("cpu.heat_flow_balance").unwrap();
        assert_eq!(temps[0], 10.0);
        assert!(balance.iter().all(|b| *b > 0.0), "{kind:?}");
        assert!(temps.windows(2).all(|w| w[1] > w[0]), "{kind:?}: {temps:?}");
    }
}

#[test]
fn euler_steps_by_the_recorded_balance() {
    let mut net = cpu_system().unwrap();
    let rec = run_transient(
        &mut net,
        &heating_scenario(),
        &options(IntegratorKind::Euler),
        &columns(),
    )
    .unwrap();
    let temps = rec.column(T_CPU).unwrap();
    let balance = rec.column("cpu.heat_flow_balance").unwrap();
    for i in 0..30 {
        // heat capacity 20 J/K, dt 1 s
        assert_relative_eq!(temps[i + 1], temps[i] + balance[i] / 20.0, epsilon = 1e-9);
    }
}

#[test]
fn state_and_alias_targets_agree() {
    let mut net = cpu_system().unwrap();
    let rec = run_transient(
        &mut net,
        &heating_scenario(),
        &options(IntegratorKind::Rk4),
        &columns(),
    )
    .unwrap();
    assert_eq!(rec.column(T_CPU), rec.column("cpu.T"));
    // The network ends holding the last recorded state.
    assert_eq!(net.get(T_CPU).unwrap(), *rec.column(T_CPU).unwrap().last().unwrap());
}

#[test]
fn schedules_are_sampled_on_the_step_grid() {
    let mut net = cpu_system().unwrap();
    let schedules = Schedules::from_tables([
        (
            "cpu.usage",
            vec![[0.0, 90.0], [20.0, 90.0], [21.0, 0.0], [30.0, 0.0]],
        ),
        ("fan.T_air", vec![[0.0, 40.0], [15.0, 45.5], [30.0, 38.0]]),
    ])
    .unwrap();
    let scenario = Scenario::new(BoundaryInputs::new().with(T_CPU, 10.0), schedules);
    let rec = run_transient(
        &mut net,
        &scenario,
        &options(IntegratorKind::Rk4),
        &Selection::all(),
    )
    .unwrap();

    assert_eq!(rec.len(), 31);
    let time = rec.column(TIME).unwrap();
    assert_eq!(time.first(), Some(&0.0));
    assert_eq!(time.last(), Some(&30.0));

    let t_air = rec.column("fan.T_air").unwrap();
    assert_eq!(t_air[0], 40.0);
    assert_eq!(t_air[15], 45.5);
    assert_eq!(t_air[30], 38.0);

    let usage = rec.column("cpu.usage").unwrap();
    assert_eq!(usage[20], 90.0);
    assert_eq!(usage[21], 0.0);
    // Idle CPU with the fan running: the die cools.
    let temps = rec.column(T_CPU).unwrap();
    assert!(temps[30] < temps[21]);
}

#[test]
fn wildcard_records_every_path() {
    let mut net = cpu_system().unwrap();
    let opts = TransientOptions {
        t_end: 2.0,
        dt: 1.0,
        ..TransientOptions::default()
    };
    let rec = run_transient(&mut net, &heating_scenario(), &opts, &Selection::all()).unwrap();
    let mut expected = vec![TIME.to_string()];
    expected.extend(net.paths());
    assert_eq!(rec.columns, expected);
    assert_eq!(rec.len(), 3);
}

#[test]
fn zero_length_run_records_the_initial_point() {
    let mut net = cpu_system().unwrap();
    let opts = TransientOptions {
        t_start: 5.0,
        t_end: 5.0,
        dt: 1.0,
        ..TransientOptions::default()
    };
    let rec = run_transient(&mut net, &heating_scenario(), &opts, &columns()).unwrap();
    assert_eq!(rec.len(), 1);
    assert_eq!(rec.value(0, TIME), Some(5.0));
    assert_eq!(rec.value(0, T_CPU), Some(10.0));
}

#[test]
fn unknown_schedule_path_fails_at_start_time() {
    let mut net = cpu_system().unwrap();
    let scenario = Scenario::new(
        BoundaryInputs::new(),
        Schedules::new().with("cpu.load", Schedule::constant(1.0)),
    );
    let err = run_transient(
        &mut net,
        &scenario,
        &options(IntegratorKind::Euler),
        &columns(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        SimError::AtTime {
            time: 0.0,
            source: NetworkError::UnresolvedPath {
                path: "cpu.load".into()
            }
        }
    );
}

#[test]
fn scheduling_the_state_is_rejected() {
    // Through the alias or any of its targets.
    for path in [T_CPU, "cpu.T", "controller.T_cpu"] {
        let mut net = cpu_system().unwrap();
        let scenario = Scenario::new(
            BoundaryInputs::new(),
            Schedules::new().with(path, Schedule::constant(50.0)),
        );
        let err = run_transient(&mut net, &scenario, &options(IntegratorKind::Rk4), &columns())
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }), "{path}: {err:?}");
        assert_eq!(net.get(T_CPU).unwrap(), 20.0);
    }
}

#[test]
fn stateless_network_is_rejected() {
    let mut net = Network::new("empty");
    let err = run_transient(
        &mut net,
        &Scenario::default(),
        &TransientOptions::default(),
        &Selection::all(),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::InvalidArg { .. }));
}

#[test]
fn component_failure_reports_time() {
    let mut net = cpu_system().unwrap();
    let mut scenario = heating_scenario();
    scenario.schedules = Schedules::from_tables([(
        "cpu.heat_capacity",
        vec![[0.0, 20.0], [3.0, 20.0], [4.0, 0.0]],
    )])
    .unwrap();
    let err = run_transient(&mut net, &scenario, &options(IntegratorKind::Euler), &columns())
        .unwrap_err();
    match err {
        SimError::AtTime {
            time,
            source: NetworkError::Component { name, .. },
        } => {
            assert_eq!(time, 4.0);
            assert_eq!(name, "cpu");
        }
        other => panic!("unexpected {other:?}"),
    }
}

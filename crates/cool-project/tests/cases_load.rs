use std::path::PathBuf;

use cool_project::{StudyDef, load_case};

fn cases_dir() -> PathBuf {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .join("cases")
}

#[test]
fn bundled_cases_load_and_validate() {
    let expected = [
        ("01_exchanger_surface.yaml", "design"),
        ("02_surface_for_next_t.yaml", "design"),
        ("03_heating_transient.yaml", "transient"),
        ("04_air_sweep.json", "sweep"),
    ];
    for (file, kind) in expected {
        let path = cases_dir().join(file);
        let case = load_case(&path)
            .unwrap_or_else(|e| panic!("case failed to load: {} => {e}", path.display()));
        assert_eq!(case.study.kind(), kind, "{file}");
        assert_eq!(case.system, "cpu_system");
    }
}

#[test]
fn transient_case_fields() {
    let case = load_case(&cases_dir().join("03_heating_transient.yaml")).unwrap();
    let StudyDef::Transient(t) = case.study else {
        panic!("not a transient case");
    };
    assert_eq!(t.init.get("T_cpu"), Some(&10.0));
    assert_eq!(t.schedules["cpu.usage"].len(), 4);
    assert_eq!(t.record.entries()[0], "T_cpu");
}

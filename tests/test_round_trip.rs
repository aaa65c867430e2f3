mod common;

use common::{assert_elements_close, assert_state_close, sample_elements};
use conics::element_table::ElementTable;
use conics::Conics;
use test_case::test_case;

#[test_case(0.05 ; "nearly circular")]
#[test_case(0.6 ; "elliptic")]
#[test_case(0.97 ; "comet like")]
#[test_case(1.0 ; "parabolic")]
#[test_case(3.5 ; "hyperbolic")]
fn elements_state_elements(ecc: f64) {
    let engine = Conics::default();
    let el = sample_elements(1.3, ecc);
    let conic = el.to_conic(engine.params().mu);

    for nu_deg in [-80.0_f64, 0.0, 20.0, 95.0] {
        let state = engine.convert(&el, nu_deg);
        let epoch =
            el.periapsis_epoch + conic.time_since_periapsis(nu_deg.to_radians(), engine.params().mu);

        let back = engine.elements_from_state(&state, epoch);
        assert_elements_close(&back, &el, 1e-7);
        assert!((back.periapsis_epoch - el.periapsis_epoch).abs() < 1e-5);

        // and back to the same state
        let again = engine.convert(&back, nu_deg);
        assert_state_close(&again, &state, 1e-9, 1e-11);
    }
}

#[test]
fn bundled_table_matches_file() {
    let mu = Conics::default().params().mu;
    let bundled = ElementTable::planets_j2000(mu).unwrap();
    let from_file = ElementTable::from_path("data/planets.csv", mu).unwrap();
    assert_eq!(bundled, from_file);
}

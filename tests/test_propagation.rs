mod common;

use approx::assert_abs_diff_eq;
use common::{assert_state_close, sample_elements};
use conics::element_table::ElementTable;
use conics::kepler::Regime;
use conics::orbital_elements::OrbitalElements;
use conics::{Conics, ConicsParams};
use test_case::test_case;

#[test]
fn earth_returns_after_one_year() {
    let engine = Conics::default();
    let table = ElementTable::planets_j2000(engine.params().mu).unwrap();
    let earth = table.get("Earth").unwrap();

    let s0 = engine.sample(earth, 2451545.0).reference.state;
    let s1 = engine.propagate(&s0, 365.25);

    assert!(s1.convergence.converged);
    assert_eq!(s1.regime, Regime::Elliptic);
    assert!((s1.state.position - s0.position).norm() < 0.01);
}

#[test]
fn earth_like_elements_close_after_one_year() {
    let engine = Conics::default();
    let earth = OrbitalElements::new(0.983, 0.0167, 0.00005, 174.9, 288.1, 2451547.5);

    let s0 = engine.sample(&earth, earth.periapsis_epoch).reference.state;
    assert_abs_diff_eq!(s0.radius(), 0.983, epsilon = 1e-9);

    let s1 = engine.propagate(&s0, 365.25);
    assert!(s1.convergence.converged);
    assert!((s1.state.position - s0.position).norm() < 0.01);
}

#[test_case(0.5, Regime::Elliptic ; "elliptic")]
#[test_case(1.5, Regime::Hyperbolic ; "hyperbolic")]
#[test_case(1.0 - 1e-8, Regime::Parabolic ; "just below parabolic")]
#[test_case(1.0 + 1e-8, Regime::Parabolic ; "just above parabolic")]
fn forward_then_backward_is_identity(ecc: f64, regime: Regime) {
    let engine = Conics::default();
    let el = sample_elements(1.0, ecc);
    let s0 = engine.convert(&el, 30.0);

    for dt in [1.0, 100.0, -250.0] {
        let fwd = engine.propagate(&s0, dt);
        let back = engine.propagate(&fwd.state, -dt);

        assert_eq!(fwd.regime, regime);
        assert!(fwd.convergence.converged && back.convergence.converged);
        assert_state_close(&back.state, &s0, 1e-6, 1e-8);
    }
}

#[test_case(-109.0, 4990.0 ; "inbound through periapsis")]
#[test_case(-109.0, -3000.0 ; "inbound further back")]
#[test_case(109.0, 3000.0 ; "outbound further out")]
#[test_case(109.0, -4990.0 ; "outbound back through periapsis")]
fn long_hyperbolic_legs_converge(nu_deg: f64, dt: f64) {
    let engine = Conics::default();
    let el = sample_elements(1.0, 3.0);
    let s0 = engine.convert(&el, nu_deg);
    assert!(s0.radius() > 150.0);

    let fwd = engine.propagate(&s0, dt);
    let back = engine.propagate(&fwd.state, -dt);

    assert_eq!(fwd.regime, Regime::Hyperbolic);
    assert!(fwd.convergence.converged, "{:?}", fwd.convergence);
    assert!(back.convergence.converged, "{:?}", back.convergence);
    assert!(fwd.convergence.iterations < engine.params().universal_max_iter);
    assert_state_close(&back.state, &s0, 1e-6, 1e-8);
}

#[test_case(0.0 ; "circular")]
#[test_case(0.7 ; "elliptic")]
#[test_case(1.0 ; "parabolic")]
#[test_case(2.2 ; "hyperbolic")]
fn propagation_agrees_with_time_of_flight(ecc: f64) {
    let params = ConicsParams::default();
    let engine = Conics::new(params.clone());
    let el = sample_elements(0.6, ecc);
    let conic = el.to_conic(params.mu);

    let periapsis = conic.state_at(0.0, params.mu);
    for nu_deg in [-100.0_f64, 45.0, 110.0] {
        let nu = nu_deg.to_radians();
        let dt = conic.time_since_periapsis(nu, params.mu);
        let propagated = engine.propagate(&periapsis, dt);
        let expected = conic.state_at(nu, params.mu);

        assert_state_close(&propagated.state, &expected, 1e-8, 1e-10);
    }
}

#[test]
fn hard_iteration_cap() {
    let params = ConicsParams::builder()
        .universal_max_iter(2)
        .universal_tol(1e-300)
        .build()
        .unwrap();
    let engine = Conics::new(params);
    let s0 = engine.convert(&sample_elements(1.0, 0.9), 0.0);

    let p = engine.propagate(&s0, 5000.0);
    assert!(!p.convergence.converged);
    assert_eq!(p.convergence.iterations, 2);
}

#[test]
fn zero_step_returns_input() {
    let engine = Conics::default();
    let s0 = engine.convert(&sample_elements(1.0, 0.3), 77.0);
    let p = engine.propagate(&s0, 0.0);
    assert_eq!(p.state, s0);
    assert_abs_diff_eq!(p.chi, 0.0);
}

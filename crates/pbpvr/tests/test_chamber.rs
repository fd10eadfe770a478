use approx::{assert_abs_diff_eq, assert_relative_eq};
use pbpvr::{
    ChamberError, ChamberPressureModel, ChamberWall, CurveMix, KPa, KlotzVolume, MmHg, VolumeRatio,
    INVERSION_SEED,
};

/// Wall of the reference chamber: D=0.27, a=1 kPa, b=3.8, Ta=50 kPa,
/// λ0=1.58/1.85
fn reference_wall() -> ChamberWall {
    ChamberWall::default()
}

#[test]
fn test_passive_pressure_baseline() {
    let model = ChamberPressureModel::edpvr(reference_wall()).unwrap();

    // baselines recorded from Gauss-Kronrod and Romberg integration of the
    // energy-density rate, agreeing to ~1e-13
    assert_relative_eq!(
        model.passive_pressure(VolumeRatio(1.5)).unwrap().0,
        2.367932805681603,
        max_relative = 1e-8
    );
    assert_relative_eq!(
        model.passive_pressure(VolumeRatio(1.2)).unwrap().0,
        0.8777397412167313,
        max_relative = 1e-8
    );
    assert_relative_eq!(
        model.passive_pressure(VolumeRatio(2.2)).unwrap().0,
        13.91928737495078,
        max_relative = 1e-8
    );

    // the unloaded chamber carries no passive pressure
    assert_abs_diff_eq!(
        model.passive_pressure(VolumeRatio(1.)).unwrap().0,
        0.,
        epsilon = 1e-12
    );
}

#[test]
fn test_active_pressure_baseline() {
    let model = ChamberPressureModel::espvr(reference_wall()).unwrap();

    assert_relative_eq!(
        model.active_pressure(VolumeRatio(1.5)).unwrap().0,
        73.56312869162612,
        max_relative = 1e-8
    );

    // active pressure scales linearly with the developed tension
    let relaxed = ChamberPressureModel::espvr(reference_wall().with_active_tension(MmHg(0.)))
        .unwrap();
    assert_abs_diff_eq!(
        relaxed.active_pressure(VolumeRatio(1.5)).unwrap().0,
        0.,
        epsilon = 1e-12
    );
}

#[test]
fn test_passive_pressure_is_monotonic() {
    let model = ChamberPressureModel::edpvr(reference_wall()).unwrap();

    let mut previous = model.passive_pressure(VolumeRatio(1.2)).unwrap().0;
    for i in 1..=20 {
        let vn = 1.2 + 0.05 * i as f64;
        let p = model.passive_pressure(VolumeRatio(vn)).unwrap().0;
        assert!(p > previous, "pressure not increasing at Vn={vn}");
        previous = p;
    }
}

#[test]
fn test_curve_mix_combines_contributions() {
    let wall = reference_wall();
    let edpvr = ChamberPressureModel::edpvr(wall.clone()).unwrap();
    let espvr = ChamberPressureModel::espvr(wall.clone()).unwrap();
    let half = ChamberPressureModel::new(
        wall,
        CurveMix {
            passive: 0.5,
            active: 2.,
        },
    )
    .unwrap();

    for vn in [0.8, 1., 1.5, 2.] {
        let vn = VolumeRatio(vn);
        let passive = espvr.passive_pressure(vn).unwrap().0;
        let active = espvr.active_pressure(vn).unwrap().0;

        assert_relative_eq!(
            edpvr.pressure(vn).unwrap().0,
            passive,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            espvr.pressure(vn).unwrap().0,
            passive + active,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            half.pressure(vn).unwrap().0,
            0.5 * passive + 2. * active,
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_pressure_curve_preserves_order() {
    let model = ChamberPressureModel::edpvr(reference_wall()).unwrap();

    let volumes = [VolumeRatio(2.2), VolumeRatio(1.2), VolumeRatio(1.5)];
    let curve = model.pressure_curve(&volumes).unwrap();

    assert_eq!(curve.len(), volumes.len());
    for (vn, p) in volumes.iter().zip(&curve) {
        assert_relative_eq!(model.pressure(*vn).unwrap().0, p.0);
    }
}

#[test]
fn test_klotz_reference_ratio() {
    let model = ChamberPressureModel::edpvr(reference_wall()).unwrap();

    let v30 = model.klotz_reference_ratio().unwrap();

    // independently solved by bisection to full precision
    assert_relative_eq!(v30.volume_ratio.0, 2.4996253904681422, max_relative = 1e-6);
    assert!(v30.residual.0.abs() <= 1e-6);

    let p = model.passive_pressure(v30.volume_ratio).unwrap().0;
    assert_abs_diff_eq!(p, 30., epsilon = 1e-4);
}

#[test]
fn test_pressure_volume_round_trip() {
    let wall = reference_wall();

    for model in [
        ChamberPressureModel::edpvr(wall.clone()).unwrap(),
        ChamberPressureModel::espvr(wall).unwrap(),
    ] {
        for target in [2.367932805681603, 10., 80.] {
            // skip targets below the curve's value range
            if model.mix() == CurveMix::EDPVR && target > 30. {
                continue;
            }
            if model.mix() == CurveMix::ESPVR && target < 60. {
                continue;
            }

            let sol = model.volume(MmHg(target), INVERSION_SEED).unwrap();
            assert!(sol.residual.0.abs() <= 1e-6);

            let p = model.pressure(sol.volume_ratio).unwrap().0;
            assert_abs_diff_eq!(p, target, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_passive_curve_klotz() {
    let model = ChamberPressureModel::edpvr(reference_wall()).unwrap();

    // Klotz 0 is the unloaded volume, Klotz 1 the 30 mmHg reference volume
    let curve = model
        .passive_curve_klotz(&[KlotzVolume(0.), KlotzVolume(1.)])
        .unwrap();

    assert_abs_diff_eq!(curve[0].0, 0., epsilon = 1e-9);
    assert_abs_diff_eq!(curve[1].0, 30., epsilon = 1e-4);
}

#[test]
fn test_collapsed_volumes_are_rejected() {
    let model = ChamberPressureModel::espvr(reference_wall()).unwrap();

    // the radicand R³ + Vn - 1 vanishes at the outer surface for this ratio
    let boundary = 1. - (1. + model.wall().thickness).powi(3);

    for vn in [0., -0.5, boundary, f64::NAN, f64::INFINITY] {
        let err = model.pressure(VolumeRatio(vn)).unwrap_err();
        assert!(
            matches!(err, ChamberError::Domain(_)),
            "expected domain error for Vn={vn}, got {err:?}"
        );
    }
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let err = ChamberPressureModel::edpvr(reference_wall().with_thickness(-0.27)).unwrap_err();
    assert!(matches!(err, ChamberError::InvalidParameter { .. }));

    let err = ChamberPressureModel::edpvr(reference_wall().with_stiffening(f64::NAN)).unwrap_err();
    assert!(matches!(err, ChamberError::InvalidParameter { .. }));

    let err = ChamberPressureModel::new(
        reference_wall(),
        CurveMix {
            passive: f64::INFINITY,
            active: 0.,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ChamberError::InvalidParameter { .. }));
}

#[test]
fn test_exhausted_inversion_reports_convergence_failure() {
    let model = ChamberPressureModel::edpvr(reference_wall())
        .unwrap()
        .with_inversion_steps(1);

    let err = model.klotz_reference_ratio().unwrap_err();
    assert!(matches!(err, ChamberError::Convergence { .. }));
}

#[test]
fn test_stiffness_unit_conversion() {
    // passive parameters are given in kPa and carried internally in mmHg
    let wall = reference_wall();
    assert_relative_eq!(
        wall.stiffness.0,
        MmHg::from(KPa(1.)).0,
        max_relative = 1e-12
    );
    assert_relative_eq!(wall.stiffness.0, 7.50062, max_relative = 1e-12);
}

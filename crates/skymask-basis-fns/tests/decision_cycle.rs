//! Full decision cycles: footprint, counters, and every basis function
//! evaluated against one snapshot.

use skymask_basis::{validate_basis_set, BasisFunction, BasisSetError, BasisValue, EvalContext};
use skymask_basis_fns::{
    HourAngleMask, MoonAltGate, NightCountMask, NightRangeGate, StaticRegionMask, TotalCountMask,
};
use skymask_core::{Band, Conditions, FeatureKind};
use skymask_features::{FeatureRegistry, ObservationRecord};
use skymask_footprint::{FootprintBuilder, FootprintConfig, SurveyRegion};
use skymask_sphere::{HealpixGrid, SkyPixels};

struct Survey {
    grid: HealpixGrid,
    basis: Vec<Box<dyn BasisFunction>>,
    registry: FeatureRegistry,
}

impl Survey {
    fn new(nside: u32) -> Self {
        let config = FootprintConfig::with_nside(nside).unwrap();
        let grid = config.nside;
        let maps = FootprintBuilder::new(config).unwrap().build().unwrap();

        let basis: Vec<Box<dyn BasisFunction>> = vec![
            Box::new(StaticRegionMask::from_footprint(&maps, SurveyRegion::LowDust)),
            Box::new(HourAngleMask::new(&grid, Some(4.0), Some(20.0)).unwrap()),
            Box::new(NightCountMask::new(&grid, 2, None)),
            Box::new(TotalCountMask::new(&grid, 3, Some(Band::R))),
            Box::new(NightRangeGate::default()),
            Box::new(MoonAltGate::default()),
        ];
        let refs: Vec<&dyn BasisFunction> = basis.iter().map(|b| &**b).collect();
        let plan = skymask_basis::plan_features(&refs);
        let registry = FeatureRegistry::with_kinds(grid.npix(), plan.kinds());
        Self {
            grid,
            basis,
            registry,
        }
    }

    fn refs(&self) -> Vec<&dyn BasisFunction> {
        self.basis.iter().map(|b| &**b).collect()
    }

    /// Sum of every map-valued output, or `None` if a gate is closed.
    fn score(&self, conditions: &Conditions) -> Option<Vec<f64>> {
        let ctx = EvalContext::new(conditions, &self.registry);
        let mut total = vec![0.0; self.grid.npix()];
        for basis in &self.basis {
            if !basis.check_feasibility(&ctx).unwrap() {
                return None;
            }
            match basis.calc_value(&ctx).unwrap() {
                BasisValue::Map(values) => {
                    for (t, v) in total.iter_mut().zip(values) {
                        *t += v;
                    }
                }
                BasisValue::Scalar(v) => total.iter_mut().for_each(|t| *t += v),
            }
        }
        Some(total)
    }
}

fn conditions(sky: &SkyPixels, lmst: f64, night: u32) -> Conditions {
    Conditions::new(sky.len())
        .with_night(night)
        .with_moon_alt_degrees(-20.0)
        .with_hour_angle(sky.hour_angles(lmst))
        .unwrap()
}

#[test]
fn registry_satisfies_the_declared_features() {
    let survey = Survey::new(8);
    let plan = validate_basis_set(&survey.refs(), &survey.registry, survey.grid.npix()).unwrap();
    assert_eq!(
        plan.kinds().collect::<Vec<_>>(),
        vec![
            FeatureKind::NightCount { band: None },
            FeatureKind::TotalCount { band: Some(Band::R) },
        ]
    );
    assert_eq!(
        plan.consumers(FeatureKind::NightCount { band: None }).unwrap(),
        &["NightCountMask".to_string()]
    );
}

#[test]
fn empty_registry_fails_validation() {
    let survey = Survey::new(4);
    let empty = FeatureRegistry::new(survey.grid.npix());
    assert!(matches!(
        validate_basis_set(&survey.refs(), &empty, survey.grid.npix()),
        Err(BasisSetError::MissingFeature { .. })
    ));
}

#[test]
fn feasible_pixels_are_lowdust_near_the_meridian() {
    let survey = Survey::new(8);
    let sky = SkyPixels::new(&survey.grid);
    let snapshot = conditions(&sky, 6.0, 10);
    let score = survey.score(&snapshot).unwrap();

    let maps = FootprintBuilder::new(FootprintConfig::with_nside(8).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let mut open = 0;
    for (pix, v) in score.iter().enumerate() {
        let hours = snapshot.hour_angle()[pix] * 12.0 / std::f64::consts::PI;
        let near_meridian = hours < 4.0 || hours > 20.0;
        let expected = maps.labels().get(pix) == Some(SurveyRegion::LowDust) && near_meridian;
        assert_eq!(!v.is_nan(), expected, "pixel {pix}");
        open += usize::from(expected);
    }
    assert!(open > 0);
}

#[test]
fn visits_close_pixels_and_new_nights_reopen_them() {
    let mut survey = Survey::new(8);
    let sky = SkyPixels::new(&survey.grid);
    let snapshot = conditions(&sky, 6.0, 10);
    let before = survey.score(&snapshot).unwrap();
    let target = before
        .iter()
        .position(|v| !v.is_nan())
        .expect("some pixel is open");

    for _ in 0..2 {
        survey
            .registry
            .add_observation(&ObservationRecord::new(10, Band::G, vec![target]))
            .unwrap();
    }
    assert!(survey.score(&snapshot).unwrap()[target].is_nan());

    // A new night clears the nightly count; g visits do not touch the r total.
    survey.registry.start_night(11);
    let next = conditions(&sky, 6.0, 11);
    assert_eq!(survey.score(&next).unwrap()[target], 0.0);

    for night in 11..14 {
        survey
            .registry
            .add_observation(&ObservationRecord::new(night, Band::R, vec![target]))
            .unwrap();
    }
    survey.registry.start_night(14);
    let later = conditions(&sky, 6.0, 14);
    assert!(survey.score(&later).unwrap()[target].is_nan());
}

#[test]
fn gates_close_the_whole_sky() {
    let survey = Survey::new(4);
    let sky = SkyPixels::new(&survey.grid);
    assert!(survey.score(&conditions(&sky, 0.0, 367)).is_none());
    let moonlit = conditions(&sky, 0.0, 1).with_moon_alt_degrees(30.0);
    assert!(survey.score(&moonlit).is_none());
}

#[test]
fn out_of_range_visit_is_rejected_whole() {
    let mut survey = Survey::new(4);
    let npix = survey.grid.npix();
    let err = survey
        .registry
        .add_observation(&ObservationRecord::new(0, Band::R, vec![0, npix]))
        .unwrap_err();
    assert_eq!(
        err,
        skymask_core::FeatureError::PixelOutOfRange { pixel: npix, npix }
    );
}

use geoprim::{GeoBounds, LatLng};

/// Tuning for programmatic viewport fits.
///
/// Result-set fits are tiered by count: small sets (up to
/// `small_set_limit`) get tighter padding and a higher zoom ceiling than
/// larger ones.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitConfig {
    /// Zoom used when flying to a single result.
    pub single_result_zoom: f64,
    pub small_set_limit: usize,
    pub small_set_padding_px: u32,
    pub small_set_max_zoom: f64,
    pub large_set_padding_px: u32,
    pub large_set_max_zoom: f64,
    /// Transition length for result-set fits (milliseconds).
    pub results_duration_ms: u32,
    /// Padding around an active route.
    pub route_padding_px: u32,
    /// Fast-but-visible transition for route fits.
    pub route_duration_ms: u32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            single_result_zoom: 16.0,
            small_set_limit: 3,
            small_set_padding_px: 60,
            small_set_max_zoom: 16.0,
            large_set_padding_px: 100,
            large_set_max_zoom: 14.0,
            results_duration_ms: 600,
            route_padding_px: 100,
            route_duration_ms: 400,
        }
    }
}

/// How the viewport should be moved to present a result set or a route.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FitDecision {
    FlyTo {
        center: LatLng,
        zoom: f64,
        duration_ms: u32,
    },
    FitBounds {
        bounds: GeoBounds,
        padding_px: u32,
        max_zoom: f64,
        duration_ms: u32,
    },
}

/// Fit the viewport to a manual-search result set.
///
/// One point centers and zooms; multiple points compute min/max bounds with
/// padding/zoom tiered by count. Returns `None` for an empty set.
pub fn fit_results(points: &[LatLng], config: &FitConfig) -> Option<FitDecision> {
    match points {
        [] => None,
        [only] => Some(FitDecision::FlyTo {
            center: *only,
            zoom: config.single_result_zoom,
            duration_ms: config.results_duration_ms,
        }),
        many => {
            let bounds = GeoBounds::from_points(many.iter().copied())?;
            let (padding_px, max_zoom) = if many.len() <= config.small_set_limit {
                (config.small_set_padding_px, config.small_set_max_zoom)
            } else {
                (config.large_set_padding_px, config.large_set_max_zoom)
            };
            Some(FitDecision::FitBounds {
                bounds,
                padding_px,
                max_zoom,
                duration_ms: config.results_duration_ms,
            })
        }
    }
}

/// Fit the viewport to an active route.
///
/// The bounds cover the user location and every geometry point, so neither
/// endpoint can sit outside the view.
pub fn fit_route(
    user_location: LatLng,
    geometry: &[LatLng],
    config: &FitConfig,
) -> Option<FitDecision> {
    let points = std::iter::once(user_location).chain(geometry.iter().copied());
    let bounds = GeoBounds::from_points(points)?;
    Some(FitDecision::FitBounds {
        bounds,
        padding_px: config.route_padding_px,
        max_zoom: f64::INFINITY,
        duration_ms: config.route_duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::{FitConfig, FitDecision, fit_results, fit_route};
    use geoprim::LatLng;

    fn p(lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng)
    }

    #[test]
    fn empty_set_has_no_fit() {
        assert_eq!(fit_results(&[], &FitConfig::default()), None);
    }

    #[test]
    fn single_result_flies_to_the_point() {
        let fit = fit_results(&[p(16.06, 108.22)], &FitConfig::default()).unwrap();
        match fit {
            FitDecision::FlyTo { center, zoom, .. } => {
                assert_eq!(center, p(16.06, 108.22));
                assert_eq!(zoom, 16.0);
            }
            other => panic!("expected fly-to, got {other:?}"),
        }
    }

    #[test]
    fn small_sets_get_tighter_padding_than_large_ones() {
        let config = FitConfig::default();
        let small: Vec<LatLng> = (0..3).map(|i| p(16.0 + i as f64 * 0.01, 108.2)).collect();
        let large: Vec<LatLng> = (0..4).map(|i| p(16.0 + i as f64 * 0.01, 108.2)).collect();

        let FitDecision::FitBounds {
            padding_px: small_pad,
            max_zoom: small_zoom,
            ..
        } = fit_results(&small, &config).unwrap()
        else {
            panic!("expected bounds fit");
        };
        let FitDecision::FitBounds {
            padding_px: large_pad,
            max_zoom: large_zoom,
            ..
        } = fit_results(&large, &config).unwrap()
        else {
            panic!("expected bounds fit");
        };

        assert!(small_pad < large_pad);
        assert!(small_zoom > large_zoom);
    }

    #[test]
    fn result_bounds_cover_all_points() {
        let fit = fit_results(
            &[p(16.05, 108.24), p(16.07, 108.21)],
            &FitConfig::default(),
        )
        .unwrap();
        let FitDecision::FitBounds { bounds, .. } = fit else {
            panic!("expected bounds fit");
        };
        assert_eq!(bounds.min_lat, 16.05);
        assert_eq!(bounds.max_lat, 16.07);
        assert_eq!(bounds.min_lng, 108.21);
        assert_eq!(bounds.max_lng, 108.24);
    }

    #[test]
    fn route_fit_includes_the_user_location() {
        let config = FitConfig::default();
        let fit = fit_route(p(16.00, 108.20), &[p(16.05, 108.22), p(16.07, 108.24)], &config)
            .unwrap();
        let FitDecision::FitBounds {
            bounds, padding_px, ..
        } = fit
        else {
            panic!("expected bounds fit");
        };
        assert_eq!(bounds.min_lat, 16.00);
        assert_eq!(bounds.min_lng, 108.20);
        assert_eq!(bounds.max_lat, 16.07);
        assert_eq!(padding_px, config.route_padding_px);
    }
}

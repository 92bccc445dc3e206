mod radial;
mod settings;
mod strip;

pub use radial::RadialCut;
pub use settings::{SubdivisionMethod, SubdivisionSettings, MAX_SEGMENTS};
pub use strip::{dominant_axis, EqualAreaCut, StripCut};

use tracing::debug;

use crate::error::Result;
use crate::operations::boolean::{boolean_regions, BooleanOp};
use crate::operations::offset::Setback;
use crate::operations::{OperationKind, OperationResult};
use crate::params::EngineParams;
use crate::shape::{fresh_id, normalize, IdAllocator, Polygon, Region, Shape, ShapeRole};

/// A way of cutting an inset parcel into lots.
///
/// Implementations return the pieces in the order they should be numbered.
/// A band crossing a concave parcel may give several pieces; extra pieces
/// are merged into an adjacent lot afterwards. An empty answer makes the
/// caller fall back to the uncut region.
pub trait CutStrategy {
    fn cut(&self, region: &Region, segments: usize, params: &EngineParams) -> Vec<Polygon>;
}

/// Splits a property into sub-parcels.
///
/// The property is normalized, shrunk by the setback, then cut by the
/// strategy belonging to the settings' method. Every piece becomes a shape
/// with role [`ShapeRole::SubParcel`], a `name` of `Lot <n>` and the
/// property's other metadata.
pub struct SubdivideProperty<'a> {
    property: &'a Shape,
    settings: SubdivisionSettings,
    params: EngineParams,
    custom: Option<&'a dyn CutStrategy>,
}

impl<'a> SubdivideProperty<'a> {
    /// Creates a new subdivision operation.
    #[must_use]
    pub fn new(property: &'a Shape, settings: SubdivisionSettings) -> Self {
        Self {
            property,
            settings,
            params: EngineParams::default(),
            custom: None,
        }
    }

    /// Sets custom engine parameters.
    #[must_use]
    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    /// Strategy used by [`SubdivisionMethod::Custom`] instead of
    /// [`EqualAreaCut`]. Ignored by the other methods.
    #[must_use]
    pub fn with_custom_strategy(mut self, strategy: &'a dyn CutStrategy) -> Self {
        self.custom = Some(strategy);
        self
    }

    /// Executes the subdivision.
    ///
    /// A degenerate property gives an unsuccessful result. A setback that
    /// consumes the whole parcel gives a successful result with no shapes.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, see
    /// [`SubdivisionSettings::validate`].
    pub fn execute<A: IdAllocator + ?Sized>(&self, ids: &mut A) -> Result<OperationResult> {
        self.settings.validate()?;
        let kind = OperationKind::Subdivision(self.settings.method);

        let Some(polygon) = normalize(self.property, &self.params) else {
            debug!(id = %self.property.id, "cannot subdivide degenerate property");
            return Ok(OperationResult::failure(kind, &self.params));
        };

        let inset = Setback::new(&polygon, self.settings.setback_distance)
            .with_params(self.params)
            .execute()?;
        if inset.is_empty() {
            return Ok(OperationResult::completed(kind, Vec::new(), 0.0, &self.params));
        }

        let mut pieces = self
            .strategy()
            .cut(&inset, self.settings.segments, &self.params);
        if pieces.is_empty() {
            debug!(method = %kind, "strategy produced no pieces, keeping uncut region");
            pieces = inset.polygons;
        }
        pieces.retain(|p| p.area() >= self.params.min_area);
        let pieces = absorb_extra_pieces(pieces, self.settings.segments, &self.params);

        let inputs = [self.property];
        let mut total = 0.0;
        let mut shapes = Vec::with_capacity(pieces.len() + 1);
        for (i, piece) in pieces.into_iter().enumerate() {
            let index = i + 1;
            total += piece.area();
            let mut metadata = self.property.metadata.clone();
            metadata.insert("name".to_owned(), format!("Lot {index}"));
            shapes.push(Shape::from_polygon(
                fresh_id(ids, &inputs),
                piece,
                ShapeRole::SubParcel { index },
                metadata,
            ));
        }

        if self.settings.preserve_original {
            shapes.push(Shape::from_polygon(
                fresh_id(ids, &inputs),
                polygon,
                ShapeRole::OriginalParcel,
                self.property.metadata.clone(),
            ));
        }

        Ok(OperationResult::completed(kind, shapes, total, &self.params))
    }

    fn strategy(&self) -> &dyn CutStrategy {
        const PARALLEL: StripCut = StripCut::parallel();
        const PERPENDICULAR: StripCut = StripCut::perpendicular();
        match self.settings.method {
            SubdivisionMethod::Parallel => &PARALLEL,
            SubdivisionMethod::Perpendicular => &PERPENDICULAR,
            SubdivisionMethod::Radial => &RadialCut,
            SubdivisionMethod::Custom => self.custom.unwrap_or(&EqualAreaCut),
        }
    }
}

/// Merges pieces into adjacent lots until at most `limit` remain.
///
/// The smallest piece goes first and joins the smallest piece it shares an
/// edge with. Pieces touching no other piece along an edge stay separate.
fn absorb_extra_pieces(
    mut pieces: Vec<Polygon>,
    limit: usize,
    params: &EngineParams,
) -> Vec<Polygon> {
    while pieces.len() > limit {
        let mut order: Vec<usize> = (0..pieces.len()).collect();
        order.sort_by(|&a, &b| pieces[a].area().total_cmp(&pieces[b].area()));

        let Some((piece, host, merged)) = order
            .iter()
            .find_map(|&i| adjacent_union(&pieces, i, params).map(|(j, m)| (i, j, m)))
        else {
            debug!(pieces = pieces.len(), limit, "no adjacent pieces left to merge");
            break;
        };
        pieces[host] = merged;
        pieces.remove(piece);
    }
    pieces
}

/// Smallest piece sharing an edge with `pieces[i]`, and their union.
fn adjacent_union(pieces: &[Polygon], i: usize, params: &EngineParams) -> Option<(usize, Polygon)> {
    let own = Region::from(pieces[i].clone());
    let mut best: Option<(usize, f64, Polygon)> = None;
    for (j, other) in pieces.iter().enumerate() {
        let area = other.area();
        if j == i || best.as_ref().is_some_and(|(_, a, _)| *a <= area) {
            continue;
        }
        let other_region = Region::from(other.clone());
        let mut union = boolean_regions(&own, &other_region, BooleanOp::Union, params);
        // Pieces meeting at a point only stay two rings.
        if union.polygons.len() == 1 {
            best = union.polygons.pop().map(|p| (j, area, p));
        }
    }
    best.map(|(j, _, p)| (j, p))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::shape::SequentialIds;
    use approx::assert_abs_diff_eq;

    fn parcel() -> Shape {
        Shape::rectangle("parcel", Point2::new(0.0, 0.0), Point2::new(20.0, 10.0))
            .with_meta("owner", "Ada")
    }

    fn run(shape: &Shape, settings: SubdivisionSettings) -> OperationResult {
        SubdivideProperty::new(shape, settings)
            .execute(&mut SequentialIds::new("lot"))
            .unwrap()
    }

    #[test]
    fn parallel_four_lots_with_setback() {
        let settings = SubdivisionSettings::new(SubdivisionMethod::Parallel, 4).with_setback(1.0);
        let result = run(&parcel(), settings);
        assert!(result.success);
        assert_eq!(result.operation.as_str(), "subdivision_parallel");
        assert_eq!(result.shapes.len(), 4);
        assert_eq!(result.total_area, "144.00");
        for (i, shape) in result.shapes.iter().enumerate() {
            assert_eq!(shape.role, ShapeRole::SubParcel { index: i + 1 });
            assert_eq!(shape.metadata["name"], format!("Lot {}", i + 1));
            assert_eq!(shape.metadata["owner"], "Ada");
            let area = Polygon::new(shape.points.clone(), shape.holes.clone()).area();
            assert_abs_diff_eq!(area, 36.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn perpendicular_conserves_area() {
        let shape = Shape::polygon(
            "p",
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(25.0, 3.0),
                Point2::new(22.0, 14.0),
                Point2::new(2.0, 11.0),
            ],
        );
        let area = normalize(&shape, &EngineParams::default()).unwrap().area();
        let result = run(&shape, SubdivisionSettings::new(SubdivisionMethod::Perpendicular, 3));
        assert_eq!(result.shapes.len(), 3);
        assert_abs_diff_eq!(result.total_area_value(), area, epsilon = 0.01);
    }

    #[test]
    fn radial_lots() {
        let shape = Shape::rectangle("sq", Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
        let result = run(&shape, SubdivisionSettings::new(SubdivisionMethod::Radial, 4));
        assert_eq!(result.operation.as_str(), "subdivision_radial");
        assert_eq!(result.shapes.len(), 4);
        assert_eq!(result.total_area, "100.00");
    }

    #[test]
    fn custom_defaults_to_equal_area() {
        let shape = Shape::polygon(
            "t",
            vec![Point2::new(0.0, 0.0), Point2::new(30.0, 0.0), Point2::new(0.0, 10.0)],
        );
        let result = run(&shape, SubdivisionSettings::new(SubdivisionMethod::Custom, 3));
        assert_eq!(result.shapes.len(), 3);
        for lot in &result.shapes {
            let area = Polygon::new(lot.points.clone(), Vec::new()).area();
            assert_abs_diff_eq!(area, 50.0, epsilon = 1e-6);
        }
    }

    struct Halves;

    impl CutStrategy for Halves {
        fn cut(&self, region: &Region, _segments: usize, params: &EngineParams) -> Vec<Polygon> {
            StripCut::perpendicular().cut(region, 2, params)
        }
    }

    struct Nothing;

    impl CutStrategy for Nothing {
        fn cut(&self, _region: &Region, _segments: usize, _params: &EngineParams) -> Vec<Polygon> {
            Vec::new()
        }
    }

    #[test]
    fn custom_strategy_is_used() {
        let settings = SubdivisionSettings::new(SubdivisionMethod::Custom, 7);
        let result = SubdivideProperty::new(&parcel(), settings)
            .with_custom_strategy(&Halves)
            .execute(&mut SequentialIds::default())
            .unwrap();
        assert_eq!(result.shapes.len(), 2);
        assert_eq!(result.operation.as_str(), "subdivision_custom");
    }

    #[test]
    fn empty_strategy_falls_back_to_region() {
        let settings = SubdivisionSettings::new(SubdivisionMethod::Custom, 3);
        let result = SubdivideProperty::new(&parcel(), settings)
            .with_custom_strategy(&Nothing)
            .execute(&mut SequentialIds::default())
            .unwrap();
        assert_eq!(result.shapes.len(), 1);
        assert_eq!(result.total_area, "200.00");
    }

    #[test]
    fn preserve_original_appends_parent() {
        let settings = SubdivisionSettings::new(SubdivisionMethod::Parallel, 2)
            .with_setback(1.0)
            .preserving_original();
        let result = run(&parcel(), settings);
        assert_eq!(result.shapes.len(), 3);
        let original = result.shapes.last().unwrap();
        assert_eq!(original.role, ShapeRole::OriginalParcel);
        assert_eq!(original.points.len(), 4);
        assert!(!original.metadata.contains_key("name"));
        assert_eq!(result.total_area, "144.00");
    }

    #[test]
    fn exhausted_setback_is_empty_success() {
        let settings = SubdivisionSettings::new(SubdivisionMethod::Parallel, 2)
            .with_setback(6.0)
            .preserving_original();
        let result = run(&parcel(), settings);
        assert!(result.success);
        assert!(result.shapes.is_empty());
        assert_eq!(result.total_area, "0.00");
    }

    #[test]
    fn degenerate_property_fails() {
        let flat = Shape::rectangle("flat", Point2::new(0.0, 0.0), Point2::new(5.0, 0.0));
        let result = run(&flat, SubdivisionSettings::new(SubdivisionMethod::Radial, 3));
        assert!(!result.success);
        assert!(result.shapes.is_empty());
    }

    #[test]
    fn invalid_settings_are_errors() {
        let mut ids = SequentialIds::default();
        let zero = SubdivisionSettings::new(SubdivisionMethod::Parallel, 0);
        assert!(SubdivideProperty::new(&parcel(), zero).execute(&mut ids).is_err());
        let negative = SubdivisionSettings::new(SubdivisionMethod::Parallel, 2).with_setback(-0.5);
        assert!(SubdivideProperty::new(&parcel(), negative).execute(&mut ids).is_err());
        let huge = SubdivisionSettings::new(SubdivisionMethod::Custom, usize::MAX);
        assert!(SubdivideProperty::new(&parcel(), huge).execute(&mut ids).is_err());
    }

    fn u_parcel() -> Shape {
        Shape::polygon(
            "u",
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(20.0, 0.0),
                Point2::new(20.0, 10.0),
                Point2::new(14.0, 10.0),
                Point2::new(14.0, 3.0),
                Point2::new(6.0, 3.0),
                Point2::new(6.0, 10.0),
                Point2::new(0.0, 10.0),
            ],
        )
    }

    fn lot_area(shape: &Shape) -> f64 {
        Polygon::new(shape.points.clone(), shape.holes.clone()).area()
    }

    #[test]
    fn concave_parcel_keeps_lot_count() {
        for method in [
            SubdivisionMethod::Parallel,
            SubdivisionMethod::Perpendicular,
            SubdivisionMethod::Radial,
            SubdivisionMethod::Custom,
        ] {
            let result = run(&u_parcel(), SubdivisionSettings::new(method, 2));
            assert!(result.success);
            assert_eq!(result.shapes.len(), 2, "{method:?}");
            assert_eq!(result.total_area, "144.00", "{method:?}");
            for (i, shape) in result.shapes.iter().enumerate() {
                assert_eq!(shape.role, ShapeRole::SubParcel { index: i + 1 });
            }
        }
    }

    #[test]
    fn split_band_joins_adjacent_lot() {
        // The upper band holds both arms; one arm joins the base.
        let result = run(&u_parcel(), SubdivisionSettings::new(SubdivisionMethod::Parallel, 2));
        let mut areas: Vec<f64> = result.shapes.iter().map(lot_area).collect();
        areas.sort_by(f64::total_cmp);
        assert_abs_diff_eq!(areas[0], 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(areas[1], 114.0, epsilon = 1e-6);
    }

    #[test]
    fn disjoint_pieces_are_not_merged() {
        let params = EngineParams::default();
        let square = |x0: f64| {
            Polygon::from_ring(vec![
                Point2::new(x0, 0.0),
                Point2::new(x0 + 1.0, 0.0),
                Point2::new(x0 + 1.0, 1.0),
                Point2::new(x0, 1.0),
            ])
        };
        let pieces = absorb_extra_pieces(vec![square(0.0), square(3.0), square(1.0)], 2, &params);
        assert_eq!(pieces.len(), 2);
        assert_abs_diff_eq!(pieces[0].area(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[1].area(), 2.0, epsilon = 1e-9);

        let apart = vec![square(0.0), square(3.0), square(6.0)];
        assert_eq!(absorb_extra_pieces(apart, 1, &params).len(), 3);
    }

    #[test]
    fn ids_are_fresh_and_ordered() {
        let result = run(&parcel(), SubdivisionSettings::new(SubdivisionMethod::Parallel, 3));
        let ids: Vec<&str> = result.shapes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["lot-0", "lot-1", "lot-2"]);
    }

    #[test]
    fn deterministic_output() {
        let settings = SubdivisionSettings::new(SubdivisionMethod::Radial, 5).with_setback(0.5);
        let first = run(&parcel(), settings);
        let second = run(&parcel(), settings);
        assert_eq!(first.shapes, second.shapes);
    }
}

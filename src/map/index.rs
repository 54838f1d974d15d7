use ahash::AHashMap;
use geo::{BoundingRect, Intersects, MultiPolygon, Point, Rect};
use rstar::{RTree, RTreeObject, AABB};

use crate::data::FeatureKey;

/// A region's bounding box in an R-tree.
#[derive(Debug, Clone)]
struct BoundingBox {
    key: FeatureKey,
    bbox: Rect<f64>,
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

/// Spatial index over the regions currently drawn, for hit-testing by coordinate.
#[derive(Debug, Default)]
pub(crate) struct RegionIndex {
    rtree: RTree<BoundingBox>,
    /// Draw position per region; higher is on top.
    stacking: AHashMap<FeatureKey, usize>,
    top: usize,
}

impl RegionIndex {
    /// Index the given shapes; later entries are drawn on top of earlier ones.
    pub(crate) fn new<'a>(shapes: impl IntoIterator<Item = (FeatureKey, &'a MultiPolygon<f64>)>) -> Self {
        let mut stacking = AHashMap::new();
        let boxes: Vec<BoundingBox> = shapes.into_iter()
            .filter_map(|(key, geometry)| {
                stacking.insert(key, stacking.len());
                geometry.bounding_rect().map(|bbox| BoundingBox { key, bbox })
            })
            .collect();
        let top = stacking.len();
        Self { rtree: RTree::bulk_load(boxes), stacking, top }
    }

    /// Move `key` above every other indexed region. Unknown keys are ignored.
    pub(crate) fn raise(&mut self, key: FeatureKey) {
        if let Some(order) = self.stacking.get_mut(&key) {
            self.top += 1;
            *order = self.top;
        }
    }

    /// Topmost region whose geometry contains `point` (lon, lat).
    pub(crate) fn pick<'a>(&self, point: Point<f64>, geometry: impl Fn(FeatureKey) -> Option<&'a MultiPolygon<f64>>) -> Option<FeatureKey> {
        self.rtree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x(), point.y()]))
            .filter(|candidate| geometry(candidate.key).is_some_and(|g| g.intersects(&point)))
            .max_by_key(|candidate| self.stacking.get(&candidate.key).copied().unwrap_or(0))
            .map(|candidate| candidate.key)
    }
}

/// Union of bounding rectangles, or `None` for empty input.
pub(crate) fn union_bounds<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Option<Rect<f64>> {
    shapes.into_iter()
        .filter_map(|shape| shape.bounding_rect())
        .reduce(|a, b| Rect::new(
            geo::Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
            geo::Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
        ))
}

/// Bounds usable for fitting the viewport: finite and not a single point.
pub(crate) fn usable_bounds(bounds: Option<Rect<f64>>) -> Option<Rect<f64>> {
    bounds.filter(|b| {
        let finite = [b.min().x, b.min().y, b.max().x, b.max().y].iter().all(|v| v.is_finite());
        finite && (b.width() > 0.0 || b.height() > 0.0)
    })
}

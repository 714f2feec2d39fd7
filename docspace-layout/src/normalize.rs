//! Centroid-relative coordinate normalization

use docspace_core::{Centroid, DocumentRecord, NormalizedPosition, Point3f};

/// Compute the centroid of a complete dataset
///
/// The mean is accumulated in double precision so large datasets do not
/// drift. An empty dataset has its centroid at the origin.
///
/// # Example
/// ```rust
/// use docspace_core::{Centroid, DocumentRecord};
/// use docspace_layout::compute_centroid;
///
/// let records = vec![
///     DocumentRecord::new(1, "a", 10.0, 0.0, 0.0),
///     DocumentRecord::new(2, "b", -10.0, 0.0, 0.0),
/// ];
/// assert_eq!(compute_centroid(&records), Centroid::origin());
/// ```
pub fn compute_centroid(records: &[DocumentRecord]) -> Centroid {
    if records.is_empty() {
        return Centroid::origin();
    }

    let (mut sx, mut sy, mut sz) = (0.0f64, 0.0f64, 0.0f64);
    for record in records {
        sx += record.x as f64;
        sy += record.y as f64;
        sz += record.z as f64;
    }
    let n = records.len() as f64;
    Centroid::new((sx / n) as f32, (sy / n) as f32, (sz / n) as f32)
}

/// Map a raw coordinate into render space
///
/// Computes `(raw - centroid) * scale_factor`. Total and pure: the same
/// inputs always produce the same position.
///
/// # Arguments
/// * `raw` - Raw embedding coordinate
/// * `centroid` - Centroid of the complete dataset
/// * `scale_factor` - Per-dataset scale constant
///
/// # Returns
/// * `NormalizedPosition` - Position relative to the centroid
pub fn normalize(raw: &Point3f, centroid: &Centroid, scale_factor: f32) -> NormalizedPosition {
    NormalizedPosition::new(
        (raw.x - centroid.x) * scale_factor,
        (raw.y - centroid.y) * scale_factor,
        (raw.z - centroid.z) * scale_factor,
    )
}

/// The two per-dataset constants needed to place every record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub centroid: Centroid,
    pub scale_factor: f32,
}

impl Layout {
    pub fn new(centroid: Centroid, scale_factor: f32) -> Self {
        Self { centroid, scale_factor }
    }

    /// Build the layout for a complete dataset
    pub fn for_records(records: &[DocumentRecord], scale_factor: f32) -> Self {
        Self::new(compute_centroid(records), scale_factor)
    }

    /// Render-space position of a record
    pub fn place(&self, record: &DocumentRecord) -> NormalizedPosition {
        normalize(&record.raw_position(), &self.centroid, self.scale_factor)
    }
}

/// Derive a scale factor that fits a dataset into a target extent
///
/// The largest centroid-relative coordinate magnitude is mapped onto
/// `target_extent`, so datasets with different spreads occupy a comparable
/// visual volume. Returns `1.0` for datasets with no spread.
///
/// # Arguments
/// * `records` - Complete dataset
/// * `centroid` - Centroid of `records`
/// * `target_extent` - Desired half-width of the rendered cloud
///
/// # Example
/// ```rust
/// use docspace_core::{Centroid, DocumentRecord};
/// use docspace_layout::fit_scale_factor;
///
/// let records = vec![
///     DocumentRecord::new(1, "a", 2.0, 0.0, 0.0),
///     DocumentRecord::new(2, "b", -2.0, 1.0, 0.0),
/// ];
/// let scale = fit_scale_factor(&records, &Centroid::new(0.0, 0.5, 0.0), 30000.0);
/// assert_eq!(scale, 15000.0);
/// ```
pub fn fit_scale_factor(records: &[DocumentRecord], centroid: &Centroid, target_extent: f32) -> f32 {
    let max_extent = records
        .iter()
        .filter(|record| record.is_finite())
        .map(|record| {
            let p = normalize(&record.raw_position(), centroid, 1.0);
            p.x.abs().max(p.y.abs()).max(p.z.abs())
        })
        .fold(0.0f32, f32::max);

    if max_extent > 0.0 && target_extent.is_finite() && target_extent > 0.0 {
        target_extent / max_extent
    } else {
        1.0
    }
}

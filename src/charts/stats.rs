use serde::Serialize;

/// Five-number summary of one box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

/// Quantile of sorted data, linear interpolation between closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// `None` for an empty sample.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
        count: sorted.len(),
    })
}

/// Equal-width 2-D histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram2d {
    /// `bins + 1` edges along x (empty when there is no data).
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    /// `counts[y][x]`
    pub counts: Vec<Vec<u64>>,
}

fn edges(values: impl Iterator<Item = f64>, bins: usize) -> Vec<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    // a single distinct value still gets a unit-wide range
    let max = if max > min { max } else { min + 1.0 };
    let width = (max - min) / bins as f64;
    (0..=bins).map(|i| min + width * i as f64).collect()
}

fn bin_of(v: f64, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let width = (edges[bins] - edges[0]) / bins as f64;
    (((v - edges[0]) / width).floor() as usize).min(bins - 1)
}

pub fn histogram2d(points: &[(f64, f64)], bins: usize) -> Histogram2d {
    if points.is_empty() || bins == 0 {
        return Histogram2d {
            x_edges: Vec::new(),
            y_edges: Vec::new(),
            counts: Vec::new(),
        };
    }

    let x_edges = edges(points.iter().map(|p| p.0), bins);
    let y_edges = edges(points.iter().map(|p| p.1), bins);

    let mut counts = vec![vec![0u64; bins]; bins];
    for (x, y) in points {
        counts[bin_of(*y, &y_edges)][bin_of(*x, &x_edges)] += 1;
    }

    Histogram2d {
        x_edges,
        y_edges,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_interpolate() {
        let s = box_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.count, 4);
    }

    #[test]
    fn single_value_box() {
        let s = box_stats(&[7.0]).unwrap();
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (7.0, 7.0, 7.0, 7.0, 7.0));
        assert!(box_stats(&[]).is_none());
    }

    #[test]
    fn histogram_counts_every_point() {
        let points = [(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (5.0, 5.0)];
        let h = histogram2d(&points, 2);

        assert_eq!(h.x_edges, vec![0.0, 5.0, 10.0]);
        assert_eq!(h.y_edges, vec![0.0, 5.0, 10.0]);
        // max values land in the last bin
        assert_eq!(h.counts, vec![vec![1, 1], vec![0, 2]]);
        let total: u64 = h.counts.iter().flatten().sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn degenerate_histograms() {
        let h = histogram2d(&[(3.0, 3.0), (3.0, 3.0)], 4);
        assert_eq!(h.x_edges.first(), Some(&3.0));
        assert_eq!(h.x_edges.last(), Some(&4.0));
        assert_eq!(h.counts[0][0], 2);

        assert!(histogram2d(&[], 10).counts.is_empty());
    }
}

use tracing::{
    debug,
    trace
};

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};
use crate::math::curve::staircase::blendfunction::BlendFunction;
use crate::math::curve::staircase::staircaseerror::StaircaseError;
use crate::math::curve::staircase::zone::Zone;

// ─────────────────────────────────────────────────────────────────────────────
// Staircase - 平滑過渡的階梯函數
// ─────────────────────────────────────────────────────────────────────────────
//
// n 個區段自 0 起首尾相接，區段 i 長度 l[i]、高度 h[i]。
// 每個區段兩端各保留 t·l[i] 作為過渡區，與相鄰區段共同組成一個混合區：
//
//   區段 k-1 的尾端 t·l[k-1]  +  區段 k 的前端 t·l[k]
//
// 查詢點 x 先以累積長度 c[i] = Σ_{j≤i} l[j] 做二分搜尋，找出第一個 c[k] ≥ x，
// 即 x ∈ (c[k-1], c[k]]；再以 z = (x - c[k-1]) / l[k] 判斷落在哪一個區：
//
//   k > 0     且 z ≤ t      → 與前一區段的過渡區
//   k < n - 1 且 z ≥ 1 - t  → 與下一區段的過渡區
//   其他                    → 平台區，回傳 h[k]
//
// 定義域外：x < 0 回傳 h[0]，x > c[n-1] 回傳 h[n-1]。

#[derive(Debug, Clone)]
pub struct Staircase {
    lengths: Vec<f64>,
    heights: Vec<f64>,
    /// cumulative[i] = lengths[0] + ... + lengths[i]
    cumulative: Vec<f64>,
    transition: f64,
    blend: BlendFunction,
}

impl Staircase {
    /// 建構階梯函數。
    ///
    /// * `lengths` - 各區段長度，需為有限正數
    /// * `heights` - 各區段高度，長度需與 `lengths` 相同
    /// * `transition` - 每個區段單側用於過渡的比例，範圍 (0, 0.5]
    /// * `blend` - 過渡區的混合函數
    pub fn new(
        lengths: Vec<f64>,
        heights: Vec<f64>,
        transition: f64,
        blend: BlendFunction,
    ) -> Result<Staircase, StaircaseError> {
        validate_transition(transition)?;
        blend.validate()?;
        validate_geometry(&lengths, &heights)?;

        let staircase = Self::from_validated(lengths, heights, transition, blend);
        debug!(
            segments = staircase.segment_count(),
            total_length = staircase.total_length(),
            transition,
            ?blend,
            "staircase constructed"
        );
        Ok(staircase)
    }

    pub fn hermite(
        lengths: Vec<f64>,
        heights: Vec<f64>,
        transition: f64,
    ) -> Result<Staircase, StaircaseError> {
        Self::new(lengths, heights, transition, BlendFunction::Hermite)
    }

    pub fn logistic(
        lengths: Vec<f64>,
        heights: Vec<f64>,
        transition: f64,
        steepness: f64,
    ) -> Result<Staircase, StaircaseError> {
        Self::new(lengths, heights, transition, BlendFunction::Logistic { steepness })
    }

    fn from_validated(
        lengths: Vec<f64>,
        heights: Vec<f64>,
        transition: f64,
        blend: BlendFunction,
    ) -> Staircase {
        let cumulative = lengths
            .iter()
            .scan(0.0, |total, &length| {
                *total += length;
                Some(*total)
            })
            .collect();

        Staircase {
            lengths,
            heights,
            cumulative,
            transition,
            blend,
        }
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn transition(&self) -> f64 {
        self.transition
    }

    pub fn blend(&self) -> BlendFunction {
        self.blend
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// 左右鏡射：區段順序反轉，過渡比例與混合函數不變。
    ///
    /// 對任意 x，`reversed().value(total_length() - x)` 與 `value(x)` 相等（至浮點誤差）。
    pub fn reversed(&self) -> Staircase {
        let lengths = self.lengths.iter().rev().copied().collect();
        let heights = self.heights.iter().rev().copied().collect();
        Self::from_validated(lengths, heights, self.transition, self.blend)
    }

    /// 判斷查詢點所在的區；NaN 回傳錯誤。
    pub fn locate(&self, point: f64) -> Result<Zone, StaircaseError> {
        if point.is_nan() {
            trace!("rejected NaN query point");
            return Err(StaircaseError::NotANumber);
        }
        Ok(self.classify(point))
    }

    /// 帶檢查的求值；NaN 回傳 `StaircaseError::NotANumber`，±∞ 視為定義域外。
    pub fn evaluate(&self, point: f64) -> Result<f64, StaircaseError> {
        self.locate(point).map(|zone| self.value_in(zone))
    }

    pub fn values(&self, points: &[f64]) -> Vec<f64> {
        points.iter().map(|&x| self.value(x)).collect()
    }

    fn classify(&self, point: f64) -> Zone {
        let n = self.lengths.len();
        if point < 0.0 {
            return Zone::Before;
        }
        if point > self.total_length() {
            return Zone::After;
        }

        // 第一個 cumulative[k] ≥ point；point ≤ total_length 保證 k < n
        let k = self.cumulative.partition_point(|&c| c < point);
        let local = if k == 0 {
            point
        } else {
            point - self.cumulative[k - 1]
        };

        let l = &self.lengths;
        let t = self.transition;
        let z = local / l[k];

        if k > 0 && z <= t {
            Zone::Leading {
                segment: k,
                position: (t * l[k - 1] + local) / (t * l[k - 1] + t * l[k]),
            }
        } else if k < n - 1 && z >= 1.0 - t {
            Zone::Trailing {
                segment: k,
                position: (local - (1.0 - t) * l[k]) / (t * l[k] + t * l[k + 1]),
            }
        } else {
            Zone::Plateau { segment: k }
        }
    }

    fn value_in(&self, zone: Zone) -> f64 {
        let h = &self.heights;
        match zone {
            Zone::Before => h[0],
            Zone::After => h[h.len() - 1],
            Zone::Plateau { segment } => h[segment],
            Zone::Leading { segment, position } => self.blend.blend(
                position,
                h[segment - 1],
                h[segment],
                self.offset(segment - 1),
            ),
            Zone::Trailing { segment, position } => self.blend.blend(
                position,
                h[segment],
                h[segment + 1],
                self.offset(segment),
            ),
        }
    }

    /// 左側區段 `left` 佔過渡區的比例映射到 [-1, 1]，即 Logistic 的反曲點。
    fn offset(&self, left: usize) -> f64 {
        let lhs = self.lengths[left];
        let rhs = self.lengths[left + 1];
        2.0 * lhs / (lhs + rhs) - 1.0
    }
}

fn validate_transition(transition: f64) -> Result<(), StaircaseError> {
    if transition > 0.0 && transition <= 0.5 {
        Ok(())
    } else {
        Err(StaircaseError::invalid_parameter(
            "transition",
            format!("must be in (0, 0.5], got {}", transition),
        ))
    }
}

fn validate_geometry(lengths: &[f64], heights: &[f64]) -> Result<(), StaircaseError> {
    if lengths.is_empty() {
        return Err(StaircaseError::invalid_parameter(
            "lengths",
            "at least one segment is required",
        ));
    }
    if heights.len() != lengths.len() {
        return Err(StaircaseError::invalid_parameter(
            "heights",
            format!(
                "expected {} heights to match lengths, got {}",
                lengths.len(),
                heights.len()
            ),
        ));
    }
    if let Some((i, length)) = lengths
        .iter()
        .enumerate()
        .find(|(_, l)| !(l.is_finite() && **l > 0.0))
    {
        return Err(StaircaseError::invalid_parameter(
            "lengths",
            format!("segment {} has length {}, expected a finite positive number", i, length),
        ));
    }
    if let Some((i, height)) = heights.iter().enumerate().find(|(_, h)| !h.is_finite()) {
        return Err(StaircaseError::invalid_parameter(
            "heights",
            format!("segment {} has non-finite height {}", i, height),
        ));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Trait 實作
// ─────────────────────────────────────────────────────────────────────────────

impl Curve for Staircase {
    /// NaN 輸入回傳 NaN；其餘輸入恆有定義。
    fn value(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        self.value_in(self.classify(x))
    }
}

impl NonparametricCurve for Staircase {
    /// 每個區段的右端點與其平台高度
    fn points(&self) -> Vec<Point2D> {
        self.cumulative
            .iter()
            .zip(self.heights.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    fn min_x(&self) -> f64 {
        0.0
    }

    fn max_x(&self) -> f64 {
        self.total_length()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    const EPSILON: f64 = 1e-14;

    fn fixture() -> Staircase {
        Staircase::hermite(vec![0.2, 0.3, 0.5], vec![1.0, -2.0, 3.0], 0.4).unwrap()
    }

    #[test]
    fn cumulative_is_running_sum() {
        let staircase = fixture();
        assert_eq!(staircase.cumulative(), &[0.2, 0.5, 1.0]);
        assert_eq!(staircase.total_length(), 1.0);
        assert_eq!(staircase.segment_count(), 3);
    }

    #[test]
    fn rejects_out_of_range_transition() {
        for &t in &[0.0, -0.1, 0.5 + 1e-12, 1.0, f64::NAN] {
            let error = Staircase::hermite(vec![1.0], vec![1.0], t).unwrap_err();
            assert_eq!(error.field(), Some("transition"), "t = {}", t);
        }
        assert!(Staircase::hermite(vec![1.0], vec![1.0], 0.5).is_ok());
        assert!(Staircase::hermite(vec![1.0], vec![1.0], 1e-9).is_ok());
    }

    #[test]
    fn rejects_non_positive_steepness() {
        let error = Staircase::logistic(vec![1.0, 1.0], vec![0.0, 1.0], 0.3, 0.0).unwrap_err();
        assert_eq!(error.field(), Some("steepness"));
        let error = Staircase::logistic(vec![1.0, 1.0], vec![0.0, 1.0], 0.3, -2.0).unwrap_err();
        assert_eq!(error.field(), Some("steepness"));
        assert!(Staircase::logistic(vec![1.0, 1.0], vec![0.0, 1.0], 0.3, 1e-6).is_ok());
    }

    #[test]
    fn rejects_bad_geometry() {
        let error = Staircase::hermite(vec![], vec![], 0.2).unwrap_err();
        assert_eq!(error.field(), Some("lengths"));
        let error = Staircase::hermite(vec![1.0, 2.0], vec![1.0], 0.2).unwrap_err();
        assert_eq!(error.field(), Some("heights"));
        let error = Staircase::hermite(vec![1.0, 0.0], vec![1.0, 2.0], 0.2).unwrap_err();
        assert_eq!(error.field(), Some("lengths"));
        let error = Staircase::hermite(vec![1.0, f64::INFINITY], vec![1.0, 2.0], 0.2).unwrap_err();
        assert_eq!(error.field(), Some("lengths"));
        let error = Staircase::hermite(vec![1.0, 1.0], vec![1.0, f64::NAN], 0.2).unwrap_err();
        assert_eq!(error.field(), Some("heights"));
    }

    #[test]
    fn clamps_outside_domain() {
        let staircase = fixture();
        assert_eq!(staircase.value(-1.0), 1.0);
        assert_eq!(staircase.value(0.0), 1.0);
        assert_eq!(staircase.value(1.0), 3.0);
        assert_eq!(staircase.value(7.5), 3.0);
        assert_eq!(staircase.value(f64::NEG_INFINITY), 1.0);
        assert_eq!(staircase.value(f64::INFINITY), 3.0);
    }

    #[test]
    fn nan_is_rejected_or_propagated() {
        let staircase = fixture();
        assert!(staircase.value(f64::NAN).is_nan());
        assert!(matches!(staircase.evaluate(f64::NAN), Err(StaircaseError::NotANumber)));
        assert!(matches!(staircase.locate(f64::NAN), Err(StaircaseError::NotANumber)));
    }

    #[test]
    fn locates_zones() {
        let staircase = fixture();
        assert_eq!(staircase.locate(-0.1).unwrap(), Zone::Before);
        assert_eq!(staircase.locate(1.1).unwrap(), Zone::After);
        assert_eq!(staircase.locate(0.05).unwrap(), Zone::Plateau { segment: 0 });
        assert_eq!(staircase.locate(0.35).unwrap(), Zone::Plateau { segment: 1 });
        assert_eq!(staircase.locate(0.9).unwrap(), Zone::Plateau { segment: 2 });

        match staircase.locate(0.22).unwrap() {
            Zone::Leading { segment, position } => {
                assert_eq!(segment, 1);
                assert!((position - 0.5).abs() < EPSILON);
            }
            zone => panic!("unexpected zone {:?}", zone),
        }
        match staircase.locate(0.5).unwrap() {
            Zone::Trailing { segment, position } => {
                assert_eq!(segment, 1);
                assert!((position - 0.375).abs() < EPSILON);
            }
            zone => panic!("unexpected zone {:?}", zone),
        }
    }

    #[test]
    fn segment_boundary_belongs_to_left_segment() {
        let staircase = Staircase::hermite(vec![1.0, 1.0], vec![0.0, 1.0], 0.25).unwrap();
        match staircase.locate(1.0).unwrap() {
            Zone::Trailing { segment, position } => {
                assert_eq!(segment, 0);
                assert!((position - 0.5).abs() < EPSILON);
            }
            zone => panic!("unexpected zone {:?}", zone),
        }
        assert!((staircase.value(1.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn hermite_fixture_values() {
        let staircase = fixture();
        assert!((staircase.value(0.22) + 0.5).abs() < EPSILON);
        assert!((staircase.value(0.5) + 0.41796875).abs() < EPSILON);
        assert_eq!(staircase.value(0.1), 1.0);
        assert_eq!(staircase.value(0.34), -2.0);
    }

    #[test]
    fn single_segment_is_flat() {
        let staircase = Staircase::hermite(vec![2.0], vec![4.0], 0.5).unwrap();
        for &x in &[-1.0, 0.0, 0.3, 1.0, 1.9, 2.0, 3.0] {
            assert_eq!(staircase.value(x), 4.0);
        }
    }

    #[test]
    fn logistic_is_centered_on_boundary() {
        let staircase = Staircase::logistic(vec![1.0, 3.0], vec![0.0, 2.0], 0.5, 6.0).unwrap();
        // 過渡區為 [0.5, 2.5]，反曲點位於區段交界 x = 1
        assert!((staircase.value(1.0) - 1.0).abs() < 1e-12);
        assert!(staircase.value(0.75) < 1.0);
        assert!(staircase.value(1.25) > 1.0);
    }

    #[test]
    fn reversed_mirrors_values() {
        let staircase = fixture();
        let mirror = staircase.reversed();
        assert_eq!(mirror.lengths(), &[0.5, 0.3, 0.2]);
        assert_eq!(mirror.heights(), &[3.0, -2.0, 1.0]);
        for i in 0..=100 {
            let x = i as f64 / 100.0;
            assert!((staircase.value(x) - mirror.value(1.0 - x)).abs() < 1e-12, "x = {}", x);
        }
    }

    #[test]
    fn exposes_nodes() {
        let staircase = fixture();
        let points = staircase.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], Point2D::new(0.5, -2.0));
        assert_eq!(staircase.min_x(), 0.0);
        assert_eq!(staircase.max_x(), 1.0);
    }

    #[test]
    fn values_loops_over_points() {
        let staircase = fixture();
        let xs = [0.0, 0.22, 0.35, 1.0];
        let ys = staircase.values(&xs);
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_eq!(*y, staircase.value(*x));
        }
    }

    #[test]
    fn shared_across_threads() {
        let staircase = Arc::new(fixture());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let staircase = Arc::clone(&staircase);
                thread::spawn(move || staircase.value(0.25 * i as f64))
            })
            .collect();
        let results: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, fixture().values(&[0.0, 0.25, 0.5, 0.75]));
    }
}

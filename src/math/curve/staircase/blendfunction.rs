use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::staircase::staircaseerror::StaircaseError;

// ─────────────────────────────────────────────
// 過渡區的混合函數
// ─────────────────────────────────────────────
//
// 兩種策略皆在兩個平台高度 a、b 之間做單調插值：
//
//   Hermite：  H(u) = (2u³ - 3u² + 1)·a + (-2u³ + 3u²)·b,   u ∈ [0, 1]
//              H(0) = a、H(1) = b，且兩端斜率為 0（C¹ 接上平台）
//
//   Logistic： L(x) = (a·e^{o·s} + b·e^{s·x}) / (e^{o·s} + e^{s·x}),   x ∈ [-1, 1]
//              反曲點位於 x = o（兩側區段長度比例），s 控制陡峭度
//              端點只近似 a、b，s 越大越接近

/// 三次 Hermite 混合：u = 0 時為 `a`，u = 1 時為 `b`，兩端導數為 0。
#[inline]
pub fn hermite(u: f64, a: f64, b: f64) -> f64 {
    let u2 = u * u;
    let u3 = u * u2;
    (2.0 * u3 - 3.0 * u2 + 1.0) * a + (-2.0 * u3 + 3.0 * u2) * b
}

/// Logistic 混合。
///
/// 數學上等於 `(a·exp(offset·s) + b·exp(s·x)) / (exp(offset·s) + exp(s·x))`，
/// 實作改寫為 `a + (b - a)·σ(s·(x - offset))`，避免 s 很大時 `exp` 溢位。
#[inline]
pub fn logistic(x: f64, a: f64, b: f64, offset: f64, steepness: f64) -> f64 {
    let w = sigmoid(steepness * (x - offset));
    a * (1.0 - w) + b * w
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let exp_x = x.exp();
        exp_x / (1.0 + exp_x)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlendFunction {
    /// C¹ 連續，過渡區兩端斜率為 0
    Hermite,
    /// 只有 C⁰ 近似；steepness 必須為有限正數
    Logistic { steepness: f64 },
}

impl Default for BlendFunction {
    fn default() -> Self {
        BlendFunction::Hermite
    }
}

impl BlendFunction {
    pub fn validate(&self) -> Result<(), StaircaseError> {
        match *self {
            BlendFunction::Hermite => Ok(()),
            BlendFunction::Logistic { steepness } => {
                if steepness.is_finite() && steepness > 0.0 {
                    Ok(())
                } else {
                    Err(StaircaseError::invalid_parameter(
                        "steepness",
                        format!("must be finite and strictly positive, got {}", steepness),
                    ))
                }
            }
        }
    }

    pub fn steepness(&self) -> Option<f64> {
        match *self {
            BlendFunction::Hermite => None,
            BlendFunction::Logistic { steepness } => Some(steepness),
        }
    }

    /// 在過渡區內混合。
    ///
    /// `u` 為過渡區內的正規化位置（0 為左端、1 為右端），
    /// `offset` 為左側區段佔整個過渡區的比例映射到 [-1, 1]，僅 Logistic 使用。
    pub fn blend(&self, u: f64, a: f64, b: f64, offset: f64) -> f64 {
        match *self {
            BlendFunction::Hermite => hermite(u, a, b),
            BlendFunction::Logistic { steepness } => {
                logistic(2.0 * u - 1.0, a, b, offset, steepness)
            }
        }
    }
}

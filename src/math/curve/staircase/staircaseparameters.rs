use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::staircase::blendfunction::BlendFunction;
use crate::math::curve::staircase::staircase::Staircase;
use crate::math::curve::staircase::staircaseerror::StaircaseError;

/// 階梯函數的建構參數，可由 JSON 讀入。
///
/// ```json
/// {
///     "lengths": [0.2, 0.3, 0.5],
///     "heights": [1.0, -2.0, 3.0],
///     "transition": 0.4,
///     "blend": { "Logistic": { "steepness": 8.0 } }
/// }
/// ```
///
/// `blend` 可省略，預設為 `"Hermite"`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaircaseParameters {
    lengths: Vec<f64>,
    heights: Vec<f64>,
    transition: f64,
    #[serde(default)]
    blend: BlendFunction
}

impl StaircaseParameters {
    pub fn new(
        lengths: Vec<f64>,
        heights: Vec<f64>,
        transition: f64,
        blend: BlendFunction
    ) -> StaircaseParameters {
        StaircaseParameters { lengths, heights, transition, blend }
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<StaircaseParameters, StaircaseError> {
        Ok(serde_json::from_value(json_value)?)
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn transition(&self) -> f64 {
        self.transition
    }

    pub fn blend(&self) -> BlendFunction {
        self.blend
    }

    /// 參數檢查延到此處，與 `Staircase::new` 一致
    pub fn build(&self) -> Result<Staircase, StaircaseError> {
        Staircase::new(
            self.lengths.clone(),
            self.heights.clone(),
            self.transition,
            self.blend
        )
    }
}

impl From<&Staircase> for StaircaseParameters {
    fn from(staircase: &Staircase) -> Self {
        StaircaseParameters::new(
            staircase.lengths().to_vec(),
            staircase.heights().to_vec(),
            staircase.transition(),
            staircase.blend()
        )
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StaircaseError {
    #[error("invalid parameter '{field}': {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: String
    },
    #[error("cannot evaluate a staircase at NaN")]
    NotANumber,
    #[error(transparent)]
    Json(#[from] serde_json::Error)
}

impl StaircaseError {
    pub fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> StaircaseError {
        StaircaseError::InvalidParameter { field, reason: reason.into() }
    }

    /// 出錯的參數名稱；非參數錯誤回傳 `None`
    pub fn field(&self) -> Option<&'static str> {
        match self {
            StaircaseError::InvalidParameter { field, .. } => Some(*field),
            _ => None
        }
    }
}

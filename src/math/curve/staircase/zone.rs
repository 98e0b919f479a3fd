/// 查詢點在階梯函數上的位置分類。
///
/// 任一非 NaN 的點恰好落在其中一種；`segment` 為所在區段索引，
/// `position` 為過渡區內的正規化位置，範圍 [0, 1]。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    /// 定義域左側（point < 0）
    Before,
    /// 區段 `segment` 與前一區段共享的過渡區
    Leading { segment: usize, position: f64 },
    /// 平台區，值等於該區段高度
    Plateau { segment: usize },
    /// 區段 `segment` 與下一區段共享的過渡區
    Trailing { segment: usize, position: f64 },
    /// 定義域右側（point > 總長度）
    After,
}

impl Zone {
    pub fn segment(&self) -> Option<usize> {
        match *self {
            Zone::Leading { segment, .. }
            | Zone::Plateau { segment }
            | Zone::Trailing { segment, .. } => Some(segment),
            Zone::Before | Zone::After => None,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Zone::Leading { .. } | Zone::Trailing { .. })
    }
}

//! # 返品ステータス
//!
//! 返品の進行状況。`differences.from` / `differences.to` には
//! このステータスコードが整数で入る。

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

/// 返品ステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    IntoStaticStr,
    EnumIter,
    FromRepr,
)]
#[repr(i64)]
pub enum ReturnStatus {
    Completed = 0,
    Pending   = 1,
    Rejected  = 2,
}

impl ReturnStatus {
    /// ステータスコードから変換する（未知のコードは `None`）
    pub fn from_code(code: i64) -> Option<Self> {
        Self::from_repr(code)
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    /// 通知文面に埋め込む表示名
    pub fn display_name(self) -> &'static str {
        self.into()
    }
}

/// 正の整数をラップする ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 1 以上の値のみ受け付ける
/// - `as_i64()`: 内部値の取得
///
/// # 使用例
///
/// ```rust
/// use returnflow_domain::contractor::SellerId;
///
/// let id = SellerId::new(12).unwrap();
/// assert_eq!(id.as_i64(), 12);
/// assert!(SellerId::new(0).is_none());
/// ```
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(i64);

        impl $Name {
            /// ID を作成する（0 以下は `None`）
            pub fn new(value: i64) -> Option<Self> {
                (value > 0).then_some(Self(value))
            }

            /// 内部の整数値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }
    };
}

//! # リクエスト検証
//!
//! 生の JSON オブジェクトを型変換し、[`ReturnNotificationRequest`] を組み立てる。
//!
//! フィールドは宣言順に検証し、最初に失敗したフィールド名で
//! [`ReturnNotificationError::Validation`] を返す。
//!
//! | フィールド | 型 | 規則 |
//! |-----------|----|------|
//! | `resellerId` 〜 `expertId`, `complaintId`, `consumptionId` | 整数 | 1 以上 |
//! | `complaintNumber`, `consumptionNumber`, `agreementNumber`, `date` | 文字列 | サニタイズ後に空でない |
//! | `differences` | 任意 | 検証しない |

use std::sync::LazyLock;

use regex::Regex;
use returnflow_domain::{
    ReturnNotificationError,
    contractor::{ClientId, EmployeeId, SellerId},
    goods_return::{Differences, NotificationType, ReturnNotificationRequest},
};
use serde_json::{Map, Value};

static INTEGER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(0|[1-9][0-9]*)\s*$").expect("整数パターンは正しい正規表現")
});

/// 閉じていない `<` は末尾まで除去する
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*(>|$)").expect("タグパターンは正しい正規表現"));

/// JSON の値を整数に変換する
///
/// 受け付けるのは整数、小数部が 0 の数値、10 進整数表記の文字列のみ。
/// 真偽値・`null`・配列・オブジェクト、`i64` の範囲外は `None`。
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            let float = number.as_f64()?;
            // i64::MAX as f64 は 2^63 に丸められるため未満で比較する
            let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
            (float.fract() == 0.0 && in_range).then_some(float as i64)
        }),
        Value::String(text) if INTEGER_PATTERN.is_match(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// テキストをサニタイズする
///
/// タグを除去し、制御文字を取り除き、引用符を数値文字参照に置き換えてから前後の空白を削る。
pub fn sanitize_text(text: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(text, "");
    let mut sanitized = String::with_capacity(stripped.len());
    for c in stripped.chars().filter(|c| !c.is_control()) {
        match c {
            '\'' => sanitized.push_str("&#39;"),
            '"' => sanitized.push_str("&#34;"),
            other => sanitized.push(other),
        }
    }
    sanitized.trim().to_string()
}

fn positive_int(raw: &Map<String, Value>, key: &str) -> Result<i64, ReturnNotificationError> {
    raw.get(key)
        .and_then(coerce_int)
        .filter(|value| *value > 0)
        .ok_or_else(|| ReturnNotificationError::validation(key))
}

fn text(raw: &Map<String, Value>, key: &str) -> Result<String, ReturnNotificationError> {
    let source = match raw.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => return Err(ReturnNotificationError::validation(key)),
    };
    let sanitized = sanitize_text(&source);
    if sanitized.is_empty() {
        return Err(ReturnNotificationError::validation(key));
    }
    Ok(sanitized)
}

/// リクエストを検証する
pub fn validate(raw: &Map<String, Value>) -> Result<ReturnNotificationRequest, ReturnNotificationError> {
    let id_error = ReturnNotificationError::validation;

    let reseller_id =
        SellerId::new(positive_int(raw, "resellerId")?).ok_or_else(|| id_error("resellerId"))?;
    let notification_type = NotificationType::from_code(positive_int(raw, "notificationType")?);
    let client_id =
        ClientId::new(positive_int(raw, "clientId")?).ok_or_else(|| id_error("clientId"))?;
    let creator_id =
        EmployeeId::new(positive_int(raw, "creatorId")?).ok_or_else(|| id_error("creatorId"))?;
    let expert_id =
        EmployeeId::new(positive_int(raw, "expertId")?).ok_or_else(|| id_error("expertId"))?;
    let complaint_id = positive_int(raw, "complaintId")?;
    let complaint_number = text(raw, "complaintNumber")?;
    let consumption_id = positive_int(raw, "consumptionId")?;
    let consumption_number = text(raw, "consumptionNumber")?;
    let agreement_number = text(raw, "agreementNumber")?;
    let date = text(raw, "date")?;

    Ok(ReturnNotificationRequest {
        reseller_id,
        notification_type,
        client_id,
        creator_id,
        expert_id,
        complaint_id,
        complaint_number,
        consumption_id,
        consumption_number,
        agreement_number,
        date,
        differences: Differences::from_raw(raw.get("differences")),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn raw() -> Map<String, Value> {
        match json!({
            "resellerId": 10,
            "notificationType": 2,
            "clientId": "5",
            "creatorId": 7,
            "expertId": 8.0,
            "complaintId": 100,
            "complaintNumber": "C-100",
            "consumptionId": 200,
            "consumptionNumber": "S-200",
            "agreementNumber": "A-1",
            "date": "2024-05-01",
            "differences": {"from": 1, "to": 0}
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[rstest]
    fn test_正しいリクエストを型変換できる(raw: Map<String, Value>) {
        let request = validate(&raw).unwrap();

        assert_eq!(request.reseller_id, SellerId::new(10).unwrap());
        assert_eq!(request.notification_type, NotificationType::Change);
        assert_eq!(request.client_id, ClientId::new(5).unwrap());
        assert_eq!(request.expert_id, EmployeeId::new(8).unwrap());
        assert_eq!(request.complaint_number, "C-100");
        assert_eq!(request.client_target(), Some(&json!(0)));
    }

    #[rstest]
    #[case("resellerId")]
    #[case("notificationType")]
    #[case("clientId")]
    #[case("creatorId")]
    #[case("expertId")]
    #[case("complaintId")]
    #[case("complaintNumber")]
    #[case("consumptionId")]
    #[case("consumptionNumber")]
    #[case("agreementNumber")]
    #[case("date")]
    fn test_欠落したフィールド名でエラーになる(mut raw: Map<String, Value>, #[case] key: &str) {
        raw.remove(key);

        assert_eq!(
            validate(&raw).unwrap_err(),
            ReturnNotificationError::validation(key)
        );
    }

    #[rstest]
    fn test_最初に失敗したフィールドを報告する(mut raw: Map<String, Value>) {
        raw.insert("expertId".to_string(), json!(true));
        raw.insert("date".to_string(), json!(""));

        assert_eq!(
            validate(&raw).unwrap_err(),
            ReturnNotificationError::validation("expertId")
        );
    }

    #[rstest]
    #[case(json!(0))]
    #[case(json!(-4))]
    #[case(json!("0"))]
    fn test_0以下のidは不正(mut raw: Map<String, Value>, #[case] value: Value) {
        raw.insert("clientId".to_string(), value);

        assert_eq!(
            validate(&raw).unwrap_err(),
            ReturnNotificationError::validation("clientId")
        );
    }

    #[rstest]
    fn test_differencesは検証しない(mut raw: Map<String, Value>) {
        raw.insert("differences".to_string(), json!("anything"));
        assert_eq!(validate(&raw).unwrap().differences, None);

        raw.remove("differences");
        assert_eq!(validate(&raw).unwrap().differences, None);
    }

    #[rstest]
    fn test_未知の通知種別はotherとして受け付ける(mut raw: Map<String, Value>) {
        raw.insert("notificationType".to_string(), json!(7));
        assert_eq!(
            validate(&raw).unwrap().notification_type,
            NotificationType::Other(7)
        );
    }

    #[rstest]
    #[case(json!(42), Some(42))]
    #[case(json!(-3), Some(-3))]
    #[case(json!(5.0), Some(5))]
    #[case(json!(5.5), None)]
    #[case(json!(" 12 "), Some(12))]
    #[case(json!("+7"), Some(7))]
    #[case(json!("007"), None)]
    #[case(json!("12abc"), None)]
    #[case(json!("1e3"), None)]
    #[case(json!("99999999999999999999"), None)]
    #[case(json!(true), None)]
    #[case(json!(null), None)]
    #[case(json!([1]), None)]
    #[case(json!({"v": 1}), None)]
    fn test_整数への変換規則(#[case] value: Value, #[case] expected: Option<i64>) {
        assert_eq!(coerce_int(&value), expected);
    }

    #[rstest]
    #[case("  C-100  ", "C-100")]
    #[case("<b>C-100</b>", "C-100")]
    #[case("C-100<script", "C-100")]
    #[case("O'Neil \"A\"", "O&#39;Neil &#34;A&#34;")]
    #[case("line\u{0007}bell", "linebell")]
    #[case("<p></p>", "")]
    fn test_テキストのサニタイズ(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_text(input), expected);
    }

    #[rstest]
    fn test_数値の文字列フィールドは文字列化する(mut raw: Map<String, Value>) {
        raw.insert("agreementNumber".to_string(), json!(12345));
        assert_eq!(validate(&raw).unwrap().agreement_number, "12345");
    }

    #[rstest]
    fn test_タグだけの文字列フィールドは不正(mut raw: Map<String, Value>) {
        raw.insert("consumptionNumber".to_string(), json!("<br/>"));
        assert_eq!(
            validate(&raw).unwrap_err(),
            ReturnNotificationError::validation("consumptionNumber")
        );
    }
}

//! # テンプレートデータ検証
//!
//! 組み立て済みのテンプレートデータに空項目がないことを確認する。
//! 入力検証を通過した後の不整合のため、サーバー側の障害（500）として扱う。

use returnflow_domain::{ReturnNotificationError, goods_return::TemplateData};

/// 最初の空項目で [`ReturnNotificationError::Template`] を返す
pub fn validate(data: &TemplateData) -> Result<(), ReturnNotificationError> {
    match data.first_empty_field() {
        Some(field) => Err(ReturnNotificationError::template(field)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn data() -> TemplateData {
        TemplateData {
            complaint_id:       100,
            complaint_number:   "C-100".to_string(),
            creator_id:         7,
            creator_name:       "Anna Petrova".to_string(),
            expert_id:          8,
            expert_name:        "Oleg Sidorov".to_string(),
            client_id:          5,
            client_name:        "Ivan Ivanov".to_string(),
            consumption_id:     200,
            consumption_number: "S-200".to_string(),
            agreement_number:   "A-1".to_string(),
            date:               "2024-05-01".to_string(),
            differences:        "New position added".to_string(),
        }
    }

    #[rstest]
    fn test_すべて埋まっていれば成功(data: TemplateData) {
        assert!(validate(&data).is_ok());
    }

    #[rstest]
    fn test_差分文言が空ならテンプレートエラー(mut data: TemplateData) {
        data.differences = String::new();
        assert_eq!(
            validate(&data).unwrap_err().to_string(),
            "Template Data (DIFFERENCES) is empty!"
        );
    }

    #[rstest]
    fn test_空白のみの従業員名はテンプレートエラー(mut data: TemplateData) {
        data.creator_name = "  ".to_string();
        assert_eq!(
            validate(&data).unwrap_err(),
            ReturnNotificationError::template("CREATOR_NAME")
        );
    }
}

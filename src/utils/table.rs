use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static TABLE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\D*(\d+)\s*$").expect("valid table identifier pattern"));

/// 解析桌号标识，去掉非数字前缀，例如 "table01" -> 1, "Bàn 3" -> 3
pub fn parse_table_identifier(identifier: &str) -> AppResult<i32> {
    let invalid = || AppError::ValidationError(format!("Invalid table identifier: {identifier}"));

    let digits = TABLE_IDENTIFIER
        .captures(identifier.trim())
        .and_then(|c| c.get(1))
        .ok_or_else(invalid)?;
    let table_number: i32 = digits.as_str().parse().map_err(|_| invalid())?;
    validate_table_number(table_number)?;
    Ok(table_number)
}

pub fn validate_table_number(table_number: i32) -> AppResult<()> {
    if table_number <= 0 {
        return Err(AppError::ValidationError(
            "Table number must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

use crate::error::{GiftError, Result};

/// 価格の検証
///
/// 有限かつ 0 以上のみ許可。NaN / 無限大は「数値でない」として扱う。
pub fn validate_price(value: f64, field: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(GiftError::validation(format!("{field} must be a number")));
    }
    if value < 0.0 {
        return Err(GiftError::validation(format!(
            "{field} must not be negative (got {value})"
        )));
    }
    // -0.0 を 0.0 に揃える
    Ok(value + 0.0)
}

/// 入力文字列から価格を読み取る
///
/// 先頭の通貨記号 `$` は許容する。
pub fn parse_price(input: &str, field: &str) -> Result<f64> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    if digits.is_empty() {
        return Err(GiftError::validation(format!("{field} is required")));
    }
    let value: f64 = digits
        .parse()
        .map_err(|_| GiftError::validation(format!("{field} is not a number: {input:?}")))?;
    validate_price(value, field)
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;

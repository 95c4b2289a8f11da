use std::fmt;

/// `YYYY-MM` 格式的年月, 字符串的字典序即时间顺序
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(transparent)]
pub struct YearMonth(String);

impl YearMonth {
    pub fn parse(s: &str) -> Result<YearMonth, String> {
        let invalid = || format!("Invalid date '{s}', expected YYYY-MM");

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let month: u8 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for YearMonth {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.0
    }
}

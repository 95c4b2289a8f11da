#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(i32);

impl Price {
    pub fn parse(value: i64) -> Result<Price, String> {
        if value <= 0 {
            return Err("Price must be positive".to_string());
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| format!("Price must not exceed {}", i32::MAX))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

use crate::errors::{AppError, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Store identity and the timezone its business hours are expressed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub store_id: String,
    pub timezone: String,
}

impl StoreProfile {
    pub fn new(store_id: &str, timezone: &str) -> Self {
        Self {
            store_id: store_id.to_string(),
            timezone: timezone.to_string(),
        }
    }

    /// Resolve the IANA identifier; unknown identifiers are an input data error
    pub fn tz(&self) -> AppResult<Tz> {
        parse_timezone(&self.store_id, &self.timezone)
    }
}

pub fn parse_timezone(store_id: &str, identifier: &str) -> AppResult<Tz> {
    identifier.trim().parse::<Tz>().map_err(|_| {
        AppError::input_data(store_id, format!("unknown timezone '{}'", identifier))
    })
}

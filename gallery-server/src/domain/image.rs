use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::domain::error::DomainError;

const ID_DATE_LAYOUT: &str = "%Y%m%d";
const ID_DATE_LEN: usize = 8;
const DISPLAY_LAYOUT: &str = "%B %Y";

/// A stored photo. The id doubles as the file name on the image host and
/// starts with the capture date, e.g. `20040901_001.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: String,
    pub caption: Option<String>,
    pub location: Option<String>,
}

impl Image {
    pub fn new(id: String, caption: Option<String>, location: Option<String>) -> Self {
        Self {
            id,
            caption,
            location,
        }
    }

    /// Capture date encoded in the first eight characters of the id, at UTC midnight.
    pub fn time_from_id(&self) -> Result<DateTime<Utc>, DomainError> {
        let prefix = self
            .id
            .get(..ID_DATE_LEN)
            .ok_or_else(|| DomainError::InvalidImageId(self.id.clone()))?;
        let date = NaiveDate::parse_from_str(prefix, ID_DATE_LAYOUT)
            .map_err(|_| DomainError::InvalidImageId(self.id.clone()))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| DomainError::InvalidImageId(self.id.clone()))?;
        Ok(midnight.and_utc())
    }

    /// "September 2004", or empty when the id carries no date.
    pub fn display_date(&self) -> String {
        self.time_from_id()
            .map(|t| t.format(DISPLAY_LAYOUT).to_string())
            .unwrap_or_default()
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub image_id: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] image {} at {}",
            self.id,
            self.image_id,
            self.created_at.to_rfc3339()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub caption: Option<String>,
    pub location: Option<String>,
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(caption) = &self.caption {
            write!(f, " \"{}\"", caption)?;
        }
        if let Some(location) = &self.location {
            write!(f, " ({})", location)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Neighbors {
    pub previous: Option<Image>,
    pub next: Option<Image>,
}

// src/types.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level content partition. Closed set at any given deployment; extending
/// it is a code change so the cache can never hold a key no provider serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Usa,
    India,
    World,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Usa, Region::India, Region::World];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Usa => "usa",
            Region::India => "india",
            Region::World => "world",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usa" => Ok(Region::Usa),
            "india" => Ok(Region::India),
            "world" => Ok(Region::World),
            other => Err(format!("unknown region: {other}")),
        }
    }
}

/// Coarse time-of-day slot distinguishing the two daily publications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Evening,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Evening => "evening",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Period::Morning),
            "evening" => Ok(Period::Evening),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

/// Identity of one published bulletin. Structural `Eq + Hash` makes it the
/// cache key directly; the three fields are deterministic and collision-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletinKey {
    pub region: Region,
    pub date: NaiveDate,
    pub period: Period,
}

impl BulletinKey {
    pub fn new(region: Region, date: NaiveDate, period: Period) -> Self {
        Self {
            region,
            date,
            period,
        }
    }

    /// Resource identifier understood by the content provider, relative to
    /// its base location: `{region}/{YYYY-MM-DD}-{period}`.
    pub fn resource_path(&self) -> String {
        format!(
            "{}/{}-{}",
            self.region,
            self.date.format("%Y-%m-%d"),
            self.period
        )
    }
}

impl fmt::Display for BulletinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.region,
            self.date.format("%Y-%m-%d"),
            self.period
        )
    }
}

/// One validated digest of articles for a region/date/period.
/// `id` and `version` are emitted by older producers and carried when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bulletin {
    pub region: Region,
    pub date: NaiveDate,
    pub period: Period,
    pub generated_at: DateTime<Utc>,
    pub articles: Vec<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub source: Source,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> BulletinKey {
        BulletinKey::new(
            Region::Usa,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            Period::Morning,
        )
    }

    #[test]
    fn resource_path_matches_provider_layout() {
        assert_eq!(key().resource_path(), "usa/2025-01-10-morning");
    }

    #[test]
    fn key_display_uses_producer_id_format() {
        assert_eq!(key().to_string(), "usa-2025-01-10-morning");
    }

    #[test]
    fn region_and_period_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Region::World).unwrap(), "\"world\"");
        assert_eq!(
            serde_json::from_str::<Period>("\"evening\"").unwrap(),
            Period::Evening
        );
        assert!(serde_json::from_str::<Region>("\"mars\"").is_err());
    }

    #[test]
    fn keys_compare_structurally() {
        assert_eq!(key(), key());
        let evening = BulletinKey::new(key().region, key().date, Period::Evening);
        assert_ne!(key(), evening);
    }
}

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::normalize::slugify_jp;

#[derive(Debug, thiserror::Error)]
#[error("Invalid source '{0}'. Accepted values: 'asahi', 'senkyo'")]
pub struct SourceParseError(String);

/// Which of the two candidate-list sites a run scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Asahi,
    Senkyo,
}

impl Source {
    pub fn slug(&self) -> &'static str {
        match self {
            Source::Asahi => "asahi",
            Source::Senkyo => "senkyo",
        }
    }

    /// The senkyo schema carries the hiragana reading column; asahi's does not.
    pub fn includes_yomi(&self) -> bool {
        matches!(self, Source::Senkyo)
    }

    /// The asahi CSV gets a UTF-8 BOM for spreadsheet compatibility.
    pub fn writes_bom(&self) -> bool {
        matches!(self, Source::Asahi)
    }
}

impl FromStr for Source {
    type Err = SourceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asahi" => Ok(Source::Asahi),
            "senkyo" => Ok(Source::Senkyo),
            _ => Err(SourceParseError(s.to_string())),
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// One normalized candidate row. The `tubo*`/`uragane*` fields are
/// placeholders for later manual annotation and stay empty here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(rename = "todoufuken")]
    pub prefecture: String,
    #[serde(rename = "senkyoku")]
    pub district: String,
    #[serde(rename = "seitou")]
    pub party: String,
    #[serde(rename = "title")]
    pub name: String,
    pub yomi: String,
    pub detail: String,
    pub age: String,
    pub tubohantei: String,
    pub tubonaiyou: String,
    #[serde(rename = "tuboURL")]
    pub tubo_url: String,
    pub uraganehantei: String,
    pub uraganenaiyou: String,
    #[serde(rename = "uraganeURL")]
    pub uragane_url: String,
}

impl Candidate {
    pub fn new(
        prefecture: &str,
        district: &str,
        party: &str,
        name: &str,
        yomi: String,
        age: &str,
    ) -> Self {
        let district_key = if district.is_empty() {
            "proportional"
        } else {
            district
        };
        let id = format!("{}-{}", slugify_jp(district_key), slugify_jp(name));
        let detail = if age.is_empty() {
            String::new()
        } else {
            format!("{}歳", age)
        };

        Self {
            id,
            prefecture: prefecture.to_string(),
            district: district.to_string(),
            party: party.to_string(),
            name: name.to_string(),
            yomi,
            detail,
            age: age.to_string(),
            tubohantei: String::new(),
            tubonaiyou: String::new(),
            tubo_url: String::new(),
            uraganehantei: String::new(),
            uraganenaiyou: String::new(),
            uragane_url: String::new(),
        }
    }
}

impl Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} — {}", self.district, self.name, self.party)?;
        if !self.age.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn source_round_trips_through_slug() {
        for source in [Source::Asahi, Source::Senkyo] {
            assert_eq!(Source::from_str(source.slug()).unwrap(), source);
        }
        assert!(Source::from_str("mainichi").is_err());
    }

    #[test]
    fn candidate_id_uses_proportional_placeholder_for_empty_district() {
        let c = Candidate::new("", "", "自民", "Abe Taro", String::new(), "52");
        assert!(c.id.starts_with("proportional-"));
        assert_eq!(c.detail, "52歳");
    }

    #[test]
    fn candidate_detail_is_empty_without_age() {
        let c = Candidate::new("東京", "東京", "無所属", "山田 太郎", String::new(), "");
        assert!(c.detail.is_empty());
        assert!(c.tubohantei.is_empty() && c.uragane_url.is_empty());
    }
}

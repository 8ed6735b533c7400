//! 季節模型與季節分類

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::RmError;

/// 季節
///
/// 排序依宣告順序，輸出表按此順序排列同一物料的各季節。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// 冬季
    Winter,
    /// 夏季
    Summer,
    /// 雨季
    Monsoon,
    /// 無法辨識的月份
    Unknown,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析月份標籤
///
/// 接受英文全名與三字母縮寫（不分大小寫，忽略前後空白），
/// 其他任何標籤都回傳 `None`。
pub fn parse_month(label: &str) -> Option<Month> {
    Month::from_str(label.trim()).ok()
}

/// 季節日曆（月份 → 季節的對照表）
///
/// 對 12 個月份必定完整，`Unknown` 保留給無法辨識的月份標籤。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Season>",
    into = "BTreeMap<String, Season>"
)]
pub struct SeasonCalendar {
    /// 索引 0 = 一月, 1 = 二月, ..., 11 = 十二月
    seasons: [Season; 12],
}

impl SeasonCalendar {
    /// 預設日曆：11–2 月冬季，3–5 月夏季，6–10 月雨季
    pub fn new() -> Self {
        use Season::*;
        Self {
            seasons: [
                Winter, Winter, Summer, Summer, Summer, Monsoon, Monsoon, Monsoon, Monsoon,
                Monsoon, Winter, Winter,
            ],
        }
    }

    /// 從完整的月份指派建立日曆
    ///
    /// 12 個月份都必須有指派，且不得指派為 `Unknown`。
    pub fn from_assignments<I>(assignments: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (Month, Season)>,
    {
        let mut slots: [Option<Season>; 12] = [None; 12];
        for (month, season) in assignments {
            if season == Season::Unknown {
                return Err(RmError::InvalidConfig(format!(
                    "月份 {} 不可指派為 Unknown",
                    month.name()
                )));
            }
            slots[Self::index(month)] = Some(season);
        }

        let mut seasons = [Season::Unknown; 12];
        for (i, slot) in slots.iter().enumerate() {
            match slot {
                Some(season) => seasons[i] = *season,
                None => {
                    return Err(RmError::InvalidConfig(format!(
                        "季節日曆缺少第 {} 月",
                        i + 1
                    )))
                }
            }
        }

        Ok(Self { seasons })
    }

    /// 建構器模式：改寫單一月份的季節
    pub fn with_season(mut self, month: Month, season: Season) -> crate::Result<Self> {
        if season == Season::Unknown {
            return Err(RmError::InvalidConfig(format!(
                "月份 {} 不可指派為 Unknown",
                month.name()
            )));
        }
        self.seasons[Self::index(month)] = season;
        Ok(self)
    }

    /// 查詢月份所屬季節
    pub fn season_of(&self, month: Month) -> Season {
        self.seasons[Self::index(month)]
    }

    /// 將月份標籤分類到季節
    ///
    /// 永不失敗：無法辨識的標籤歸入 `Season::Unknown`。
    pub fn classify(&self, label: &str) -> Season {
        parse_month(label)
            .map(|month| self.season_of(month))
            .unwrap_or(Season::Unknown)
    }

    fn index(month: Month) -> usize {
        month.number_from_month() as usize - 1
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<BTreeMap<String, Season>> for SeasonCalendar {
    type Error = RmError;

    fn try_from(map: BTreeMap<String, Season>) -> Result<Self, Self::Error> {
        let mut assignments = Vec::with_capacity(map.len());
        for (label, season) in map {
            let month = parse_month(&label).ok_or_else(|| {
                RmError::InvalidConfig(format!("無法辨識的月份: {}", label))
            })?;
            assignments.push((month, season));
        }
        Self::from_assignments(assignments)
    }
}

impl From<SeasonCalendar> for BTreeMap<String, Season> {
    fn from(calendar: SeasonCalendar) -> Self {
        calendar
            .seasons
            .iter()
            .enumerate()
            .filter_map(|(i, season)| {
                Month::try_from(i as u8 + 1)
                    .ok()
                    .map(|month| (month.name().to_string(), *season))
            })
            .collect()
    }
}

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TEAM_COUNT: u8 = 5;

const LAYOUT_URL: &str = "assets/schedule.json";
const CUSTOM_MATCHUP: &str = "Custom matchup";

/// One of the five competing teams, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(u8);

impl TeamId {
    pub fn new(number: u8) -> Option<Self> {
        (1..=TEAM_COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based slot for per-team arrays.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    pub fn all() -> impl Iterator<Item = TeamId> {
        (1..=TEAM_COUNT).map(TeamId)
    }

    pub fn label(self) -> String {
        format!("Team {}", self.0)
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TeamId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(TeamId::new)
            .ok_or_else(|| format!("'{}' is not a team between 1 and {}", value, TEAM_COUNT))
    }
}

impl From<TeamId> for String {
    fn from(team: TeamId) -> Self {
        team.0.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Doubles,
    Singles,
    Finals,
}

/// A single line of one of the match tables, as the user sees and edits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRow {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub court: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchup: Option<String>,
    #[serde(default)]
    pub team_a: TeamId,
    #[serde(default)]
    pub team_b: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_b: Option<String>,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub winner: String,
}

impl MatchRow {
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            team_a,
            team_b,
            ..Self::default()
        }
    }

    /// The row produced by the "add row" action.
    pub fn blank(table: Table) -> Self {
        let mut row = Self::default();
        if table == Table::Singles {
            row.matchup = Some(CUSTOM_MATCHUP.to_string());
        }
        row.conform(table);
        row
    }

    /// Ensures the optional cells a table carries are present.
    pub fn conform(&mut self, table: Table) {
        match table {
            Table::Doubles => {}
            Table::Singles => {
                self.matchup.get_or_insert_with(String::new);
                self.player_a.get_or_insert_with(String::new);
                self.player_b.get_or_insert_with(String::new);
            }
            Table::Finals => {
                self.matchup.get_or_insert_with(String::new);
            }
        }
    }
}

/// Initial rows of the three tables before any saved data is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentLayout {
    pub doubles: Vec<MatchRow>,
    pub singles: Vec<MatchRow>,
    pub finals: Vec<MatchRow>,
}

impl TournamentLayout {
    pub fn builtin() -> Self {
        const ROUND_ROBIN: [(u8, u8); 10] = [
            (1, 2),
            (3, 4),
            (1, 3),
            (2, 5),
            (1, 4),
            (3, 5),
            (1, 5),
            (2, 4),
            (2, 3),
            (4, 5),
        ];

        let doubles = ROUND_ROBIN
            .iter()
            .enumerate()
            .filter_map(|(index, &(a, b))| {
                let mut row = MatchRow::new(TeamId::new(a)?, TeamId::new(b)?);
                row.time = slot_time(index / 2);
                row.court = format!("Court {}", index % 2 + 1);
                Some(row)
            })
            .collect();

        let singles = TeamId::all()
            .enumerate()
            .map(|(index, team)| {
                let mut row = MatchRow::new(team, team);
                row.time = slot_time(5 + index / 2);
                row.court = format!("Court {}", index % 2 + 1);
                row.conform(Table::Singles);
                row
            })
            .collect();

        let finals = ["3rd place vs 4th place", "1st place vs 2nd place"]
            .iter()
            .enumerate()
            .map(|(index, description)| {
                let mut row = MatchRow::default();
                row.time = slot_time(8 + index);
                row.court = "Court 1".to_string();
                row.matchup = Some((*description).to_string());
                row
            })
            .collect();

        Self {
            doubles,
            singles,
            finals,
        }
    }

    fn validate(mut self) -> Result<Self, DataError> {
        if self.doubles.is_empty() {
            return Err(DataError::Parse(
                "Layout does not contain any doubles matches".to_string(),
            ));
        }

        for row in &mut self.doubles {
            row.conform(Table::Doubles);
        }
        for row in &mut self.singles {
            row.conform(Table::Singles);
        }
        for row in &mut self.finals {
            row.conform(Table::Finals);
        }

        Ok(self)
    }
}

#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    Network(String),
    Parse(String),
}

impl DataError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }

    fn parse<E: fmt::Display>(err: E) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::NotFound(url) => write!(f, "{} was not found", url),
            DataError::Network(message) => write!(f, "Network error: {}", message),
            DataError::Parse(message) => write!(f, "Invalid layout: {}", message),
        }
    }
}

pub async fn fetch_layout() -> Result<TournamentLayout, DataError> {
    let response = Request::get(LAYOUT_URL)
        .send()
        .await
        .map_err(DataError::network)?;

    if response.status() == 404 {
        return Err(DataError::NotFound(LAYOUT_URL.to_owned()));
    }

    if !response.ok() {
        return Err(DataError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            LAYOUT_URL
        )));
    }

    let text = response.text().await.map_err(DataError::network)?;
    parse_layout(&text)
}

pub fn parse_layout(text: &str) -> Result<TournamentLayout, DataError> {
    let layout: TournamentLayout = serde_json::from_str(text).map_err(DataError::parse)?;
    layout.validate()
}

fn slot_time(slot: usize) -> String {
    let minutes = 9 * 60 + slot * 45;
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

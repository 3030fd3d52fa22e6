use crate::data::{MatchRow, Table, TeamId};
use crate::scoresheet::Scoresheet;
use chrono::{SecondsFormat, Utc};
use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MATCH_DATA_KEY: &str = "tennisMatchData";
const PLAYER_NAMES_KEY: &str = "tennisPlayerNames";
const PHOTOS_KEY: &str = "tennisPhotos";

/// Raw table state as written to local storage. Derived results are never
/// stored; they are recomputed after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatchData {
    #[serde(default)]
    pub doubles: Vec<StoredRow>,
    #[serde(default)]
    pub singles: Vec<StoredRow>,
    #[serde(default)]
    pub finals: Vec<StoredRow>,
    #[serde(default)]
    pub finals_locked: bool,
    #[serde(default)]
    pub timestamp: String,
}

/// A saved row, or the raw value stored in its place when it no longer
/// reads as one. Unreadable rows keep their position so later rows still
/// line up with the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredRow {
    Row(MatchRow),
    Unreadable(serde_json::Value),
}

impl StoredRow {
    pub fn row(&self) -> Option<&MatchRow> {
        match self {
            StoredRow::Row(row) => Some(row),
            StoredRow::Unreadable(_) => None,
        }
    }

    pub fn row_mut(&mut self) -> Option<&mut MatchRow> {
        match self {
            StoredRow::Row(row) => Some(row),
            StoredRow::Unreadable(_) => None,
        }
    }
}

fn stored_rows(rows: &[MatchRow]) -> Vec<StoredRow> {
    rows.iter().cloned().map(StoredRow::Row).collect()
}

impl StoredMatchData {
    pub fn snapshot(sheet: &Scoresheet, timestamp: String) -> Self {
        Self {
            doubles: stored_rows(&sheet.doubles),
            singles: stored_rows(&sheet.singles),
            finals: stored_rows(&sheet.finals),
            finals_locked: sheet.finals_locked,
            timestamp,
        }
    }
}

/// Player names typed into a singles row, keyed by row position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNames {
    pub row_index: usize,
    #[serde(default)]
    pub player_a: String,
    #[serde(default)]
    pub player_b: String,
    #[serde(default, with = "team_cell")]
    pub team_a: Option<TeamId>,
    #[serde(default, with = "team_cell")]
    pub team_b: Option<TeamId>,
}

/// Team select values in a name binding. An unset select is stored as `""`;
/// blank or unknown values read back as no team.
mod team_cell {
    use super::*;

    pub fn serialize<S: Serializer>(team: &Option<TeamId>, serializer: S) -> Result<S::Ok, S::Error> {
        match team {
            Some(team) => serializer.serialize_str(&team.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<TeamId>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| TeamId::try_from(value).ok()))
    }
}

pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn load_match_data() -> Option<StoredMatchData> {
    match LocalStorage::get::<StoredMatchData>(MATCH_DATA_KEY) {
        Ok(data) => {
            info!("Loading match data saved at {}", data.timestamp);
            Some(data)
        }
        Err(StorageError::KeyNotFound(_)) => {
            debug!("No saved match data found");
            None
        }
        Err(err) => {
            warn!("Ignoring unreadable match data: {}", err);
            None
        }
    }
}

pub fn save_match_data(sheet: &Scoresheet) {
    let data = StoredMatchData::snapshot(sheet, timestamp_now());
    if let Err(err) = LocalStorage::set(MATCH_DATA_KEY, &data) {
        warn!("Failed to persist match data: {}", err);
    }
}

pub fn load_player_names() -> Vec<PlayerNames> {
    match LocalStorage::get::<Vec<PlayerNames>>(PLAYER_NAMES_KEY) {
        Ok(names) => names,
        Err(StorageError::KeyNotFound(_)) => Vec::new(),
        Err(err) => {
            warn!("Ignoring unreadable player names: {}", err);
            Vec::new()
        }
    }
}

pub fn save_player_names(singles: &[MatchRow]) {
    let names = player_names(singles);
    if let Err(err) = LocalStorage::set(PLAYER_NAMES_KEY, &names) {
        warn!("Failed to persist player names: {}", err);
    }
}

pub fn load_photos() -> Vec<String> {
    match LocalStorage::get::<Vec<String>>(PHOTOS_KEY) {
        Ok(photos) => photos,
        Err(StorageError::KeyNotFound(_)) => Vec::new(),
        Err(err) => {
            warn!("Ignoring unreadable photos: {}", err);
            Vec::new()
        }
    }
}

pub fn save_photos(photos: &[String]) -> Result<(), StorageError> {
    LocalStorage::set(PHOTOS_KEY, photos).map_err(|err| {
        warn!("Failed to persist photos: {}", err);
        err
    })
}

/// Name bindings for every singles row that has both player cells.
pub fn player_names(singles: &[MatchRow]) -> Vec<PlayerNames> {
    singles
        .iter()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let (Some(player_a), Some(player_b)) = (&row.player_a, &row.player_b) else {
                return None;
            };
            Some(PlayerNames {
                row_index,
                player_a: player_a.clone(),
                player_b: player_b.clone(),
                team_a: Some(row.team_a),
                team_b: Some(row.team_b),
            })
        })
        .collect()
}

pub fn apply_player_names(singles: &mut [MatchRow], names: &[PlayerNames]) {
    let row_count = singles.len();
    for entry in names {
        let Some(row) = singles.get_mut(entry.row_index) else {
            warn!(
                "Player names for row {} ignored, only {} singles rows",
                entry.row_index, row_count
            );
            continue;
        };
        if row.player_a.is_none() || row.player_b.is_none() {
            warn!("Singles row {} has no player cells", entry.row_index);
            continue;
        }

        if !entry.player_a.is_empty() {
            row.player_a = Some(entry.player_a.clone());
        }
        if !entry.player_b.is_empty() {
            row.player_b = Some(entry.player_b.clone());
        }
        if let Some(team) = entry.team_a {
            row.team_a = team;
        }
        if let Some(team) = entry.team_b {
            row.team_b = team;
        }
    }
}

/// Overlays saved rows onto the freshly loaded layout. Doubles and singles
/// grow to fit the saved rows; the finals table never does.
pub fn align_scoresheet(sheet: &mut Scoresheet, saved: StoredMatchData) {
    for (table, rows) in [
        (Table::Doubles, saved.doubles),
        (Table::Singles, saved.singles),
        (Table::Finals, saved.finals),
    ] {
        if table != Table::Finals {
            while sheet.rows(table).len() < rows.len() {
                sheet.add_row(table);
            }
        }

        for (index, (current, stored)) in sheet.rows_mut(table).iter_mut().zip(rows).enumerate() {
            match stored {
                StoredRow::Row(saved) => overlay_row(current, saved),
                StoredRow::Unreadable(value) => {
                    warn!("Saved {:?} row {} is unreadable, keeping layout: {}", table, index, value)
                }
            }
        }
    }
    sheet.finals_locked = saved.finals_locked;
}

fn overlay_row(row: &mut MatchRow, saved: MatchRow) {
    if !saved.time.is_empty() {
        row.time = saved.time;
    }
    if !saved.court.is_empty() {
        row.court = saved.court;
    }
    if let Some(matchup) = saved.matchup.filter(|text| !text.is_empty()) {
        row.matchup = Some(matchup);
    }
    row.team_a = saved.team_a;
    row.team_b = saved.team_b;
    if row.player_a.is_some() {
        if let Some(name) = saved.player_a.filter(|name| !name.is_empty()) {
            row.player_a = Some(name);
        }
    }
    if row.player_b.is_some() {
        if let Some(name) = saved.player_b.filter(|name| !name.is_empty()) {
            row.player_b = Some(name);
        }
    }
    if !saved.score.is_empty() {
        row.score = saved.score;
    }
}

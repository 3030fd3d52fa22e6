/// Games recorded for side A and side B of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AWins,
    BWins,
    Tie,
}

impl Score {
    pub fn outcome(&self) -> Outcome {
        if self.a > self.b {
            Outcome::AWins
        } else if self.b > self.a {
            Outcome::BWins
        } else {
            Outcome::Tie
        }
    }
}

/// Parses an `"A:B"` score. Anything other than exactly two integer
/// segments yields `None`; the caller treats the row as unplayed.
///
/// Segments may carry surrounding whitespace (`"6 : 3"`). No tennis
/// plausibility check is made, so negative or huge values pass through.
pub fn parse_score(raw: &str) -> Option<Score> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.split(':');
    let a = parts.next()?.trim().parse::<i64>().ok()?;
    let b = parts.next()?.trim().parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(Score { a, b })
}

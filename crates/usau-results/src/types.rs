use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One parsed table row: column header mapped to cell text. The column set is
/// whatever the source table declares; there is no fixed schema.
pub type RowRecord = BTreeMap<String, String>;

/// Combined output of one schedule page: pool-play standings and rounds plus
/// the elimination bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResults {
    pub pool_play: PoolPlayResults,
    pub bracket: BracketResults,
}

impl Display for TournamentResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pool_play)?;
        write!(f, "{}", self.bracket)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolPlayResults {
    pub pools: Vec<PoolStandings>,
    pub rounds: Vec<RoundResults>,
}

impl Display for PoolPlayResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pool in &self.pools {
            write!(f, "{}", pool)?;
        }
        for round in &self.rounds {
            write!(f, "{}", round)?;
        }
        Ok(())
    }
}

/// Standings table of one round-robin pool, in the row order the site lists
/// the teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStandings {
    pub name: String,
    pub rows: Vec<RowRecord>,
}

impl Display for PoolStandings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "── {}", self.name)?;
        for row in &self.rows {
            writeln!(f, "   {}", join_record(row))?;
        }
        Ok(())
    }
}

/// Scored sections of one schedule round. Rounds whose slide produced no
/// scored sections are never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResults {
    pub name: String,
    pub sections: Vec<SectionResults>,
}

impl Display for RoundResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "── {}", self.name)?;
        for section in &self.sections {
            writeln!(f, "   {} ({} games)", section.name, section.rows.len())?;
            for row in &section.rows {
                writeln!(f, "     {}", join_record(row))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResults {
    pub name: String,
    pub rows: Vec<RowRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketResults {
    pub divisions: Vec<BracketDivision>,
}

impl Display for BracketResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for division in &self.divisions {
            write!(f, "{}", division)?;
        }
        Ok(())
    }
}

/// One top-level bracket grouping, typically a division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketDivision {
    pub name: String,
    pub rounds: Vec<BracketRound>,
}

impl Display for BracketDivision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "── {}", self.name)?;
        for round in &self.rounds {
            writeln!(f, "   {}", round.name)?;
            for game in &round.games {
                writeln!(f, "     {}", game)?;
            }
        }
        Ok(())
    }
}

/// One bracket column. May hold no games when every card in the column is
/// still scheduled or in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRound {
    pub name: String,
    pub games: Vec<Game>,
}

/// A finalized bracket game. Only cards whose status label reads "Final" are
/// recorded; `score` is the literal "<winnerScore> - <loserScore>" string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub date: String,
    pub time: String,
    pub field: String,
    pub winner: String,
    pub loser: String,
    pub score: String,
    pub status: String,
}

impl Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} on {}: {} def. {} {}",
            self.date, self.time, self.field, self.winner, self.loser, self.score
        )
    }
}

fn join_record(row: &RowRecord) -> String {
    row.iter()
        .map(|(column, value)| format!("{}: {}", column, value))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_serialize_under_pool_play_and_bracket_keys() {
        let results = TournamentResults {
            pool_play: PoolPlayResults::default(),
            bracket: BracketResults::default(),
        };

        let json = serde_json::to_value(&results).expect("Failed to serialize");
        assert!(json.get("pool_play").is_some());
        assert!(json.get("bracket").is_some());
    }

    #[test]
    fn test_game_display() {
        let game = Game {
            date: "6/22/2024".to_string(),
            time: "1:00PM".to_string(),
            field: "Field 3".to_string(),
            winner: "Red Hawks".to_string(),
            loser: "Blue Herons".to_string(),
            score: "15 - 12".to_string(),
            status: "Final".to_string(),
        };

        assert_eq!(
            game.to_string(),
            "6/22/2024 1:00PM on Field 3: Red Hawks def. Blue Herons 15 - 12"
        );
    }
}

use crate::types::TournamentResults;

#[derive(Debug)]
pub struct ResultsStats {
    pub pools: usize,
    pub rounds: usize,
    pub divisions: usize,
    pub games: usize,
}

impl ResultsStats {
    pub fn from_results(results: &TournamentResults) -> ResultsStats {
        ResultsStats {
            pools: results.pool_play.pools.len(),
            rounds: results.pool_play.rounds.len(),
            divisions: results.bracket.divisions.len(),
            games: results
                .bracket
                .divisions
                .iter()
                .flat_map(|d| &d.rounds)
                .map(|r| r.games.len())
                .sum(),
        }
    }
}

impl std::fmt::Display for ResultsStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        writeln!(f, "  Pools:             {}", self.pools)?;
        writeln!(f, "  Scored rounds:     {}", self.rounds)?;
        writeln!(f, "  Bracket divisions: {}", self.divisions)?;
        writeln!(f, "  Finalized games:   {}", self.games)
    }
}

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::{
    BracketDivision, BracketResults, BracketRound, Game, PoolPlayResults, PoolStandings,
    RoundResults, RowRecord, SectionResults,
};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Required element not found: {0}")]
    MissingElement(String),
    #[error("No round tab matches content block at position {slide}")]
    RoundTabMismatch { slide: usize },
    #[error("Failed to parse game date: {0}")]
    MalformedDate(String),
    #[error("Malformed results table: {0}")]
    MalformedTable(String),
}

static RE_ROUND_TAB_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CT_Main_0_rptTabs_ctl(\d+)_liTab$").expect("invalid regex: round tab id")
});

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the pool standings and per-round scored sections from a schedule
/// page. Sections found in the pool-play slide are attributed to the round tab
/// whose embedded index matches the slide's position; a slide with scored
/// content but no matching tab is an error rather than a silent misattribution.
pub fn parse_pool_play(html: &str) -> Result<PoolPlayResults, ParseError> {
    let document = Html::parse_document(html);

    let round_names = parse_round_tabs(&document)?;

    let slides_sel = Selector::parse("div.slides").unwrap();
    let slide_sel = Selector::parse("section.slide").unwrap();

    let container = document.select(&slides_sel).next().ok_or_else(|| {
        ParseError::MissingElement("results container 'div.slides'".to_string())
    })?;

    let mut pools = Vec::new();
    let mut rounds = Vec::new();

    for (index, slide) in container.select(&slide_sel).enumerate() {
        if slide.value().attr("id") != Some("poolSlide") {
            continue;
        }

        pools.extend(parse_pools(slide)?);

        let sections = parse_scored_sections(slide)?;
        if sections.is_empty() {
            continue;
        }

        let name = round_names
            .get(index)
            .ok_or(ParseError::RoundTabMismatch { slide: index })?;
        rounds.push(RoundResults {
            name: name.clone(),
            sections,
        });
    }

    Ok(PoolPlayResults { pools, rounds })
}

/// Extracts finalized bracket games, grouped by division and round column in
/// document order. Cards whose status is anything other than "Final" are
/// dropped.
pub fn parse_bracket(html: &str) -> Result<BracketResults, ParseError> {
    let document = Html::parse_document(html);

    let slides_sel = Selector::parse("div.slides").unwrap();
    let slide_sel = Selector::parse("section.slide").unwrap();
    let division_sel = Selector::parse("section.section.page").unwrap();
    let h3_sel = Selector::parse("h3").unwrap();
    let col_sel = Selector::parse("div.bracket_col").unwrap();
    let h4_sel = Selector::parse("h4").unwrap();
    let game_sel = Selector::parse("div.bracket_game").unwrap();

    let container = document.select(&slides_sel).next().ok_or_else(|| {
        ParseError::MissingElement("results container 'div.slides'".to_string())
    })?;

    let mut divisions = Vec::new();

    for slide in container.select(&slide_sel) {
        if slide.value().attr("id") != Some("bracketSlide") {
            continue;
        }

        for division in slide.select(&division_sel) {
            let name = division
                .select(&h3_sel)
                .next()
                .map(|e| elem_text(e).trim().to_string())
                .ok_or_else(|| {
                    ParseError::MissingElement("bracket division heading 'h3'".to_string())
                })?;

            let mut rounds = Vec::new();
            for col in division.select(&col_sel) {
                let round_name = col
                    .select(&h4_sel)
                    .next()
                    .map(|e| normalize_whitespace(&elem_text(e)))
                    .ok_or_else(|| {
                        ParseError::MissingElement("bracket round heading 'h4'".to_string())
                    })?;

                let mut games = Vec::new();
                for card in col.select(&game_sel) {
                    if let Some(game) = parse_game(card)? {
                        games.push(game);
                    }
                }
                rounds.push(BracketRound {
                    name: round_name,
                    games,
                });
            }

            divisions.push(BracketDivision { name, rounds });
        }
    }

    Ok(BracketResults { divisions })
}

/// Round-tab names keyed by the numeric index embedded in the tab's element
/// id, in index order. The index correlates a tab with a content slide.
fn parse_round_tabs(document: &Html) -> Result<Vec<String>, ParseError> {
    let tab_sel = Selector::parse(r#"li[id^="CT_Main_0_rptTabs_ctl"]"#).unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut tabs = Vec::new();
    for element in document.select(&tab_sel) {
        let id = element.value().attr("id").unwrap_or("");
        let Some(caps) = RE_ROUND_TAB_ID.captures(id) else {
            continue;
        };
        let Ok(key) = caps[1].parse::<usize>() else {
            continue;
        };

        let link = element.select(&link_sel).next().ok_or_else(|| {
            ParseError::MissingElement(format!("round tab link in '{}'", id))
        })?;
        tabs.push((key, normalize_whitespace(&elem_text(link))));
    }

    tabs.sort_by_key(|(key, _)| *key);
    Ok(tabs.into_iter().map(|(_, name)| name).collect())
}

fn parse_pools(slide: ElementRef) -> Result<Vec<PoolStandings>, ParseError> {
    let pool_sel = Selector::parse("div.pool").unwrap();
    let h3_sel = Selector::parse("h3").unwrap();
    let table_sel = Selector::parse("table").unwrap();

    let mut pools = Vec::new();
    for pool in slide.select(&pool_sel) {
        let name = pool
            .select(&h3_sel)
            .next()
            .map(|e| normalize_whitespace(&elem_text(e)))
            .ok_or_else(|| ParseError::MissingElement("pool heading 'h3'".to_string()))?;

        let table = pool.select(&table_sel).next().ok_or_else(|| {
            ParseError::MissingElement(format!("standings table for pool '{}'", name))
        })?;

        let rows = table_rows(table);
        pools.push(PoolStandings {
            name,
            rows: rows_to_records(&rows, 0, None)?,
        });
    }
    Ok(pools)
}

fn parse_scored_sections(slide: ElementRef) -> Result<Vec<SectionResults>, ParseError> {
    let section_sel = Selector::parse("table.scores_table").unwrap();
    let th_sel = Selector::parse("th").unwrap();

    let mut sections = Vec::new();
    for table in slide.select(&section_sel) {
        let name = table
            .select(&th_sel)
            .next()
            .map(|e| normalize_whitespace(&elem_text(e)))
            .ok_or_else(|| {
                ParseError::MissingElement("scored section header cell 'th'".to_string())
            })?;

        // Row 0 is a synthetic banner spanning the table; the first data row
        // carries the real column names. The "Options" column holds site
        // controls, not scores, and is dropped when present.
        let rows = table_rows(table);
        sections.push(SectionResults {
            name,
            rows: rows_to_records(&rows, 1, Some("Options"))?,
        });
    }
    Ok(sections)
}

fn table_rows(table: ElementRef) -> Vec<Vec<String>> {
    let tr_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("th, td").unwrap();

    table
        .select(&tr_sel)
        .map(|tr| {
            tr.select(&cell_sel)
                .map(|cell| normalize_whitespace(&elem_text(cell)))
                .collect()
        })
        .collect()
}

fn rows_to_records(
    rows: &[Vec<String>],
    header_index: usize,
    drop_column: Option<&str>,
) -> Result<Vec<RowRecord>, ParseError> {
    let header = rows.get(header_index).ok_or_else(|| {
        ParseError::MalformedTable(format!("table has no header row at index {}", header_index))
    })?;

    let mut records = Vec::new();
    for row in &rows[header_index + 1..] {
        if row.len() != header.len() {
            return Err(ParseError::MalformedTable(format!(
                "expected {} cells per row, found {}",
                header.len(),
                row.len()
            )));
        }

        let record: RowRecord = header
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .filter(|(column, _)| drop_column.is_none_or(|dropped| column != dropped))
            .collect();
        records.push(record);
    }
    Ok(records)
}

fn parse_game(card: ElementRef) -> Result<Option<Game>, ParseError> {
    let status_sel = Selector::parse("span.game-status").unwrap();
    let date_sel = Selector::parse("span.date").unwrap();
    let location_sel = Selector::parse("p.location").unwrap();
    let winner_sel = Selector::parse("div.winner").unwrap();
    let loser_sel = Selector::parse("div.loser").unwrap();

    let status = card
        .select(&status_sel)
        .next()
        .map(|e| elem_text(e).trim().to_string())
        .ok_or_else(|| ParseError::MissingElement("game status 'span.game-status'".to_string()))?;

    if status != "Final" {
        log::debug!("Skipping game with status '{}'", status);
        return Ok(None);
    }

    let date_text = card
        .select(&date_sel)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .ok_or_else(|| ParseError::MissingElement("game date 'span.date'".to_string()))?;
    let (date, time) = split_date_time(&date_text)?;

    let field = card
        .select(&location_sel)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .ok_or_else(|| ParseError::MissingElement("game location 'p.location'".to_string()))?;

    let winner_div = card
        .select(&winner_sel)
        .next()
        .ok_or_else(|| ParseError::MissingElement("winner block 'div.winner'".to_string()))?;
    let loser_div = card
        .select(&loser_sel)
        .next()
        .ok_or_else(|| ParseError::MissingElement("loser block 'div.loser'".to_string()))?;

    let (winner, winner_score) = parse_competitor(winner_div)?;
    let (loser, loser_score) = parse_competitor(loser_div)?;

    Ok(Some(Game {
        date,
        time,
        field,
        winner,
        loser,
        score: format!("{} - {}", winner_score, loser_score),
        status,
    }))
}

/// Splits a combined "6/22/2024 1:00 PM" label into the date and a compact
/// "1:00PM" time string.
fn split_date_time(text: &str) -> Result<(String, String), ParseError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let &[date, time, meridiem] = parts.as_slice() else {
        return Err(ParseError::MalformedDate(text.to_string()));
    };
    Ok((date.to_string(), format!("{}{}", time, meridiem)))
}

fn parse_competitor(block: ElementRef) -> Result<(String, String), ParseError> {
    let name_sel = Selector::parse("span.isName a").unwrap();
    let score_sel = Selector::parse("span.isScore").unwrap();

    let name = block
        .select(&name_sel)
        .next()
        .map(|e| normalize_whitespace(&elem_text(e)))
        .ok_or_else(|| ParseError::MissingElement("competitor name 'span.isName a'".to_string()))?;

    let score = block
        .select(&score_sel)
        .next()
        .map(|e| elem_text(e).trim().to_string())
        .ok_or_else(|| {
            ParseError::MissingElement("competitor score 'span.isScore'".to_string())
        })?;

    Ok((name, score))
}

//! Team/position filtering, ranked tables and scatter series

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::dataset::PlayerStatRow;
use super::labels::{resolve_team, Metric};
use crate::{PlayStatsError, Result};

/// What the user has chosen to look at
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Full team display names
    pub teams: BTreeSet<&'static str>,
    pub positions: BTreeSet<String>,
    pub x: Metric,
    pub y: Metric,
}

impl Selection {
    /// Everything present in `rows`, usage rate against true shooting
    pub fn all(rows: &[PlayerStatRow]) -> Self {
        Selection {
            teams: available_teams(rows).into_iter().collect(),
            positions: available_positions(rows).into_iter().collect(),
            x: Metric::UsageRate,
            y: Metric::TrueShootingPct,
        }
    }

    /// Narrow a default selection with user input. Empty lists keep the default.
    pub fn from_args(
        rows: &[PlayerStatRow],
        teams: &[String],
        positions: &[String],
        x: Option<&str>,
        y: Option<&str>,
    ) -> Result<Self> {
        let mut selection = Self::all(rows);

        if !teams.is_empty() {
            selection.teams = teams
                .iter()
                .map(|t| {
                    resolve_team(t).ok_or_else(|| {
                        PlayStatsError::InvalidInput(format!("unknown team '{}'", t))
                    })
                })
                .collect::<Result<_>>()?;
        }
        if !positions.is_empty() {
            selection.positions = positions.iter().map(|p| p.trim().to_string()).collect();
        }
        if let Some(x) = x {
            selection.x = x.parse()?;
        }
        if let Some(y) = y {
            selection.y = y.parse()?;
        }
        Ok(selection)
    }

    pub fn matches(&self, row: &PlayerStatRow) -> bool {
        row.team_full().is_some_and(|t| self.teams.contains(t)) && self.positions.contains(&row.pos)
    }

    pub fn apply<'a>(&self, rows: &'a [PlayerStatRow]) -> Vec<&'a PlayerStatRow> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sorted unique team display names; unmapped codes are left out
pub fn available_teams(rows: &[PlayerStatRow]) -> Vec<&'static str> {
    rows.iter()
        .filter_map(PlayerStatRow::team_full)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn available_positions(rows: &[PlayerStatRow]) -> Vec<String> {
    rows.iter()
        .map(|r| r.pos.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One line of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub player: String,
    pub team: String,
    pub pos: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Filtered rows sorted by the y metric, highest first.
///
/// Rows with an undefined y value take no part in the ordering; they follow
/// the defined rows in their input order.
pub fn ranked_table(rows: &[PlayerStatRow], selection: &Selection) -> Vec<TableRow> {
    let mut table: Vec<TableRow> = selection
        .apply(rows)
        .into_iter()
        .map(|r| TableRow {
            player: r.player.clone(),
            team: r.team_full().unwrap_or_default().to_string(),
            pos: r.pos.clone(),
            x: r.value(selection.x),
            y: r.value(selection.y),
        })
        .collect();

    // Stable sort keeps input order among ties and among undefined rows
    table.sort_by(|a, b| match (a.y, b.y) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    table
}

/// A plottable point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub player: String,
    pub team: String,
    pub pos: String,
    pub x: f64,
    pub y: f64,
}

/// Points for rows where both axes are defined
pub fn scatter_points(rows: &[PlayerStatRow], selection: &Selection) -> Vec<ScatterPoint> {
    selection
        .apply(rows)
        .into_iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                player: r.player.clone(),
                team: r.team_full()?.to_string(),
                pos: r.pos.clone(),
                x: r.value(selection.x)?,
                y: r.value(selection.y)?,
            })
        })
        .collect()
}

/// Chart title for a selection
pub fn chart_title(selection: &Selection) -> String {
    format!(
        "{} vs {} by Team and Position",
        selection.y.label(),
        selection.x.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::derive::derive_row;

    fn player(name: &str, team: &str, pos: &str, pts: f64, fga: f64) -> PlayerStatRow {
        let mut row = PlayerStatRow {
            player: name.to_string(),
            team: team.to_string(),
            pos: pos.to_string(),
            pts: Some(pts),
            fga: Some(fga),
            fta: Some(0.0),
            tov: Some(0.0),
            mp: Some(1000.0),
            fg: Some(fga / 2.0),
            three_p: Some(0.0),
            ..PlayerStatRow::default()
        };
        derive_row(&mut row);
        row
    }

    fn rows() -> Vec<PlayerStatRow> {
        vec![
            player("A", "BOS", "PG", 500.0, 500.0),
            player("B", "GSW", "C", 800.0, 500.0),
            player("C", "2TM", "PG", 900.0, 500.0),
            player("D", "GSW", "PG", 0.0, 0.0),
            player("E", "BOS", "C", 600.0, 500.0),
        ]
    }

    #[test]
    fn test_default_selection() {
        let rows = rows();
        let selection = Selection::all(&rows);
        assert_eq!(
            selection.teams.iter().copied().collect::<Vec<_>>(),
            vec!["Boston Celtics (BOS)", "Golden State Warriors (GSW)"]
        );
        assert_eq!(selection.positions.len(), 2);
        assert_eq!(selection.x, Metric::UsageRate);
        assert_eq!(selection.y, Metric::TrueShootingPct);
    }

    #[test]
    fn test_unmapped_team_never_selected() {
        let rows = rows();
        let selection = Selection::all(&rows);
        let names: Vec<_> = selection.apply(&rows).iter().map(|r| r.player.as_str()).collect();
        assert!(!names.contains(&"C"));
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_ranked_table_descending_undefined_last() {
        let rows = rows();
        let selection = Selection::all(&rows);
        let table = ranked_table(&rows, &selection);

        let order: Vec<_> = table.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(order, vec!["B", "E", "A", "D"]);
        assert_eq!(table[3].y, None);
        assert_eq!(table[0].team, "Golden State Warriors (GSW)");
    }

    #[test]
    fn test_nan_cell_sorts_as_undefined() {
        let mut rows = rows();
        rows[0].fg_pct = Some(0.40);
        rows[1].fg_pct = Some(f64::NAN);
        rows[3].fg_pct = Some(0.50);
        rows[4].fg_pct = Some(f64::INFINITY);
        let selection = Selection::from_args(&rows, &[], &[], None, Some("FG%")).unwrap();

        let table = ranked_table(&rows, &selection);
        let order: Vec<_> = table.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(order, vec!["D", "A", "B", "E"]);
        assert_eq!(table[2].y, None);
        assert_eq!(table[3].y, None);

        let points = scatter_points(&rows, &selection);
        let names: Vec<_> = points.iter().map(|p| p.player.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[test]
    fn test_scatter_drops_undefined() {
        let rows = rows();
        let selection = Selection::all(&rows);
        let points = scatter_points(&rows, &selection);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_from_args() {
        let rows = rows();
        let selection = Selection::from_args(
            &rows,
            &["gsw".to_string()],
            &["C".to_string()],
            Some("Points Per Season"),
            Some("eFG%"),
        )
        .unwrap();

        let table = ranked_table(&rows, &selection);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].player, "B");
        assert_eq!(table[0].x, Some(800.0));
        assert_eq!(
            chart_title(&selection),
            "Effective FG % vs Points Per Season by Team and Position"
        );
    }

    #[test]
    fn test_from_args_unknown_team() {
        let rows = rows();
        let err = Selection::from_args(&rows, &["SEA".to_string()], &[], None, None).unwrap_err();
        assert!(matches!(err, PlayStatsError::InvalidInput(_)));
    }
}

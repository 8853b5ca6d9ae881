//! Derived shooting and usage ratios

use super::dataset::PlayerStatRow;

/// Rows need strictly more minutes than this to stay in the dataset
pub const MIN_MINUTES: f64 = 500.0;

/// Free-throw attempt weight in possession estimates
const FTA_WEIGHT: f64 = 0.44;

/// Divide, treating any non-finite result as undefined
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// TS% = PTS / (2 × (FGA + 0.44 × FTA))
pub fn true_shooting(pts: Option<f64>, fga: Option<f64>, fta: Option<f64>) -> Option<f64> {
    ratio(pts?, 2.0 * (fga? + FTA_WEIGHT * fta?))
}

/// USG% proxy = (FGA + 0.44 × FTA + TOV) / MP
pub fn usage_rate(
    fga: Option<f64>,
    fta: Option<f64>,
    tov: Option<f64>,
    mp: Option<f64>,
) -> Option<f64> {
    ratio(fga? + FTA_WEIGHT * fta? + tov?, mp?)
}

/// eFG% = (FG + 0.5 × 3P) / FGA
pub fn effective_fg(fg: Option<f64>, three_p: Option<f64>, fga: Option<f64>) -> Option<f64> {
    ratio(fg? + 0.5 * three_p?, fga?)
}

/// Fill the three derived columns of a row
pub fn derive_row(row: &mut PlayerStatRow) {
    row.ts_pct = true_shooting(row.pts, row.fga, row.fta);
    row.usg_pct = usage_rate(row.fga, row.fta, row.tov, row.mp);
    row.efg_pct = effective_fg(row.fg, row.three_p, row.fga);
}

/// Keep rows with more than `min_minutes` played. Rows without minutes are dropped.
pub fn filter_min_minutes(rows: Vec<PlayerStatRow>, min_minutes: f64) -> Vec<PlayerStatRow> {
    rows.into_iter()
        .filter(|r| r.mp.is_some_and(|mp| mp > min_minutes))
        .collect()
}

/// Derive all ratios, then apply the minutes gate once
pub fn prepare(mut rows: Vec<PlayerStatRow>, min_minutes: f64) -> Vec<PlayerStatRow> {
    rows.iter_mut().for_each(derive_row);
    let before = rows.len();
    let rows = filter_min_minutes(rows, min_minutes);
    log::info!(
        "Kept {} of {} rows with more than {} minutes",
        rows.len(),
        before,
        min_minutes
    );
    rows
}

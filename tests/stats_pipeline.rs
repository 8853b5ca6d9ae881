use playstats::stats::dataset::load_from_reader;
use playstats::stats::derive::{prepare, MIN_MINUTES};
use playstats::stats::present::{available_teams, chart_title};
use playstats::stats::{ranked_table, scatter_points, Metric, Selection};

const SEASON: &str = "\
Player,Team,Pos,MP,FG,FGA,FG%,3P,3P%,FT%,FTA,ORB,DRB,TRB,AST,STL,BLK,TOV,PTS
Ava Stone,BOS,SF,2000,500,1000,0.5,100,0.35,0.8,200,50,300,350,200,60,40,150,1400
Ben Carter,LAL,PG,1500,300,700,0.43,80,0.33,0.85,100,20,150,170,400,70,10,120,800
Cal Reyes,BOS,C,400,100,180,0.55,0,,0.6,60,40,90,130,20,10,30,25,240
Dee Park,2TM,SF,1800,350,800,0.44,120,0.37,0.9,150,15,200,215,150,40,12,90,1000
Eli Moss,LAL,C,900,0,0,,0,,,0,10,20,30,5,3,8,0,0
";

fn season() -> Vec<playstats::stats::PlayerStatRow> {
    let rows = load_from_reader(SEASON.as_bytes()).unwrap();
    prepare(rows, MIN_MINUTES)
}

#[test]
fn test_minutes_gate_and_derived_ratios() {
    let rows = season();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.player != "Cal Reyes"));

    let ava = &rows[0];
    let ts = ava.value(Metric::TrueShootingPct).unwrap();
    assert!((ts - 1400.0 / 2176.0).abs() < 1e-9);

    let eli = rows.iter().find(|r| r.player == "Eli Moss").unwrap();
    assert_eq!(eli.value(Metric::TrueShootingPct), None);
}

#[test]
fn test_default_table_ranks_by_true_shooting() {
    let rows = season();
    let selection = Selection::all(&rows);
    assert_eq!(
        available_teams(&rows),
        vec!["Boston Celtics (BOS)", "Los Angeles Lakers (LAL)"]
    );

    let table = ranked_table(&rows, &selection);
    let players: Vec<&str> = table.iter().map(|r| r.player.as_str()).collect();
    // Multi-team rows have no display name and never match a team filter
    assert_eq!(players, vec!["Ava Stone", "Ben Carter", "Eli Moss"]);
    assert_eq!(table[2].y, None);

    let points = scatter_points(&rows, &selection);
    assert_eq!(points.len(), 2);
    assert_eq!(
        chart_title(&selection),
        "True Shooting % vs Usage Rate (Proxy) by Team and Position"
    );
}

#[test]
fn test_user_selection() {
    let rows = season();
    let selection = Selection::from_args(
        &rows,
        &["lal".to_string()],
        &[],
        Some("AST"),
        Some("Points Per Season"),
    )
    .unwrap();

    let table = ranked_table(&rows, &selection);
    assert_eq!(table.len(), 2);
    assert_eq!(table[0].player, "Ben Carter");
    assert_eq!(table[0].team, "Los Angeles Lakers (LAL)");
    assert_eq!(table[0].x, Some(400.0));

    let err = Selection::from_args(&rows, &[], &[], Some("Wingspan"), None);
    assert!(err.is_err());
}

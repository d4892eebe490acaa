//! End-to-end tests for the dugout binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

use dugout_core::{
    HomeParkEdge, ManagedEdge, Manager, Park, PerformanceEdge, PerformanceKind, Player, RecordSet,
    Team, TeamId, TeamSeason, TeamSeasonId,
};

fn ts_id(team: &str, year: u16) -> TeamSeasonId {
    TeamSeasonId::new(&TeamId::new(team), year)
}

/// Write a small record file: Devers and Casas together on BOS-2023,
/// Verdugo bridging BOS-2023 and NYY-2024, Judge on NYY-2024 only.
fn write_records(dir: &TempDir) -> PathBuf {
    let mut records = RecordSet::default();

    for (id, name) in [
        ("devera01", "Rafael Devers"),
        ("casastr01", "Triston Casas"),
        ("verduwi01", "Alex Verdugo"),
        ("judgeaa01", "Aaron Judge"),
    ] {
        records.players.push(Player::new(id, name));
    }
    records.teams.push(Team::new("BOS", "Boston Red Sox", "AL"));
    records.teams.push(Team::new("NYY", "New York Yankees", "AL"));

    let mut bos = TeamSeason::new("BOS", 2023);
    bos.wins = 78;
    bos.losses = 84;
    bos.division = "E".into();
    bos.rank = 5;
    records.team_seasons.push(bos);
    records.team_seasons.push(TeamSeason::new("NYY", 2024));

    records.managers.push(Manager::new("coraal01", "Alex Cora"));
    records.parks.push(Park::new("BOS07", "Fenway Park"));

    for (player, team, year) in [
        ("devera01", "BOS", 2023),
        ("casastr01", "BOS", 2023),
        ("verduwi01", "BOS", 2023),
        ("verduwi01", "NYY", 2024),
        ("judgeaa01", "NYY", 2024),
    ] {
        records.performance.push(PerformanceEdge::new(
            player,
            ts_id(team, year),
            PerformanceKind::BattedFor,
        ));
    }
    records
        .managed
        .push(ManagedEdge::new("coraal01", ts_id("BOS", 2023)));
    records
        .home_parks
        .push(HomeParkEdge::new(ts_id("BOS", 2023), "BOS07"));

    let path = dir.path().join("records.json");
    std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();
    path
}

fn dugout() -> Command {
    Command::cargo_bin("dugout").unwrap()
}

#[test]
fn test_requires_a_graph_source() {
    dugout()
        .args(["teammates", "devera01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--records or --snapshot"));
}

#[test]
fn test_records_and_snapshot_are_exclusive() {
    dugout()
        .args([
            "--records",
            "a.json",
            "--snapshot",
            "b.json",
            "teammates",
            "devera01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn test_teammates_table_output() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["teammates", "devera01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Triston Casas"))
        .stdout(predicate::str::contains("Alex Verdugo"))
        .stdout(predicate::str::contains("Aaron Judge").not());
}

#[test]
fn test_connection_crosses_teams() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["connection", "devera01", "judgeaa01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "devera01 -> verduwi01 -> judgeaa01 (2 hops)",
        ));
}

#[test]
fn test_connection_respects_hop_bound() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["connection", "devera01", "judgeaa01", "--max-hops", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No connection"));
}

#[test]
fn test_unknown_player_fails() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["teammates", "nobody99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nobody99"));
}

#[test]
fn test_team_roster_json() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    let output = dugout()
        .arg("--records")
        .arg(&records)
        .args(["--format", "json", "team", "roster", "BOS", "2023"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let roster: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = roster
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alex Verdugo", "Rafael Devers", "Triston Casas"]);
}

#[test]
fn test_team_staff_output() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["team", "staff", "BOS", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Cora"))
        .stdout(predicate::str::contains("Fenway Park"));
}

#[test]
fn test_managers_overlap() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["managers", "devera01", "casastr01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Cora"));

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["managers", "devera01", "judgeaa01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("never played under"));
}

#[test]
fn test_players_multi_team() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);

    dugout()
        .arg("--records")
        .arg(&records)
        .args(["players", "multi-team"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alex Verdugo"))
        .stdout(predicate::str::contains("Rafael Devers").not());
}

#[test]
fn test_export_then_query_snapshot() {
    let dir = TempDir::new().unwrap();
    let records = write_records(&dir);
    let snapshot = dir.path().join("snapshot.json");

    dugout()
        .arg("--records")
        .arg(&records)
        .arg("export")
        .arg("--output")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported"));

    dugout()
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["connection", "devera01", "judgeaa01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 hops)"));
}

#[test]
fn test_completions_need_no_graph() {
    dugout()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dugout"));
}

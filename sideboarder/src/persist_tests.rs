//! Tests for guide export and import.

use super::*;
use crate::deck::namespace;
use mtg_common::parse_decklist;
use serde_json::json;
use tempfile::TempDir;

fn id(raw: &str) -> CardId {
    CardId::parse(raw).unwrap()
}

fn burn_deck() -> Deck {
    namespace(
        &parse_decklist("4 Lightning Bolt\n2 Monastery Swiftspear"),
        &parse_decklist("3 Prismatic Ending\n2 Path to Exile"),
    )
    .0
}

fn row(deck: &Deck, name: &str, outs: &[(&str, u32)], ins: &[(&str, u32)]) -> MatchupRow {
    let outs: Selections = outs.iter().map(|(c, q)| (id(c), *q)).collect();
    let ins: Selections = ins.iter().map(|(c, q)| (id(c), *q)).collect();
    build_row(deck, name, &outs, &ins).unwrap().row
}

fn sample() -> (Deck, Vec<MatchupRow>) {
    let deck = burn_deck();
    let matchups = vec![
        row(&deck, "Burn", &[("MB:Lightning Bolt", 2)], &[("SB:Prismatic Ending", 2)]),
        row(&deck, "Tron", &[("MB:Monastery Swiftspear", 1)], &[("SB:Path to Exile", 2)]),
    ];
    (deck, matchups)
}

mod export_tests {
    use super::*;

    #[test]
    fn records_follow_insertion_order() {
        let (deck, matchups) = sample();
        let guide = SavedGuide::export(&deck, &matchups);

        let names: Vec<&str> = guide.matrix.iter().map(|r| r.matchup.as_str()).collect();
        assert_eq!(names, vec!["Burn", "Tron"]);
        assert_eq!(guide.deck_data, deck);
    }

    #[test]
    fn records_span_every_referenced_column() {
        let (deck, matchups) = sample();
        let guide = SavedGuide::export(&deck, &matchups);

        let burn = &guide.matrix[0];
        assert_eq!(
            burn.cells,
            vec![
                (id("MB:Lightning Bolt"), "-2".to_string()),
                (id("MB:Monastery Swiftspear"), String::new()),
                (id("SB:Path to Exile"), String::new()),
                (id("SB:Prismatic Ending"), "+2".to_string()),
            ]
        );
    }

    #[test]
    fn json_puts_matchup_field_first() {
        let (deck, matchups) = sample();
        let json = SavedGuide::export(&deck, &matchups).to_json_pretty().unwrap();

        let matchup_pos = json.find("\"Matchup\": \"Burn\"").unwrap();
        let bolt_pos = json.find("\"MB:Lightning Bolt\": \"-2\"").unwrap();
        assert!(matchup_pos < bolt_pos);
        assert!(json.contains("\"deck_data\""));
        assert!(json.contains("\"SB:Prismatic Ending\": 3"));
    }

    #[test]
    fn empty_collection_exports_empty_matrix() {
        let deck = burn_deck();
        let guide = SavedGuide::export(&deck, &[]);
        let value: Value = serde_json::from_str(&guide.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["matrix"], json!([]));
    }
}

mod import_tests {
    use super::*;

    #[test]
    fn round_trip_preserves_deck_and_matchups() {
        let (deck, matchups) = sample();
        let json = SavedGuide::export(&deck, &matchups).to_json_pretty().unwrap();

        let imported = import_guide(&json).unwrap();
        assert_eq!(imported.deck, deck);
        assert_eq!(imported.matchups, matchups);
    }

    #[test]
    fn labels_are_rebuilt_from_identifiers() {
        let (deck, matchups) = sample();
        let json = SavedGuide::export(&deck, &matchups).to_json_pretty().unwrap();

        let imported = import_guide(&json).unwrap();
        assert_eq!(imported.labels.len(), 4);
        assert_eq!(imported.labels.get(&id("MB:Lightning Bolt")), "Lightning Bolt");
        assert_eq!(imported.labels.get(&id("SB:Path to Exile")), "Path to Exile");
    }

    #[test]
    fn null_cells_are_untouched() {
        let json = json!({
            "deck_data": {
                "mainboard": {"MB:Lightning Bolt": 4},
                "sideboard": {"SB:Prismatic Ending": 3}
            },
            "matrix": [
                {"Matchup": "Burn", "MB:Lightning Bolt": "-2", "SB:Prismatic Ending": null}
            ]
        })
        .to_string();

        let imported = import_guide(&json).unwrap();
        let burn = &imported.matchups[0];
        assert_eq!(burn.get(&id("MB:Lightning Bolt")), Some(Adjustment::Out(2)));
        assert!(!burn.references(&id("SB:Prismatic Ending")));
    }

    #[test]
    fn rejects_empty_cell_under_malformed_column() {
        let json = json!({
            "deck_data": {"mainboard": {"MB:Lightning Bolt": 4}, "sideboard": {}},
            "matrix": [{"Matchup": "Burn", "MB:Lightning Bolt": "-2", "garbage": ""}]
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::CardId(_))));
    }

    #[test]
    fn rejects_empty_cell_for_card_outside_deck() {
        let json = json!({
            "deck_data": {"mainboard": {"MB:Lightning Bolt": 4}, "sideboard": {}},
            "matrix": [{"Matchup": "Burn", "MB:Lightning Bolt": "-2", "MB:Nope": null}]
        })
        .to_string();

        match import_guide(&json).unwrap_err() {
            Error::Import(msg) => assert!(msg.contains("MB:Nope"), "{msg}"),
            other => panic!("expected import error, got {other:?}"),
        }
    }

    #[test]
    fn missing_matrix_means_no_matchups() {
        let json = r#"{"deck_data": {"mainboard": {"MB:Lightning Bolt": 4}, "sideboard": {}}}"#;
        let imported = import_guide(json).unwrap();
        assert!(imported.matchups.is_empty());
    }

    #[test]
    fn rejects_malformed_cell() {
        let json = json!({
            "deck_data": {
                "mainboard": {"MB:Lightning Bolt": 4},
                "sideboard": {"SB:Prismatic Ending": 3}
            },
            "matrix": [
                {"Matchup": "Burn", "MB:Lightning Bolt": "2"}
            ]
        })
        .to_string();

        let err = import_guide(&json).unwrap_err();
        assert!(matches!(err, Error::Import(_)));
    }

    #[test]
    fn rejects_numeric_cell() {
        let json = json!({
            "deck_data": {"mainboard": {"MB:Lightning Bolt": 4}, "sideboard": {}},
            "matrix": [{"Matchup": "Burn", "MB:Lightning Bolt": -2}]
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::Import(_))));
    }

    #[test]
    fn rejects_row_exceeding_deck_quantity() {
        let json = json!({
            "deck_data": {
                "mainboard": {"MB:Lightning Bolt": 4},
                "sideboard": {"SB:Prismatic Ending": 3}
            },
            "matrix": [
                {"Matchup": "Burn", "MB:Lightning Bolt": "-2"},
                {"Matchup": "Tron", "MB:Lightning Bolt": "-5"}
            ]
        })
        .to_string();

        let err = import_guide(&json).unwrap_err();
        match err {
            Error::Import(msg) => assert!(msg.contains("row 2"), "{msg}"),
            other => panic!("expected import error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_adjustment_in_wrong_zone() {
        let json = json!({
            "deck_data": {
                "mainboard": {"MB:Lightning Bolt": 4},
                "sideboard": {"SB:Prismatic Ending": 3}
            },
            "matrix": [{"Matchup": "Burn", "SB:Prismatic Ending": "-1"}]
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::Import(_))));
    }

    #[test]
    fn rejects_row_without_name() {
        let json = json!({
            "deck_data": {"mainboard": {"MB:Lightning Bolt": 4}, "sideboard": {}},
            "matrix": [{"MB:Lightning Bolt": "-1"}]
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::Import(_))));
    }

    #[test]
    fn rejects_card_listed_in_wrong_zone() {
        let json = json!({
            "deck_data": {"mainboard": {"SB:Prismatic Ending": 3}, "sideboard": {}},
            "matrix": []
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::Import(_))));
    }

    #[test]
    fn rejects_zero_quantity() {
        let json = json!({
            "deck_data": {"mainboard": {"MB:Lightning Bolt": 0}, "sideboard": {}},
            "matrix": []
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::Import(_))));
    }

    #[test]
    fn rejects_unprefixed_identifier() {
        let json = json!({
            "deck_data": {"mainboard": {"Lightning Bolt": 4}, "sideboard": {}},
            "matrix": []
        })
        .to_string();

        assert!(matches!(import_guide(&json), Err(Error::Json(_))));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(import_guide("{not json"), Err(Error::Json(_))));
    }
}

mod file_tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("guide.json");
        let (deck, matchups) = sample();

        save_guide(&path, &deck, &matchups).unwrap();
        let imported = load_guide(&path).unwrap();

        assert_eq!(imported.deck, deck);
        assert_eq!(imported.matchups, matchups);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_guide(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn dated_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(file_name_for(date, "json"), "sideboarder_2024-05-01.json");
        assert_eq!(file_name_for(date, "png"), "sideboarder_2024-05-01.png");
    }

    #[test]
    fn default_file_name_has_extension() {
        let name = default_file_name("json");
        assert!(name.starts_with("sideboarder_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "sideboarder_2024-05-01.json".len());
    }
}

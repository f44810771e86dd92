//! Integration tests for loading hands and projecting them onto the table

#[cfg(test)]
mod hand_projection_tests {
    use hand_replay::{
        AmountFormat, Hand, HandError, SeatLabel, Street, format_amount, hand::project,
    };
    use std::fs;
    use tempfile::TempDir;

    const HAND_JSON: &str = r#"{
        "id": "hh-20240312-0042",
        "table_name": "Zoom 6-max",
        "played_at": "2024-03-12T21:04:11Z",
        "big_blind": 20,
        "dealer": "BTN",
        "players": [
            { "name": "hero",  "seat": "BTN", "stack": 2000, "hole_cards": ["Ah", "Kh"], "is_hero": true },
            { "name": "sb",    "seat": "SB",  "stack": 1500, "hole_cards": [] },
            { "name": "bb",    "seat": "BB",  "stack": 3000, "hole_cards": ["Qs", "??"] },
            { "name": "utg",   "seat": "UTG", "stack": 2500 }
        ],
        "board": ["2h", "7h", "Td", "Jh", "3c"],
        "actions": [
            { "index": 0, "street": "preflop", "actor": "sb",   "kind": "bet",   "amount": 10, "description": "sb posts small blind" },
            { "index": 1, "street": "preflop", "actor": "bb",   "kind": "bet",   "amount": 20, "description": "bb posts big blind" },
            { "index": 2, "street": "preflop", "actor": "utg",  "kind": "fold" },
            { "index": 3, "street": "preflop", "actor": "hero", "kind": "raise", "amount": 60 },
            { "index": 4, "street": "preflop", "actor": "sb",   "kind": "fold" },
            { "index": 5, "street": "preflop", "actor": "bb",   "kind": "call",  "amount": 40 },
            { "index": 6, "street": "flop",    "actor": "bb",   "kind": "check" },
            { "index": 7, "street": "flop",    "actor": "hero", "kind": "bet",   "amount": 80 },
            { "index": 8, "street": "flop",    "actor": "bb",   "kind": "call",  "amount": 80 },
            { "index": 9, "street": "turn",    "actor": "bb",   "kind": "all-in", "amount": 5000 }
        ]
    }"#;

    fn load() -> Hand {
        Hand::from_json_str(HAND_JSON).unwrap()
    }

    #[test]
    fn test_fixture_loads() {
        let hand = load();
        assert_eq!(hand.total(), 10);
        assert_eq!(hand.players.len(), 4);
        assert!(hand.played_at.is_some());
        assert!(hand.player("hero").unwrap().is_hero);
    }

    #[test]
    fn test_preflop_projection() {
        let hand = load();
        let table = project(&hand, 5);

        assert_eq!(table.street, Street::Preflop);
        assert_eq!(table.pot, 10 + 20 + 60 + 40);
        assert!(table.board.is_empty());
        assert!(table.player("utg").unwrap().is_folded);
        assert!(table.player("sb").unwrap().is_folded);
        assert!(table.player("bb").unwrap().is_active);
        assert_eq!(table.player("bb").unwrap().current_bet, 60);
        assert_eq!(table.player("hero").unwrap().stack, 1940);
    }

    #[test]
    fn test_flop_reveals_three_cards_and_resets_bets() {
        let hand = load();
        let table = project(&hand, 6);

        assert_eq!(table.street, Street::Flop);
        assert_eq!(table.board.len(), 3);
        assert_eq!(table.board[0].to_string(), "2♥");
        assert!(table.players.iter().all(|p| p.current_bet == 0));
    }

    #[test]
    fn test_all_in_is_capped_by_stack() {
        let hand = load();
        let table = project(&hand, 9);

        let bb = table.player("bb").unwrap();
        assert_eq!(bb.stack, 0);
        assert_eq!(table.board.len(), 4);
        assert_eq!(table.pot, 130 + 160 + (3000 - 60 - 80));
    }

    #[test]
    fn test_invalid_hole_cards_are_dropped() {
        let table = project(&load(), 0);
        assert_eq!(table.player("bb").unwrap().cards.len(), 1);
        assert_eq!(table.player("hero").unwrap().cards.len(), 2);
        assert!(table.player("utg").unwrap().cards.is_empty());
    }

    #[test]
    fn test_players_sorted_by_seat() {
        let table = project(&load(), 0);
        let seats: Vec<SeatLabel> = table.players.iter().map(|p| p.seat).collect();
        let mut sorted = seats.clone();
        sorted.sort();
        assert_eq!(seats, sorted);
        assert_eq!(table.dealer, SeatLabel::Btn);
    }

    #[test]
    fn test_index_past_end_is_clamped() {
        let hand = load();
        assert_eq!(project(&hand, 500), project(&hand, 9));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hand.json");
        fs::write(&path, HAND_JSON).unwrap();

        let hand = Hand::load(&path).unwrap();
        assert_eq!(hand.id, "hh-20240312-0042");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Hand::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, HandError::Io { .. }));
    }

    #[test]
    fn test_rejects_gapped_indexes() {
        let json = HAND_JSON.replace(r#""index": 9"#, r#""index": 12"#);
        let err = Hand::from_json_str(&json).unwrap_err();
        assert!(matches!(
            err,
            HandError::NonSequentialIndex { position: 9, index: 12 }
        ));
    }

    #[test]
    fn test_amounts_in_both_formats() {
        let hand = load();
        let pot = project(&hand, 8).pot;
        assert_eq!(format_amount(pot, AmountFormat::Bb, hand.big_blind), "14.5bb");
        assert_eq!(format_amount(pot, AmountFormat::Eur, hand.big_blind), "2.90€");
    }
}

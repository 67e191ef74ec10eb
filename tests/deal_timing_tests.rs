// tests/deal_timing_tests.rs
//
// Проверяем:
//
// 1) План раздачи:
//    - R*K карт в порядке (p, c);
//    - delay = p*0.15 + c*0.10, все задержки различны;
//    - точки назначения/центр переносятся как есть.
//
// 2) Общая длительность:
//    - Legacy: R * 3 * 0.15 + 0.5 бит-в-бит;
//    - Exact: последняя карта + полёт.
//
// 3) Конфиг тайминга из JSON + валидация.

use std::collections::HashSet;
use std::time::Duration;

use card_table::deal::{
    CardsPerRecipient, DealConfigError, DealTiming, FlightPlan, TimingProfile,
};
use card_table::domain::{Point, RecipientId};

fn destinations(n: usize) -> Vec<(RecipientId, Point)> {
    (0..n)
        .map(|i| (RecipientId::new(format!("p{i}")), Point::new(i as f64 * 10.0, 5.0)))
        .collect()
}

#[test]
fn plan_has_r_times_k_units_in_player_card_order() {
    let timing = DealTiming::standard();
    let origin = Point::new(500.0, 300.0);
    let plan = FlightPlan::build(origin, &destinations(4), CardsPerRecipient::STANDARD, &timing);

    assert_eq!(plan.len(), 12);

    let order: Vec<(usize, usize)> = plan
        .units
        .iter()
        .map(|u| (u.recipient_index, u.card_index))
        .collect();
    let expected: Vec<(usize, usize)> = (0..4).flat_map(|p| (0..3).map(move |c| (p, c))).collect();
    assert_eq!(order, expected);

    for u in &plan.units {
        assert_eq!(u.origin, origin);
        assert_eq!(u.destination, Point::new(u.recipient_index as f64 * 10.0, 5.0));
        assert_eq!(u.recipient_id, RecipientId::new(format!("p{}", u.recipient_index)));
        assert_eq!(u.duration, Duration::from_millis(500));
    }
}

#[test]
fn delays_follow_stagger_formula_and_are_distinct() {
    let timing = DealTiming::standard();
    let plan = FlightPlan::build(Point::ORIGIN, &destinations(6), CardsPerRecipient::STANDARD, &timing);

    for u in &plan.units {
        let expected_ms = u.recipient_index as u64 * 150 + u.card_index as u64 * 100;
        assert_eq!(u.delay, Duration::from_millis(expected_ms));

        let secs = u.recipient_index as f64 * 0.15 + u.card_index as f64 * 0.10;
        assert!((u.delay.as_secs_f64() - secs).abs() < 1e-9);
    }

    let distinct: HashSet<Duration> = plan.units.iter().map(|u| u.delay).collect();
    assert_eq!(distinct.len(), plan.len());
}

#[test]
fn delays_monotonic_in_player_and_card() {
    let timing = DealTiming::standard();
    let plan = FlightPlan::build(Point::ORIGIN, &destinations(5), CardsPerRecipient::STANDARD, &timing);

    for c in 0..3 {
        let column: Vec<Duration> = plan
            .units
            .iter()
            .filter(|u| u.card_index == c)
            .map(|u| u.delay)
            .collect();
        assert!(column.windows(2).all(|w| w[0] <= w[1]));
    }

    for p in 0..5 {
        let row: Vec<Duration> = plan
            .units
            .iter()
            .filter(|u| u.recipient_index == p)
            .map(|u| u.delay)
            .collect();
        assert!(row.windows(2).all(|w| w[0] < w[1]));
    }
}

/// Legacy: R * 3 * 0.15 + 0.5, не зависит от K.
#[test]
fn legacy_total_duration_bit_exact() {
    let timing = DealTiming::standard();
    assert_eq!(timing.profile, TimingProfile::Legacy);

    for r in 0..10usize {
        let plan = FlightPlan::build(Point::ORIGIN, &destinations(r), CardsPerRecipient::STANDARD, &timing);
        assert_eq!(plan.total_duration, Duration::from_millis(r as u64 * 450 + 500));
    }

    // K=7: Legacy всё равно считает по 3 слотам и недооценивает хвост.
    let seven = CardsPerRecipient::new(7).unwrap();
    let plan = FlightPlan::build(Point::ORIGIN, &destinations(1), seven, &timing);
    assert_eq!(plan.total_duration, Duration::from_millis(950));
    assert_eq!(plan.last_card_finishes_at(), Duration::from_millis(1100));
}

#[test]
fn exact_total_matches_last_card() {
    let timing = DealTiming::exact();

    for r in 1..8usize {
        for k in 1..5usize {
            let cards = CardsPerRecipient::new(k).unwrap();
            let plan = FlightPlan::build(Point::ORIGIN, &destinations(r), cards, &timing);
            assert_eq!(plan.total_duration, plan.last_card_finishes_at());
        }
    }

    let empty = FlightPlan::build(Point::ORIGIN, &[], CardsPerRecipient::STANDARD, &timing);
    assert!(empty.is_empty());
    assert_eq!(empty.total_duration, Duration::ZERO);
}

#[test]
fn units_for_recipient() {
    let timing = DealTiming::standard();
    let plan = FlightPlan::build(Point::ORIGIN, &destinations(3), CardsPerRecipient::STANDARD, &timing);
    let p1 = RecipientId::new("p1");
    let cards: Vec<usize> = plan.units_for(&p1).map(|u| u.card_index).collect();
    assert_eq!(cards, vec![0, 1, 2]);
}

#[test]
fn cards_per_recipient_rejects_zero() {
    assert!(matches!(
        CardsPerRecipient::new(0),
        Err(DealConfigError::ZeroCardsPerRecipient)
    ));
    assert_eq!(CardsPerRecipient::new(2).unwrap().get(), 2);
    assert_eq!(CardsPerRecipient::default(), CardsPerRecipient::STANDARD);
}

#[test]
fn timing_from_json_with_defaults() {
    let t = DealTiming::from_json_str(r#"{ "profile": "Exact" }"#).unwrap();
    assert_eq!(t, DealTiming::exact());

    let t = DealTiming::from_json_str(r#"{ "player_stagger_ms": 200, "flight_ms": 300 }"#).unwrap();
    assert_eq!(t.player_stagger_ms, 200);
    assert_eq!(t.card_stagger_ms, 100);
    assert_eq!(t.flight(), Duration::from_millis(300));

    let json = serde_json::to_string(&DealTiming::standard()).unwrap();
    assert_eq!(DealTiming::from_json_str(&json).unwrap(), DealTiming::standard());
}

#[test]
fn timing_json_validation_errors() {
    assert!(matches!(
        DealTiming::from_json_str(r#"{ "flight_ms": 0 }"#),
        Err(DealConfigError::ZeroFlightDuration)
    ));
    assert!(matches!(
        DealTiming::from_json_str(r#"{ "start_scale": 1.5 }"#),
        Err(DealConfigError::InvalidStartScale(_))
    ));
    assert!(matches!(
        DealTiming::from_json_str(r#"{ "legacy_slot_factor": 4 }"#),
        Err(DealConfigError::LegacySlotFactor(4))
    ));
    // В Exact множитель не участвует.
    assert!(DealTiming::from_json_str(r#"{ "profile": "Exact", "legacy_slot_factor": 4 }"#).is_ok());
    assert!(matches!(
        DealTiming::from_json_str("not json"),
        Err(DealConfigError::Json(_))
    ));
}

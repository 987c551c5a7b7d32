use std::time::Duration;

use shipping_discounts::progress::{render_bar, ProgressBoard};

const FULL: &str = "██████████████████████████████";
const EMPTY: &str = "░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░";

#[test]
fn test_bar_before_any_progress() {
    let bar = render_bar(0, 100, Duration::from_secs(0));

    assert!(bar.starts_with(&format!("Processing |{}|", EMPTY)));
    assert!(bar.contains(" 0.0% (0/100)"));
    assert!(bar.contains("0.0 lines/s"));
    assert!(bar.ends_with("ETA: --"));
}

#[test]
fn test_bar_halfway() {
    let bar = render_bar(50, 100, Duration::from_secs(10));

    let filled = format!("|{}{}|", "█".repeat(15), "░".repeat(15));
    assert!(bar.contains(&filled));
    assert!(bar.contains(" 50.0% (50/100)"));
    assert!(bar.contains(" 5.0 lines/s"));
    assert!(bar.ends_with("ETA: 10s"));
}

#[test]
fn test_bar_complete() {
    let bar = render_bar(100, 100, Duration::from_secs(4));

    assert!(bar.contains(&format!("|{}|", FULL)));
    assert!(bar.contains(" 100.0% (100/100)"));
    assert!(bar.contains(" 25.0 lines/s"));
    assert!(bar.ends_with("ETA: 0s"));
}

#[test]
fn test_bar_for_empty_input_is_full() {
    let bar = render_bar(0, 0, Duration::from_secs(1));

    assert!(bar.contains(&format!("|{}|", FULL)));
    assert!(bar.contains(" 100.0% (0/0)"));
    assert!(bar.ends_with("ETA: --"));
}

#[test]
fn test_bar_clamps_overshoot() {
    let bar = render_bar(150, 100, Duration::from_secs(1));

    assert!(bar.contains(&format!("|{}|", FULL)));
    assert!(bar.contains(" 100.0% (100/100)"));
}

#[test]
fn test_board_slots_never_decrease() {
    let board = ProgressBoard::new(3);

    board.publish(0, 10);
    board.publish(1, 7);
    board.publish(0, 4);
    board.publish(7, 99);

    assert_eq!(board.snapshot(), vec![10, 7, 0]);
    assert_eq!(board.total(), 17);
}

#[test]
fn test_board_reset_clears_every_slot() {
    let board = ProgressBoard::new(2);
    board.publish(0, 5);
    board.publish(1, 6);

    board.reset();

    assert_eq!(board.snapshot(), vec![0, 0]);
    assert_eq!(board.total(), 0);
}

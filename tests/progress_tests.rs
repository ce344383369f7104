//! Tests for the progress bar handle.
//!
//! This file covers the lifecycle operations, the nil handle error log and the
//! label helpers.

use indicatif::{InMemoryTerm, ProgressDrawTarget};
use rand::Rng;
use stepbar::progress::{Options, StepBar, INDETERMINATE};
use stepbar::Error;

mod common;
use common::helpers::*;

#[test]
fn test_advance_tracks_cumulative_sum() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let total: i64 = rng.random_range(1..200);
        let mut bar = create_hidden_bar(total);
        let mut sum: i64 = 0;
        for _ in 0..50 {
            let step: i64 = rng.random_range(-5..=5);
            if sum + step < 0 || sum + step > total {
                continue;
            }
            bar.advance(step).unwrap();
            sum += step;
            assert_eq!(bar.state().unwrap().current, sum as u64);
        }
    }
}

#[test]
fn test_next_matches_single_advance() {
    let mut stepped = create_hidden_bar(10);
    for _ in 0..7 {
        stepped.next().unwrap();
    }
    let mut jumped = create_hidden_bar(10);
    jumped.advance(7).unwrap();

    let a = stepped.state().unwrap();
    let b = jumped.state().unwrap();
    assert_eq!(a.current, b.current);
    assert_eq!(a.percent, b.percent);
    assert_eq!(stepped.is_finished(), jumped.is_finished());
}

#[test]
fn test_set_absolute_position() {
    let mut bar = create_hidden_bar(10);
    bar.advance(3).unwrap();
    bar.set(8).unwrap();
    assert_position(&bar, 8, 10);
    bar.set(2).unwrap();
    assert_position(&bar, 2, 10);
    assert!(bar.is_started());
}

#[test]
fn test_reaching_total_finishes_once() {
    let completions = Counter::new();
    let counter = completions.clone();
    let options = hidden_options().on_completion(move || counter.bump());
    let mut bar = StepBar::with_options(3, options).unwrap();

    bar.advance(3).unwrap();
    assert!(bar.is_finished());
    bar.finish().unwrap();
    assert_eq!(completions.get(), 1);
}

#[test]
fn test_finish_fills_bar() {
    let mut bar = create_hidden_bar(8);
    bar.next().unwrap();
    bar.finish().unwrap();
    assert_position(&bar, 8, 8);
    assert!(bar.is_finished());
    assert!(bar.state().unwrap().finished);
    assert_eq!(bar.state().unwrap().percent, 100.0);
}

#[test]
fn test_clear_on_finish() {
    let mut bar = StepBar::with_options(2, hidden_options().clear_on_finish()).unwrap();
    bar.finish().unwrap();
    assert!(bar.is_finished());
}

#[test]
fn test_exit_keeps_current_state() {
    let mut bar = create_hidden_bar(5);
    bar.advance(2).unwrap();
    bar.exit().unwrap();
    bar.advance(2).unwrap();
    bar.finish().unwrap();
    assert_position(&bar, 2, 5);
    assert!(bar.is_exited());
    assert!(!bar.is_finished());
}

#[test]
fn test_clear_erases_line_until_next_update() {
    let term = InMemoryTerm::new(4, 100);
    let mut bar = create_hidden_bar(10);
    bar.set_draw_target(ProgressDrawTarget::term_like(Box::new(term.clone())))
        .unwrap();

    bar.describe("working").unwrap();
    bar.advance(3).unwrap();
    bar.redraw().unwrap();
    assert!(term.contents().contains("working"));
    assert!(term.contents().contains("30%"));

    bar.clear().unwrap();
    assert!(!term.contents().contains("working"));
    assert_eq!(term.contents().trim(), "");

    bar.next().unwrap();
    bar.redraw().unwrap();
    assert!(term.contents().contains("working"));
    assert!(term.contents().contains("40%"));
}

#[test]
fn test_moving_back_after_completion() {
    let completions = Counter::new();
    let counter = completions.clone();
    let options = hidden_options().on_completion(move || counter.bump());
    let mut bar = StepBar::with_options(4, options).unwrap();

    bar.advance(4).unwrap();
    bar.advance(-1).unwrap();
    assert_position(&bar, 3, 4);
    assert!(bar.is_finished());

    bar.next().unwrap();
    assert_eq!(completions.get(), 1);
}

#[test]
fn test_describe_and_suffix() {
    let mut bar = create_hidden_bar(3);
    bar.describe("X").unwrap();
    bar.suffix("Y").unwrap();
    assert_eq!(bar.state().unwrap().description, "XY");
    bar.suffix("Z").unwrap();
    assert_eq!(bar.state().unwrap().description, "XYZ");
    bar.prefix("reset").unwrap();
    assert_eq!(bar.state().unwrap().description, "reset");
}

#[test]
fn test_detail_rows_roll() {
    let mut bar = StepBar::with_options(3, hidden_options().max_detail_rows(2)).unwrap();
    bar.add_detail("one").unwrap();
    bar.add_detail("two").unwrap();
    bar.add_detail("three").unwrap();
    assert_eq!(bar.details(), ["two", "three"]);
}

#[test]
fn test_details_without_rows_are_printed() {
    let mut bar = create_hidden_bar(3);
    bar.add_detail("printed above").unwrap();
    assert!(bar.details().is_empty());
}

#[test]
fn test_nil_bar_records_errors_in_order() {
    let mut bar = StepBar::new();
    assert!(matches!(bar.advance(1), Err(Error::NilBar)));
    let first = bar.error().expect("one error recorded");
    assert_eq!(first.to_string(), "progress bar is nil");

    assert!(matches!(bar.advance(1), Err(Error::NilBar)));
    let second = bar.error().expect("two errors recorded");
    assert_eq!(second.to_string(), "progress bar is nil; progress bar is nil");
    assert_eq!(bar.errors().len(), 2);

    // Reading does not clear.
    assert_eq!(bar.error().unwrap().to_string(), second.to_string());
}

#[test]
fn test_every_command_fails_on_nil_bar() {
    let mut bar = StepBar::new();
    assert!(bar.next().is_err());
    assert!(bar.set(3).is_err());
    assert!(bar.finish().is_err());
    assert!(bar.exit().is_err());
    assert!(bar.clear().is_err());
    assert!(bar.describe("a").is_err());
    assert!(bar.prefix("a").is_err());
    assert!(bar.suffix("a").is_err());
    assert!(bar.add_detail("a").is_err());
    assert!(bar.probe().is_err());
    assert!(bar.redraw().is_err());
    assert!(bar
        .set_draw_target(ProgressDrawTarget::hidden())
        .is_err());
    assert_eq!(bar.errors().len(), 12);
}

#[test]
fn test_queries_do_not_record() {
    let bar = StepBar::new();
    assert!(!bar.is_finished());
    assert!(!bar.is_started());
    assert!(matches!(bar.state(), Err(Error::NilBar)));
    assert!(bar.to_json().is_err());
    assert!(bar.error().is_none());
}

#[test]
fn test_staged_creation() {
    let bar = StepBar::new()
        .total(4)
        .options(Options::new().hidden().show_count())
        .create()
        .unwrap();
    assert_eq!(bar.total_steps(), 4);
    assert!(bar.config().show_count);
    assert!(!bar.is_started());
}

#[test]
fn test_invalid_total() {
    let err = StepBar::with_options(0, hidden_options()).unwrap_err();
    assert_eq!(err.to_string(), "total must be greater than 0, got 0");
    assert!(StepBar::with_options(INDETERMINATE, hidden_options()).is_ok());
}

#[test]
fn test_spinner_bar() {
    let mut bar = StepBar::with_options(INDETERMINATE, hidden_options().spinner_frames(["a", "b", "c"])).unwrap();
    for _ in 0..12 {
        bar.next().unwrap();
    }
    assert_position(&bar, 12, INDETERMINATE);
    assert!(!bar.is_finished());
    bar.finish().unwrap();
    assert!(bar.is_finished());
    assert_position(&bar, 12, INDETERMINATE);
}

#[test]
fn test_invalid_spinner_frames() {
    let err = StepBar::with_options(INDETERMINATE, hidden_options().spinner_frames(["only"])).unwrap_err();
    assert!(matches!(err, Error::InvalidGlyphs(_)));
}

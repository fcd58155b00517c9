//! Tests for inclusive day spans and the trailing window.

use chrono::NaiveDate;
use clash_engine::{DateSpan, Window};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn span(start: NaiveDate, end: NaiveDate) -> DateSpan {
    DateSpan::new(start, end).expect("start must not be after end")
}

#[test]
fn reversed_bounds_are_not_a_span() {
    assert!(DateSpan::new(date(2026, 3, 2), date(2026, 3, 1)).is_none());
}

#[test]
fn single_day_span_has_length_one() {
    let s = DateSpan::single(date(2026, 3, 1));
    assert_eq!(s.len_days(), 1);
    assert_eq!(s.days().collect::<Vec<_>>(), vec![date(2026, 3, 1)]);
}

#[test]
fn days_are_inclusive_and_ascending() {
    // Crosses a month boundary in a non-leap year.
    let s = span(date(2026, 2, 27), date(2026, 3, 2));
    let days: Vec<_> = s.days().collect();

    assert_eq!(s.len_days(), 4);
    assert_eq!(
        days,
        vec![
            date(2026, 2, 27),
            date(2026, 2, 28),
            date(2026, 3, 1),
            date(2026, 3, 2)
        ]
    );
}

#[test]
fn spans_sharing_a_day_overlap() {
    let a = span(date(2026, 3, 1), date(2026, 3, 5));
    let b = span(date(2026, 3, 5), date(2026, 3, 9));

    assert!(a.overlaps(&b));
    assert_eq!(a.intersect(&b), Some(DateSpan::single(date(2026, 3, 5))));
}

#[test]
fn consecutive_spans_do_not_overlap() {
    let a = span(date(2026, 3, 1), date(2026, 3, 4));
    let b = span(date(2026, 3, 5), date(2026, 3, 9));

    assert!(!a.overlaps(&b));
    assert_eq!(a.intersect(&b), None);
}

#[test]
fn contained_span_intersects_to_itself() {
    let outer = span(date(2026, 3, 1), date(2026, 3, 31));
    let inner = span(date(2026, 3, 10), date(2026, 3, 12));

    assert_eq!(outer.intersect(&inner), Some(inner));
    assert!(outer.contains(date(2026, 3, 31)));
    assert!(!outer.contains(date(2026, 4, 1)));
}

#[test]
fn trailing_window_includes_today() {
    let w = Window::trailing(date(2026, 3, 15), 10);

    assert_eq!(w.start(), date(2026, 3, 5));
    assert_eq!(w.end(), date(2026, 3, 15));
    assert_eq!(w.span().len_days(), 11);
}

#[test]
fn zero_day_window_is_today_only() {
    let w = Window::trailing(date(2026, 3, 15), 0);
    assert_eq!(w.span(), DateSpan::single(date(2026, 3, 15)));
}

#[test]
fn window_crosses_leap_day() {
    let w = Window::trailing(date(2028, 3, 1), 2);
    assert_eq!(w.start(), date(2028, 2, 28));
    assert_eq!(w.span().len_days(), 3);
}

#[test]
fn huge_look_back_clamps_to_earliest_date() {
    let w = Window::trailing(date(2026, 3, 15), u64::MAX);
    assert_eq!(w.start(), NaiveDate::MIN);
}

#[test]
fn clip_trims_both_ends() {
    let w = Window::trailing(date(2026, 3, 15), 10);
    let s = span(date(2026, 2, 20), date(2026, 4, 1));

    assert_eq!(w.clip(&s), Some(w.span()));
}

#[test]
fn clip_discards_span_outside_window() {
    let w = Window::trailing(date(2026, 3, 15), 10);

    let before = span(date(2026, 2, 1), date(2026, 3, 4));
    let after = span(date(2026, 3, 16), date(2026, 3, 20));

    assert_eq!(w.clip(&before), None);
    assert_eq!(w.clip(&after), None);
}

#[test]
fn span_ending_on_max_date_yields_every_day() {
    let start = NaiveDate::MAX.pred_opt().unwrap().pred_opt().unwrap();
    let s = span(start, NaiveDate::MAX);
    let days: Vec<_> = s.days().collect();

    assert_eq!(s.len_days(), 3);
    assert_eq!(days.len(), 3);
    assert_eq!(days.last(), Some(&NaiveDate::MAX));
}

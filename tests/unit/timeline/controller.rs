use super::*;
use crate::timeline::clock::ManualClock;

#[derive(Debug, Default)]
struct Probe {
    synced: Vec<Year>,
    statuses: Vec<PlaybackStatus>,
}

impl SyncTarget for Probe {
    fn sync(&mut self, year: Year) -> RaceResult<()> {
        self.synced.push(year);
        Ok(())
    }

    fn status_changed(&mut self, status: PlaybackStatus, _year: Year) -> RaceResult<()> {
        self.statuses.push(status);
        Ok(())
    }
}

fn controller(start: Year, end: Year) -> TimelineController<ManualClock, Probe> {
    TimelineController::new(
        YearRange::new(start, end).unwrap(),
        PlaybackOptions::default(),
        ManualClock::new(),
        Probe::default(),
    )
    .unwrap()
}

#[test]
fn starts_idle_at_first_year_without_syncing() {
    let c = controller(2000, 2010);
    assert_eq!(c.status(), PlaybackStatus::Idle);
    assert_eq!(c.current_year(), 2000);
    assert!(c.target().synced.is_empty());
}

#[test]
fn three_ticks_advance_three_years_with_four_syncs() {
    let mut c = controller(2000, 2010);
    c.play().unwrap();
    assert_eq!(c.run_for(1500).unwrap(), 3);
    assert_eq!(c.current_year(), 2003);
    assert_eq!(c.target().synced, vec![2000, 2001, 2002, 2003]);
    assert_eq!(c.status(), PlaybackStatus::Playing);
}

#[test]
fn three_ticks_stop_at_end_when_range_is_short() {
    let mut c = controller(2000, 2001);
    c.play().unwrap();
    assert_eq!(c.run_for(1500).unwrap(), 1);
    assert_eq!(c.current_year(), 2001);
    assert_eq!(c.status(), PlaybackStatus::Paused);
    assert_eq!(c.scheduler().active_timers(), 0);
}

#[test]
fn playing_to_the_end_auto_pauses_and_never_overshoots() {
    let mut c = controller(2000, 2007);
    c.play().unwrap();
    c.run_for(60_000).unwrap();
    assert_eq!(c.current_year(), 2007);
    assert_eq!(c.status(), PlaybackStatus::Paused);
    assert!(c.target().synced.iter().all(|&y| y <= 2007));
    assert_eq!(c.timer(), None);
}

#[test]
fn step_size_larger_than_remaining_clamps() {
    let mut c = TimelineController::new(
        YearRange::new(2000, 2004).unwrap(),
        PlaybackOptions {
            step_ms: 100,
            step_size: 3,
        },
        ManualClock::new(),
        Probe::default(),
    )
    .unwrap();
    c.play().unwrap();
    c.run_for(1000).unwrap();
    assert_eq!(c.target().synced, vec![2000, 2003, 2004]);
    assert_eq!(c.status(), PlaybackStatus::Paused);
}

#[test]
fn pause_cancels_pending_tick() {
    let mut c = controller(2000, 2010);
    c.play().unwrap();
    c.run_for(500).unwrap();
    c.pause().unwrap();
    assert_eq!(c.scheduler().active_timers(), 0);
    assert_eq!(c.run_for(10_000).unwrap(), 0);
    assert_eq!(c.current_year(), 2001);
    assert_eq!(c.status(), PlaybackStatus::Paused);
}

#[test]
fn pause_is_idempotent_and_ignored_when_idle() {
    let mut c = controller(2000, 2010);
    c.pause().unwrap();
    assert_eq!(c.status(), PlaybackStatus::Idle);
    c.play().unwrap();
    c.pause().unwrap();
    c.pause().unwrap();
    assert_eq!(c.status(), PlaybackStatus::Paused);
    assert_eq!(c.target().synced.len(), 2);
}

#[test]
fn seek_always_stops_playback() {
    let mut c = controller(2000, 2010);
    c.play().unwrap();
    c.run_for(250).unwrap();
    c.seek(2005).unwrap();
    assert_eq!(c.status(), PlaybackStatus::Paused);
    assert_eq!(c.current_year(), 2005);
    assert_eq!(c.run_for(5_000).unwrap(), 0);
    assert_eq!(c.current_year(), 2005);
    assert_eq!(c.target().synced.last(), Some(&2005));
}

#[test]
fn seek_clamps_out_of_range_years() {
    let mut c = controller(2000, 2010);
    c.seek(1900).unwrap();
    assert_eq!(c.current_year(), 2000);
    c.seek(i64::MAX).unwrap();
    assert_eq!(c.current_year(), 2010);
}

#[test]
fn seek_input_coerces_strings() {
    let mut c = controller(2000, 2010);
    c.seek_input(" 2004 ").unwrap();
    assert_eq!(c.current_year(), 2004);
    // "2010" must compare numerically, not as a string against the bound.
    c.seek_input("2010").unwrap();
    assert_eq!(c.current_year(), 2010);
    assert!(matches!(
        c.seek_input("20x4"),
        Err(RaceError::InvalidInput(_))
    ));
    assert_eq!(c.current_year(), 2010);
}

#[test]
fn toggle_alternates_strictly() {
    let mut c = controller(2000, 2010);
    let mut seen = Vec::new();
    for _ in 0..5 {
        c.toggle().unwrap();
        seen.push(c.status());
    }
    assert_eq!(
        seen,
        vec![
            PlaybackStatus::Playing,
            PlaybackStatus::Paused,
            PlaybackStatus::Playing,
            PlaybackStatus::Paused,
            PlaybackStatus::Playing,
        ]
    );
    assert_eq!(c.scheduler().active_timers(), 1);
}

#[test]
fn play_twice_keeps_a_single_timer() {
    let mut c = controller(2000, 2010);
    c.play().unwrap();
    let id = c.timer();
    c.play().unwrap();
    assert_eq!(c.timer(), id);
    assert_eq!(c.scheduler().active_timers(), 1);
    assert_eq!(c.target().synced.len(), 1);
}

#[test]
fn play_at_end_replays_from_start() {
    let mut c = controller(2000, 2002);
    c.seek(2002).unwrap();
    c.play().unwrap();
    assert_eq!(c.current_year(), 2000);
    assert_eq!(c.status(), PlaybackStatus::Playing);
}

#[test]
fn schedule_failure_reverts_to_idle_and_recovers() {
    let mut c = controller(2000, 2010);
    c.scheduler_mut().fail_next_schedule("no timers left");
    c.play().unwrap();
    assert_eq!(c.status(), PlaybackStatus::Idle);
    assert_eq!(c.timer(), None);
    assert_eq!(c.run_for(5_000).unwrap(), 0);

    c.play().unwrap();
    assert_eq!(c.status(), PlaybackStatus::Playing);
    c.run_for(500).unwrap();
    assert_eq!(c.current_year(), 2001);
}

#[test]
fn foreign_ticks_are_ignored() {
    let mut c = controller(2000, 2010);
    let foreign = c.scheduler_mut().schedule_repeating(100).unwrap();
    assert!(!c.on_tick(foreign).unwrap());
    c.play().unwrap();
    assert_eq!(c.run_for(500).unwrap(), 1);
    assert_eq!(c.current_year(), 2001);
}

#[test]
fn advance_reaching_end_pauses_even_when_idle() {
    let mut c = controller(2000, 2002);
    c.advance(1).unwrap();
    assert_eq!(c.status(), PlaybackStatus::Idle);
    c.advance(5).unwrap();
    assert_eq!(c.current_year(), 2002);
    assert_eq!(c.status(), PlaybackStatus::Paused);
}

#[test]
fn status_changes_are_reported_once_per_transition() {
    let mut c = controller(2000, 2010);
    c.play().unwrap();
    c.play().unwrap();
    c.pause().unwrap();
    c.seek(2003).unwrap();
    assert_eq!(
        c.target().statuses,
        vec![PlaybackStatus::Playing, PlaybackStatus::Paused]
    );
}

#[test]
fn dispose_cancels_timer() {
    let mut c = controller(2000, 2010);
    c.play().unwrap();
    let (clock, probe) = c.dispose();
    assert_eq!(clock.active_timers(), 0);
    assert_eq!(probe.synced, vec![2000]);
}

#[test]
fn invalid_options_are_rejected() {
    let r = TimelineController::new(
        YearRange::new(2000, 2001).unwrap(),
        PlaybackOptions {
            step_ms: 0,
            step_size: 1,
        },
        ManualClock::new(),
        Probe::default(),
    );
    assert!(matches!(r, Err(RaceError::Validation(_))));
}

#[derive(Debug, Default)]
struct RefusesPlaying {
    synced: Vec<Year>,
}

impl SyncTarget for RefusesPlaying {
    fn sync(&mut self, year: Year) -> RaceResult<()> {
        self.synced.push(year);
        Ok(())
    }

    fn status_changed(&mut self, status: PlaybackStatus, _year: Year) -> RaceResult<()> {
        if status == PlaybackStatus::Playing {
            return Err(RaceError::chart("transport rejected"));
        }
        Ok(())
    }
}

#[test]
fn failed_status_report_rolls_back_play() {
    let mut c = TimelineController::new(
        YearRange::new(2000, 2010).unwrap(),
        PlaybackOptions::default(),
        ManualClock::new(),
        RefusesPlaying::default(),
    )
    .unwrap();
    c.seek(2004).unwrap();

    assert!(matches!(c.play(), Err(RaceError::Chart(_))));
    assert_eq!(c.status(), PlaybackStatus::Paused);
    assert!(c.timer().is_none());
    assert_eq!(c.scheduler().active_timers(), 0);
    assert_eq!(c.run_for(5_000).unwrap(), 0);
    assert_eq!(c.current_year(), 2004);
    assert_eq!(c.target().synced, vec![2004]);
}

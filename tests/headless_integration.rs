use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use novelist::config::Config;
use novelist::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use novelist::writer::Writer;

// Headless integration using the runtime + Writer without a TTY.
// Events go through Runner/TestEventSource the same way the binary sees them.
#[test]
fn headless_typing_flow_counts_words() {
    let mut writer = Writer::new(&Config::default());

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for c in "The quick brown fox".chars() {
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .unwrap();
    }
    tx.send(AppEvent::Paste(" jumps over".to_string())).unwrap();
    drop(tx);

    for _ in 0..100u32 {
        let now = Instant::now();
        match runner.step() {
            AppEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    writer.insert_char(c, now);
                }
            }
            AppEvent::Paste(text) => writer.insert_str(&text, now),
            AppEvent::Resize => {}
            AppEvent::Tick => break,
        }
    }

    assert_eq!(writer.text(), "The quick brown fox jumps over");
    assert_eq!(writer.words(), 6);
    assert_eq!(writer.goal_remaining(), 494);
    assert!(writer.sessions.is_active());
    assert!(writer.save_pending());
}

#[test]
fn headless_ticks_fire_autosave_after_quiet_period() {
    let t0 = Instant::now();
    let mut writer = Writer::new(&Config::default());

    // three edits a second apart, then silence
    for s in 0..3u32 {
        writer.insert_str("word ", t0 + Duration::from_secs(s.into()));
    }

    let mut saves = 0;
    for tenth in 0..100u32 {
        let now = t0 + Duration::from_millis(100 * u64::from(tenth));
        if writer.on_tick(now).saved.is_some() {
            saves += 1;
            // last edit at 2s + 3s quiet period
            assert_eq!(now, t0 + Duration::from_secs(5));
        }
    }

    assert_eq!(saves, 1);
    assert_eq!(writer.saves(), 1);
    assert!(!writer.is_saving());
}

#[test]
fn headless_stop_writing_leaves_nothing_scheduled() {
    let t0 = Instant::now();
    let mut writer = Writer::new(&Config::default());
    writer.insert_str("draft", t0);
    writer.timer.start(t0);

    writer.stop_writing();

    for s in 1..=10u64 {
        assert!(writer.on_tick(t0 + Duration::from_secs(s * 60)).is_empty());
    }
    assert_eq!(writer.saves(), 0);
    assert_eq!(writer.timer.remaining(), 1500);
}

use std::time::Duration;

use anyhow::{anyhow, Result};
use futures_channel::oneshot;
use log::{debug, error, info};
use tokio::task::JoinHandle;

use crate::{
    domain::{
        clock_time::{clock_pipeline, DisplayString, RawTime, DEFAULT_TEMPLATE},
        imperative::clock_time,
    },
    handlers::ticks::tick_handler,
};

use super::{clock_source::ClockSource, display::DisplaySink};

pub const ONE_SECOND: Duration = Duration::from_millis(1000);

type Formatter = Box<dyn Fn(RawTime) -> DisplayString + Send>;

/// Which of the two equivalent conversions turns a reading into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    Composed { template: String },
    Imperative,
}

impl Style {
    fn formatter(&self) -> Formatter {
        match self {
            Style::Composed { template } => Box::new(clock_pipeline(template)),
            Style::Imperative => Box::new(clock_time),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::Composed {
            template: DEFAULT_TEMPLATE.into(),
        }
    }
}

pub struct Ticker<C, S> {
    clock: C,
    sink: S,
    format: Formatter,
    period: Duration,
}

impl<C: ClockSource, S: DisplaySink> Ticker<C, S> {
    pub fn new(clock: C, sink: S, style: &Style) -> Self {
        Self {
            clock,
            sink,
            format: style.formatter(),
            period: ONE_SECOND,
        }
    }

    pub fn with_period(self, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(anyhow!("The tick period must be longer than zero"));
        }
        Ok(Self { period, ..self })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Samples the clock and replaces whatever the sink was showing.
    pub fn tick(&mut self) -> Result<()> {
        let reading = (self.format)(self.clock.now());
        debug!("tick: {reading}");
        self.sink.clear()?;
        self.sink.render(reading.as_str())
    }
}

impl<C, S> Ticker<C, S>
where
    C: ClockSource + Send + 'static,
    S: DisplaySink + Send + 'static,
{
    /// Spawns the tick worker onto the current tokio runtime. The first tick
    /// happens straight away, then once per period.
    pub fn start(self) -> TickerHandle {
        let (stop_sink, stop_source) = oneshot::channel();
        info!("Starting ticker with a period of {:?}", self.period);
        let worker = tokio::spawn(tick_handler(self, stop_source));
        TickerHandle {
            stop_sink: Some(stop_sink),
            worker: Some(worker),
        }
    }
}

/// Owns a running ticker. Dropping it without calling `stop` aborts the worker.
pub struct TickerHandle {
    stop_sink: Option<oneshot::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Cancels the schedule and waits for the worker to exit, so nothing is
    /// rendered after this returns. Calling it again does nothing.
    pub async fn stop(&mut self) {
        let Some(stop_sink) = self.stop_sink.take() else {
            return;
        };
        // the worker only drops its receiver on exit, which is what we want anyway
        let _ = stop_sink.send(());

        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                error!("Ticker worker ended abnormally: {e}");
            }
        }
        info!("Ticker stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_sink.is_none()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::services::clock_source::FixedClock;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Shown {
        Cleared,
        Rendered(String),
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        shown: Arc<Mutex<Vec<Shown>>>,
        failing_clears: Arc<Mutex<usize>>,
    }

    impl RecordingSink {
        fn failing_first(clears: usize) -> Self {
            let sink = Self::default();
            *sink.failing_clears.lock().unwrap() = clears;
            sink
        }

        fn shown(&self) -> Vec<Shown> {
            self.shown.lock().unwrap().clone()
        }

        fn renders(&self) -> usize {
            self.shown()
                .iter()
                .filter(|s| matches!(s, Shown::Rendered(_)))
                .count()
        }
    }

    impl DisplaySink for RecordingSink {
        fn render(&mut self, text: &str) -> Result<()> {
            self.shown
                .lock()
                .unwrap()
                .push(Shown::Rendered(text.into()));
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            let mut failing = self.failing_clears.lock().unwrap();
            if *failing > 0 {
                *failing -= 1;
                return Err(anyhow!("display unavailable"));
            }
            self.shown.lock().unwrap().push(Shown::Cleared);
            Ok(())
        }
    }

    fn afternoon() -> FixedClock {
        FixedClock(RawTime::new(13, 5, 9).unwrap())
    }

    #[test]
    fn tick_clears_before_rendering() {
        let sink = RecordingSink::default();
        let mut ticker = Ticker::new(afternoon(), sink.clone(), &Style::default());

        ticker.tick().unwrap();

        assert_eq!(
            sink.shown(),
            vec![Shown::Cleared, Shown::Rendered("01:05:09 PM".into())]
        );
    }

    #[test]
    fn both_styles_render_the_same_text() {
        let composed = RecordingSink::default();
        let imperative = RecordingSink::default();
        Ticker::new(afternoon(), composed.clone(), &Style::default())
            .tick()
            .unwrap();
        Ticker::new(afternoon(), imperative.clone(), &Style::Imperative)
            .tick()
            .unwrap();

        assert_eq!(composed.shown(), imperative.shown());
    }

    #[test]
    fn custom_template_reaches_the_sink() {
        let sink = RecordingSink::default();
        let style = Style::Composed {
            template: "hh-mm tt".into(),
        };
        Ticker::new(afternoon(), sink.clone(), &style).tick().unwrap();

        assert_eq!(sink.shown()[1], Shown::Rendered("01-05 PM".into()));
    }

    #[test]
    fn failed_clear_skips_the_render() {
        let sink = RecordingSink::failing_first(1);
        let mut ticker = Ticker::new(afternoon(), sink.clone(), &Style::default());

        assert!(ticker.tick().is_err());
        assert!(sink.shown().is_empty());
    }

    #[test]
    fn zero_period_is_rejected() {
        let ticker = Ticker::new(afternoon(), RecordingSink::default(), &Style::default());
        assert!(ticker.with_period(Duration::ZERO).is_err());
    }

    #[test]
    fn default_period_is_one_second() {
        let ticker = Ticker::new(afternoon(), RecordingSink::default(), &Style::default());
        assert_eq!(ticker.period(), ONE_SECOND);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period_until_stopped() {
        let sink = RecordingSink::default();
        let mut handle = Ticker::new(afternoon(), sink.clone(), &Style::default()).start();

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(sink.renders(), 4);

        handle.stop().await;
        let shown_at_stop = sink.shown();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(sink.shown(), shown_at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let mut handle =
            Ticker::new(afternoon(), RecordingSink::default(), &Style::default()).start();
        assert!(!handle.is_stopped());

        handle.stop().await;
        handle.stop().await;
        assert!(handle.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_tick_does_not_end_the_schedule() {
        let sink = RecordingSink::failing_first(1);
        let mut handle = Ticker::new(afternoon(), sink.clone(), &Style::default()).start();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.stop().await;

        assert_eq!(sink.renders(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_period_is_honoured() {
        let sink = RecordingSink::default();
        let mut handle = Ticker::new(afternoon(), sink.clone(), &Style::default())
            .with_period(Duration::from_millis(250))
            .unwrap()
            .start();

        tokio::time::sleep(Duration::from_millis(900)).await;
        handle.stop().await;

        assert_eq!(sink.renders(), 4);
    }
}

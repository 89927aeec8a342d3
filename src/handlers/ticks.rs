use futures_channel::oneshot;
use log::{error, info};
use tokio::time::{interval, MissedTickBehavior};

use crate::services::{clock_source::ClockSource, display::DisplaySink, ticker::Ticker};

pub async fn tick_handler<C: ClockSource, S: DisplaySink>(
    mut ticker: Ticker<C, S>,
    mut stop_signal: oneshot::Receiver<()>,
) {
    let mut schedule = interval(ticker.period());
    // a late clock should jump to the current second rather than catch up
    schedule.set_missed_tick_behavior(MissedTickBehavior::Skip);

    'main_loop: loop {
        tokio::select! {
            // a pending stop must win over a tick that is due at the same time
            biased;

            _ = &mut stop_signal => {
                break 'main_loop;
            }

            _ = schedule.tick() => {
                if let Err(e) = ticker.tick() {
                    error!("Tick failed, will retry on the next one: {e:#}");
                }
            }
        }
    }

    info!("Tick worker exiting");
}

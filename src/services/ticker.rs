use std::{sync::Arc, time::Duration};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

use super::{hub::GameHub, transport::Transport};

/// Drive the simulation at a fixed period for as long as the task lives
///
/// Ticks run one after another on this task, each holding the hub lock for
/// its whole step and broadcast. Ticks that fall behind are skipped rather
/// than replayed in a burst.
pub async fn run_tick_loop<T: Transport>(hub: Arc<Mutex<GameHub<T>>>, period: Duration) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Tick loop started ({} ms period)", period.as_millis());

    loop {
        timer.tick().await;
        hub.lock().await.tick();
    }
}

/// Spawn [`run_tick_loop`] on the runtime
pub fn spawn_tick_loop<T: Transport + 'static>(
    hub: Arc<Mutex<GameHub<T>>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(run_tick_loop(hub, period))
}

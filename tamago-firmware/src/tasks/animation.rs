//! Animation task
//!
//! Advances the sprite player every tick and publishes its frame to the
//! animation slot of the frame bus. New selections from the life-cycle task
//! are picked up at the start of a tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tamago_core::animation::AnimationPlayer;
use tamago_core::config::AnimationConfig;
use tamago_core::display::Producer;

use crate::channels::{running, FRAME_BUS, SELECTION};

#[embassy_executor::task]
pub async fn animation_task(mut player: AnimationPlayer<'static>, config: AnimationConfig) {
    info!("Animation task started");

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(config.tick_ms)));
    let mut sink = FRAME_BUS.frame(Producer::Animation);

    while running() {
        if let Some(selection) = SELECTION.try_take() {
            if player.apply(&selection) {
                info!(
                    "Animation {} at {} ms",
                    selection.animation, selection.rate_ms
                );
            }
        }

        if player.update(config.tick_ms, &mut sink) {
            trace!("Frame {}", player.frame_index());
        }

        ticker.next().await;
    }

    info!("Animation task stopped");
}

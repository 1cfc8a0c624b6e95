//! Step the focus rail without a browser and log how it settles.
//!
//! Run with `RUST_LOG=royal_site=debug` to see every navigation, content
//! change and settle event.

use royal_site::logging::init_logging;
use royal_site::prelude::*;
use tracing::info;

fn main() -> SiteResult<()> {
    init_logging("royal_site=debug,rail_settle=info");

    let viewport = Viewport::new(1280.0);
    let mut sched = ManualScheduler::new();
    let mut rail = FocusRail::builtin(RailSettings::default().with_autoplay(false))?;

    let frame = rail.start(viewport, &mut sched);
    if let Some(content) = frame.content {
        info!(title = content.title, counter = %content.counter, "mounted");
    }

    for event in [RailEvent::NextButton, RailEvent::NextButton, RailEvent::CardClick(4)] {
        rail.handle(event, &mut sched);
        let mut frames = 0u32;
        while !rail.motion().is_settled() && frames < 600 {
            sched.run_for(ManualScheduler::DEFAULT_FRAME_PERIOD_MS, |s, id| {
                if let Some(frame) = rail.handle_timer(id, viewport, s) {
                    frames += 1;
                    if let Some(content) = frame.content {
                        info!(index = content.index, title = content.title, "active card changed");
                    }
                }
            });
        }
        info!(?event, frames, position = rail.motion().current, "settled");
    }

    let layout = rail.layout(viewport);
    for card in &layout.cards {
        info!(
            index = card.index,
            transform = %card.transform_css(),
            opacity = card.opacity,
            "card"
        );
    }
    Ok(())
}
